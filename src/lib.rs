//! Shared library for the showfolio catalog tools.
//!
//! The crate exposes the catalog model, the pure filter engine, and the
//! utilities used by the folio helper binaries. Public functions here form
//! the contract the binaries depend on: content-root discovery, manifest path
//! resolution, helper binary resolution, and the NDJSON feed format described
//! in README.md.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod browse_support;
pub mod builtin;
pub mod catalog;
pub mod feed;
pub mod filter;
pub mod manifest_validation;
pub mod runtime;
mod schema_loader;
pub mod session;
pub mod summary;

pub use browse_support::{BrowseOptions, render_browse_output};
pub use builtin::BuiltinCatalog;
pub use catalog::{
    Availability, CatalogIndex, CatalogInfo, CatalogItem, CatalogKey, CatalogManifest,
    CatalogRepository, CategoryId, ItemId, ItemLinks, Scope, load_manifest_from_path,
};
pub use feed::{FEED_SCHEMA_VERSION, FeedEntry, FeedReadError, read_feed_entries};
pub use filter::{
    AvailabilitySummary, CatalogQuery, CategorySelector, ensure_selector_declared, featured_items,
    filter_items,
};
pub use manifest_validation::{cross_catalog_findings, validate_catalog};
pub use session::{DownloadLog, Selection, Session};
pub use summary::{CatalogSummary, CategoryBreakdown, summarize_catalog};

/// Environment variable naming the content root explicitly.
pub const CONTENT_ROOT_ENV: &str = "FOLIO_ROOT";

/// Returns true when `candidate` looks like the content root.
///
/// Detection is intentionally strict: both builtin manifest files must be
/// present so helpers never mistake an unrelated checkout for the root.
fn is_content_root(candidate: &Path) -> bool {
    BuiltinCatalog::ALL
        .iter()
        .all(|catalog| candidate.join(catalog.manifest_relpath()).is_file())
}

/// Verifies that an explicit `FOLIO_ROOT` hint points at a valid root.
fn content_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_content_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_content_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the content root carrying the builtin manifests.
///
/// Search order: honor `FOLIO_ROOT` if it points at a real root, fall back to
/// climbing up from the current executable, then use the build-time hint.
/// Callers can treat failure as fatal because `folio-validate` and the
/// wrapper cannot do their jobs without the manifest files.
pub fn find_content_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(CONTENT_ROOT_ENV) {
        if let Some(root) = content_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("FOLIO_ROOT_HINT") {
        if let Some(root) = content_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the folio content root. Set FOLIO_ROOT to a checkout containing content/projects.json."
    );
}

/// Absolute path of a builtin manifest under `root`.
pub fn manifest_path(root: &Path, catalog: BuiltinCatalog) -> PathBuf {
    root.join(catalog.manifest_relpath())
}

/// Resolve another helper binary for the `folio` wrapper.
///
/// Helpers usually sit next to the wrapper in the same Cargo output
/// directory, so that is checked first, then the root's target directories,
/// then PATH.
pub fn resolve_helper_binary(root: &Path, name: &str) -> Result<PathBuf> {
    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let sibling = exe_dir.join(name);
            if runtime::helper_is_executable(&sibling) {
                return Ok(sibling);
            }
        }
    }

    if let Some(found) = runtime::resolve_root_helper(root, name) {
        return Ok(found);
    }
    if let Some(found) = runtime::find_on_path(name) {
        return Ok(found);
    }

    bail!(
        "Unable to locate helper '{name}' under {}. Build the binaries with 'cargo build' first.",
        root.display()
    )
}
