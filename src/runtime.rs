//! Runtime helpers shared across binaries.
//!
//! Centralizes executable detection, PATH resolution, and the helper search
//! order so the `folio` wrapper subscribes to the same behavior as direct
//! invocations instead of re-implementing it.

use std::env;
use std::path::{Path, PathBuf};

/// Returns true when a file exists and has any execute bit set.
pub fn helper_is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = std::fs::metadata(path) {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Helper search order anchored at the content root.
///
/// target/release is checked before target/debug.
pub fn root_helper_candidates(root: &Path, name: &str) -> Vec<PathBuf> {
    vec![
        root.join("target").join("release").join(name),
        root.join("target").join("debug").join(name),
    ]
}

/// Resolve the first executable helper in the root search order.
pub fn resolve_root_helper(root: &Path, name: &str) -> Option<PathBuf> {
    root_helper_candidates(root, name)
        .into_iter()
        .find(|candidate| helper_is_executable(candidate))
}

/// Find an executable by name somewhere on PATH.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        let candidate = dir.join(name);
        if helper_is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}
