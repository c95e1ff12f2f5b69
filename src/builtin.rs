//! Registry of the catalogs shipped with the crate.
//!
//! This module centralizes how catalog names map to manifest files and
//! embedded payloads. Binaries should rely on this registry instead of
//! hard-coding catalog names so a new catalog can be added in one place
//! without changing public CLI flags or drifting from the manifest schema.

use crate::catalog::model::CatalogManifest;
use crate::catalog::{CatalogIndex, CatalogKey};
use anyhow::{Context, Result, bail};

const PROJECTS_JSON: &str = include_str!("../content/projects.json");
const RESOURCES_JSON: &str = include_str!("../content/resources.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinCatalog {
    Projects,
    Resources,
}

impl BuiltinCatalog {
    pub const ALL: [BuiltinCatalog; 2] = [BuiltinCatalog::Projects, BuiltinCatalog::Resources];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinCatalog::Projects => "projects",
            BuiltinCatalog::Resources => "resources",
        }
    }

    /// Manifest path relative to the content root.
    pub fn manifest_relpath(&self) -> &'static str {
        match self {
            BuiltinCatalog::Projects => "content/projects.json",
            BuiltinCatalog::Resources => "content/resources.json",
        }
    }

    /// Manifest JSON embedded at build time.
    ///
    /// Binaries filter against this copy so they work without the content
    /// root on disk; `folio-validate` goes through the files instead.
    pub fn embedded_json(&self) -> &'static str {
        match self {
            BuiltinCatalog::Projects => PROJECTS_JSON,
            BuiltinCatalog::Resources => RESOURCES_JSON,
        }
    }

    /// Build a validated index from the embedded manifest.
    pub fn index(&self) -> Result<CatalogIndex> {
        let manifest: CatalogManifest = serde_json::from_str(self.embedded_json())
            .with_context(|| format!("parsing embedded {} manifest", self.as_str()))?;
        CatalogIndex::from_manifest(manifest)
            .with_context(|| format!("indexing embedded {} manifest", self.as_str()))
    }

    /// The catalog key each embedded manifest declares.
    pub fn expected_key(&self) -> CatalogKey {
        match self {
            BuiltinCatalog::Projects => CatalogKey("projects_v1".to_string()),
            BuiltinCatalog::Resources => CatalogKey("resources_v1".to_string()),
        }
    }
}

impl TryFrom<&str> for BuiltinCatalog {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "projects" => Ok(BuiltinCatalog::Projects),
            "resources" => Ok(BuiltinCatalog::Resources),
            other => bail!("Unknown catalog: {other} (expected projects|resources)"),
        }
    }
}
