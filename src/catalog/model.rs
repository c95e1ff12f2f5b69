//! Serializable representation of the catalog manifests under `content/`.
//!
//! The types mirror `schema/catalog_manifest.schema.json` so helpers and tests
//! can reason about catalog content without ad-hoc JSON handling. Use
//! `CatalogIndex` for validation and id lookup; use these structs when the full
//! manifest surface is required (scope, categories, item links).

use crate::catalog::identity::{Availability, CatalogKey, CategoryId, ItemId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full catalog manifest as stored on disk (or embedded at build time).
pub struct CatalogManifest {
    pub schema_version: String,
    pub catalog: CatalogInfo,
    pub scope: Scope,
    pub items: Vec<CatalogItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Identity block naming the catalog and its display metadata.
pub struct CatalogInfo {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Top-level manifest scope: what this catalog covers and which categories it
/// declares. Category keys are ids; values are display labels.
pub struct Scope {
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub categories: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One catalog entry: a project write-up or a downloadable resource.
///
/// `metadata` carries catalog-specific display extras (file type and size for
/// resources, headline metric for projects) and defaults to an empty object so
/// consumers never see `null`. The filter engine reads only `title`,
/// `description`, `tags`, `category`, `featured`, and `availability`.
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub category: CategoryId,
    #[serde(default)]
    pub blurb: Option<String>,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub links: ItemLinks,
    #[serde(default = "empty_object")]
    pub metadata: Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Opaque link strings attached to an item.
///
/// Values are handed to the hosting environment verbatim; nothing here fetches
/// or validates them as URLs.
pub struct ItemLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
}

impl ItemLinks {
    /// True when no link of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.demo.is_none()
            && self.source.is_none()
            && self.dataset.is_none()
            && self.download.is_none()
    }
}

fn empty_object() -> Value {
    // The manifest schema requires `metadata` to be a JSON object; default to
    // an empty map so callers never emit `null`.
    Value::Object(Default::default())
}

/// Read and parse a catalog manifest from disk without additional validation.
pub fn load_manifest_from_path(path: &Path) -> Result<CatalogManifest> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let manifest: CatalogManifest =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_defaults_fill_optional_fields() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": "sample-item",
            "title": "Sample Item",
            "category": "guides",
            "description": "fixture"
        }))
        .unwrap();

        assert!(item.blurb.is_none());
        assert!(item.tags.is_empty());
        assert!(!item.featured);
        assert_eq!(item.availability, Availability::Live);
        assert!(item.links.is_empty());
        assert!(item.metadata.is_object());
        assert_eq!(item.metadata, json!({}));
    }

    #[test]
    fn absent_links_do_not_serialize_as_null() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": "sample-item",
            "title": "Sample Item",
            "category": "guides",
            "description": "fixture",
            "links": {"download": "/downloads/sample.pdf"}
        }))
        .unwrap();

        let value = serde_json::to_value(&item).unwrap();
        let links = value.get("links").and_then(Value::as_object).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(
            links.get("download").and_then(Value::as_str),
            Some("/downloads/sample.pdf")
        );
    }
}
