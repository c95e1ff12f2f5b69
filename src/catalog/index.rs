//! Indexed view of a catalog manifest instance.
//!
//! The index enforces the expected manifest schema version and provides fast
//! lookup by item id while preserving manifest order, which is the display
//! order the site author chose. It is intentionally strict about duplicates,
//! undeclared categories, and unknown schema versions so helper binaries
//! cannot silently consume mismatched catalogs.

use crate::catalog::model::{CatalogInfo, CatalogItem, CatalogManifest, load_manifest_from_path};
use crate::catalog::{CatalogKey, CategoryId, ItemId};
use crate::schema_loader::{SchemaOptions, compile_catalog_schema};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

// The site currently ships a single manifest revision; reject unexpected
// versions rather than risk emitting feed entries with mismatched metadata.
const DEFAULT_SCHEMA_VERSION: &str = "folio_catalog_v1";

// Selector wildcard understood by the filter layer; a manifest must never
// declare it as a real category.
const RESERVED_CATEGORY_ID: &str = "all";

#[derive(Debug)]
/// Catalog manifest plus a derived position index keyed by item id.
pub struct CatalogIndex {
    catalog_key: CatalogKey,
    manifest: CatalogManifest,
    by_id: BTreeMap<ItemId, usize>,
}

impl CatalogIndex {
    /// Load and validate a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let manifest = load_manifest_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?;
        Self::from_manifest(manifest)
    }

    /// Validate an already-parsed manifest and build the index.
    ///
    /// Used for the embedded builtin catalogs, which are schema-checked in
    /// tests rather than on every process start.
    pub fn from_manifest(manifest: CatalogManifest) -> Result<Self> {
        validate_schema_version(&manifest.schema_version)?;
        validate_catalog_info(&manifest.catalog)?;
        let by_id = build_index(&manifest)?;
        Ok(Self {
            catalog_key: manifest.catalog.key.clone(),
            manifest,
            by_id,
        })
    }

    /// The catalog key declared in the loaded manifest.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog_key
    }

    /// Resolve an item by id.
    ///
    /// Returns `None` instead of erroring; callers surface errors with the CLI
    /// context that referenced the missing id.
    pub fn item(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&position| &self.manifest.items[position])
    }

    /// All items in manifest order. Order is part of the contract: filters
    /// return subsequences of this slice.
    pub fn items(&self) -> &[CatalogItem] {
        &self.manifest.items
    }

    /// Iterates item ids in manifest order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.manifest.items.iter().map(|item| &item.id)
    }

    /// Display label for a declared category id.
    pub fn category_label(&self, category: &CategoryId) -> Option<&str> {
        self.manifest
            .scope
            .categories
            .get(category.0.as_str())
            .map(String::as_str)
    }

    /// Declared category ids with display labels, sorted by id.
    pub fn declared_categories(&self) -> &BTreeMap<String, String> {
        &self.manifest.scope.categories
    }

    /// Access the underlying manifest (scope, catalog info, raw items).
    pub fn manifest(&self) -> &CatalogManifest {
        &self.manifest
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([default_catalog_schema_version()])
}

fn default_catalog_schema_version() -> String {
    embedded_schema_version().unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
}

fn embedded_schema_version() -> Option<String> {
    let value: Value = serde_json::from_str(crate::schema_loader::CATALOG_SCHEMA_JSON).ok()?;
    value
        .pointer("/properties/schema_version/const")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn validate_catalog_info(info: &CatalogInfo) -> Result<()> {
    validate_catalog_key(&info.key)?;
    if info.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    if info.labels.iter().any(|label| label.trim().is_empty()) {
        bail!("catalog.labels must not contain empty entries");
    }
    Ok(())
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    Ok(())
}

fn build_index(manifest: &CatalogManifest) -> Result<BTreeMap<ItemId, usize>> {
    if manifest.items.is_empty() {
        bail!("catalog contains no items");
    }

    let category_ids: BTreeSet<&str> = manifest
        .scope
        .categories
        .keys()
        .map(String::as_str)
        .collect();
    if category_ids.is_empty() {
        bail!("catalog scope must declare at least one category");
    }
    if category_ids.contains(RESERVED_CATEGORY_ID) {
        bail!("category id '{RESERVED_CATEGORY_ID}' is reserved for filter selectors");
    }

    let mut map = BTreeMap::new();
    for (position, item) in manifest.items.iter().enumerate() {
        if item.id.0.trim().is_empty() {
            bail!("encountered item with no id");
        }
        if map.contains_key(&item.id) {
            bail!("duplicate item id {}", item.id.0);
        }
        if !category_ids.contains(item.category.0.as_str()) {
            bail!(
                "item {} references unknown category {}",
                item.id.0,
                item.category.0
            );
        }
        map.insert(item.id.clone(), position);
    }
    Ok(map)
}

fn validate_against_schema(manifest_path: &Path) -> Result<()> {
    let data = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("reading catalog {}", manifest_path.display()))?;
    let manifest_value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", manifest_path.display()))?;

    let manifest_version = manifest_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let allowed = allowed_schema_versions();
    let schema = compile_catalog_schema(SchemaOptions {
        allowed_versions: Some(&allowed),
        expected_version: Some(&manifest_version),
        patch_schema_version_const: true,
        ..Default::default()
    })
    .with_context(|| format!("loading schema for {}", manifest_path.display()))?;

    if let Err(errors) = schema.compiled.validate(&manifest_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "catalog manifest {} failed schema validation (schema {}):\n{}",
            manifest_path.display(),
            schema.schema_version,
            details
        );
    }
    Ok(())
}
