//! Holds one or more validated catalogs for lookup by key.
//!
//! The repository lets callers resolve item metadata using the catalog key
//! stored in feed entries, keeping catalog selection explicit even when both
//! builtin catalogs (and any manifest overrides) are loaded at once.

use crate::builtin::BuiltinCatalog;
use crate::catalog::index::CatalogIndex;
use crate::catalog::model::CatalogItem;
use crate::catalog::{CatalogKey, ItemId};
use anyhow::{Result, bail};
use std::collections::BTreeMap;

#[derive(Default)]
/// In-memory store for catalog indexes keyed by `CatalogKey`.
pub struct CatalogRepository {
    catalogs: BTreeMap<CatalogKey, CatalogIndex>,
}

impl CatalogRepository {
    /// Register a catalog for later lookup.
    ///
    /// Keys must be unique; replacing a registered catalog silently would let
    /// two manifests shadow each other.
    pub fn register(&mut self, index: CatalogIndex) -> Result<()> {
        let key = index.key().clone();
        if self.catalogs.contains_key(&key) {
            bail!("catalog key {} already registered", key.0);
        }
        self.catalogs.insert(key, index);
        Ok(())
    }

    /// Load both builtin catalogs from their embedded manifests.
    pub fn builtin() -> Result<Self> {
        let mut repository = Self::default();
        for catalog in BuiltinCatalog::ALL {
            repository.register(catalog.index()?)?;
        }
        Ok(repository)
    }

    /// Fetch a catalog by key, if present.
    pub fn get(&self, key: &CatalogKey) -> Option<&CatalogIndex> {
        self.catalogs.get(key)
    }

    /// Resolve an item inside a registered catalog.
    pub fn find_item(&self, key: &CatalogKey, id: &ItemId) -> Option<&CatalogItem> {
        self.get(key)?.item(id)
    }

    /// Registered catalog keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &CatalogKey> {
        self.catalogs.keys()
    }

    /// Registered indexes in key order.
    pub fn indexes(&self) -> impl Iterator<Item = &CatalogIndex> {
        self.catalogs.values()
    }

    /// Number of registered catalogs.
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    /// True when nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
