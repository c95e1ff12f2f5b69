//! Catalog manifest wiring.
//!
//! This module wraps the JSON manifests under `content/` so helpers can load a
//! validated snapshot and expose consistent identifiers. Types here mirror the
//! manifest schema fields; callers use `CatalogIndex` for order-preserving
//! lookups and `CatalogRepository` when both catalogs are registered.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{Availability, CatalogKey, CategoryId, ItemId};
pub use index::CatalogIndex;
pub use model::{CatalogInfo, CatalogItem, CatalogManifest, ItemLinks, Scope};
pub use repository::CatalogRepository;

pub use model::load_manifest_from_path;
