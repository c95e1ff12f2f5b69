//! Per-category rollups over a catalog index.
//!
//! Summaries seed every category the scope declares, not just the ones items
//! reference, so an empty category shows up as a zero row instead of
//! vanishing. Validation leans on that to flag declared-but-unused
//! categories.

use crate::catalog::{CatalogIndex, CatalogKey, CategoryId, ItemId};
use crate::filter::AvailabilitySummary;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub label: String,
    /// Member ids in manifest order.
    pub item_ids: Vec<ItemId>,
    pub live: usize,
    pub coming_soon: usize,
}

#[derive(Clone, Debug)]
pub struct CatalogSummary {
    pub catalog: CatalogKey,
    pub availability: AvailabilitySummary,
    pub categories: BTreeMap<CategoryId, CategoryBreakdown>,
}

impl CatalogSummary {
    /// Declared categories no item references.
    pub fn empty_categories(&self) -> Vec<&CategoryId> {
        self.categories
            .iter()
            .filter(|(_, breakdown)| breakdown.item_ids.is_empty())
            .map(|(id, _)| id)
            .collect()
    }
}

pub fn summarize_catalog(index: &CatalogIndex) -> CatalogSummary {
    let mut categories: BTreeMap<CategoryId, CategoryBreakdown> = index
        .declared_categories()
        .iter()
        .map(|(id, label)| {
            (
                CategoryId(id.clone()),
                CategoryBreakdown {
                    label: label.clone(),
                    ..CategoryBreakdown::default()
                },
            )
        })
        .collect();

    for item in index.items() {
        // Index construction guarantees every item category is declared.
        let breakdown = categories
            .entry(item.category.clone())
            .or_default();
        breakdown.item_ids.push(item.id.clone());
        if item.availability.is_coming_soon() {
            breakdown.coming_soon += 1;
        } else {
            breakdown.live += 1;
        }
    }

    CatalogSummary {
        catalog: index.key().clone(),
        availability: AvailabilitySummary::tally(index.items()),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;
    use crate::catalog::model::CatalogManifest;
    use serde_json::json;

    #[test]
    fn summary_seeds_declared_categories_and_counts_membership() {
        let manifest: CatalogManifest = serde_json::from_value(json!({
            "schema_version": "folio_catalog_v1",
            "catalog": { "key": "sample_v1", "title": "Sample", "labels": ["sample"] },
            "scope": {
                "description": "Fixture catalog for summary tests.",
                "categories": {
                    "code": "Code & Scripts",
                    "guides": "Guides",
                    "vacant": "Vacant Shelf"
                }
            },
            "items": [
                {
                    "id": "scraper",
                    "title": "Scraper",
                    "category": "code",
                    "description": "Scheduled scraping job.",
                    "availability": "coming_soon"
                },
                {
                    "id": "handbook",
                    "title": "Handbook",
                    "category": "guides",
                    "description": "Onboarding handbook."
                },
                {
                    "id": "cheatsheet",
                    "title": "Cheatsheet",
                    "category": "guides",
                    "description": "One-page reference."
                }
            ]
        }))
        .expect("fixture manifest parses");
        let index = CatalogIndex::from_manifest(manifest).expect("fixture manifest indexes");

        let summary = summarize_catalog(&index);
        assert_eq!(summary.availability.total, 3);
        assert_eq!(summary.availability.coming_soon, 1);
        assert_eq!(summary.categories.len(), 3);

        let guides = &summary.categories[&CategoryId("guides".to_string())];
        assert_eq!(guides.label, "Guides");
        assert_eq!(guides.live, 2);
        assert_eq!(
            guides.item_ids,
            vec![ItemId("handbook".to_string()), ItemId("cheatsheet".to_string())]
        );

        let empties = summary.empty_categories();
        assert_eq!(empties, vec![&CategoryId("vacant".to_string())]);
    }
}
