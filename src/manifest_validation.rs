//! Advisory cross-checks over indexed catalogs.
//!
//! Everything here flags manifest smells that schema validation and indexing
//! accept: a live item nobody can act on, a staged item that still exposes a
//! download, a declared category no item uses, an id reused across catalogs.
//! `folio-validate` prints the findings and folds them into its exit code.

use crate::catalog::{CatalogIndex, ItemId};
use crate::summary::summarize_catalog;
use std::collections::BTreeMap;

pub fn validate_catalog(index: &CatalogIndex) -> Vec<String> {
    // Collect every finding instead of stopping at the first so one pass
    // over a manifest reports all of its problems.
    let mut findings = Vec::new();
    for item in index.items() {
        if item.availability.is_coming_soon() {
            if item.links.download.is_some() {
                findings.push(format!(
                    "item {} is coming soon but still carries a download link",
                    item.id.0
                ));
            }
        } else if item.links.download.is_none() && item.links.demo.is_none() {
            findings.push(format!(
                "item {} is live but offers neither a download nor a demo link",
                item.id.0
            ));
        }
    }
    for category in summarize_catalog(index).empty_categories() {
        findings.push(format!(
            "category {} is declared but has no items",
            category.0
        ));
    }
    findings
}

/// Flag item ids that appear in more than one catalog.
///
/// Within a catalog ids are unique by construction; across catalogs reuse is
/// legal but confuses download logs and open-by-id flows, so it is reported.
pub fn cross_catalog_findings(indexes: &[&CatalogIndex]) -> Vec<String> {
    let mut owners: BTreeMap<&ItemId, Vec<&str>> = BTreeMap::new();
    for index in indexes {
        for item in index.items() {
            owners
                .entry(&item.id)
                .or_default()
                .push(index.key().0.as_str());
        }
    }

    let mut findings = Vec::new();
    for (id, catalogs) in owners {
        if catalogs.len() > 1 {
            findings.push(format!(
                "item id {} appears in multiple catalogs: {}",
                id.0,
                catalogs.join(", ")
            ));
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;
    use crate::catalog::model::CatalogManifest;
    use serde_json::{Value, json};

    fn index_from(value: Value) -> CatalogIndex {
        let manifest: CatalogManifest =
            serde_json::from_value(value).expect("fixture manifest parses");
        CatalogIndex::from_manifest(manifest).expect("fixture manifest indexes")
    }

    #[test]
    fn advisory_checks_flag_action_gaps_and_empty_categories() {
        let index = index_from(json!({
            "schema_version": "folio_catalog_v1",
            "catalog": { "key": "smells_v1", "title": "Smells", "labels": ["fixture"] },
            "scope": {
                "description": "Fixture with one of each advisory smell.",
                "categories": { "code": "Code", "vacant": "Vacant" }
            },
            "items": [
                {
                    "id": "inert",
                    "title": "Inert",
                    "category": "code",
                    "description": "Live but unreachable."
                },
                {
                    "id": "leaky",
                    "title": "Leaky",
                    "category": "code",
                    "description": "Staged but downloadable.",
                    "availability": "coming_soon",
                    "links": { "download": "/downloads/code/leaky.zip" }
                }
            ]
        }));

        let findings = validate_catalog(&index);
        assert_eq!(findings.len(), 3);
        assert!(findings[0].contains("inert") && findings[0].contains("neither"));
        assert!(findings[1].contains("leaky") && findings[1].contains("coming soon"));
        assert!(findings[2].contains("vacant"));
    }

    #[test]
    fn clean_catalogs_produce_no_findings() {
        let index = index_from(json!({
            "schema_version": "folio_catalog_v1",
            "catalog": { "key": "clean_v1", "title": "Clean", "labels": ["fixture"] },
            "scope": {
                "description": "Fixture with nothing to report.",
                "categories": { "code": "Code" }
            },
            "items": [
                {
                    "id": "demoable",
                    "title": "Demoable",
                    "category": "code",
                    "description": "Has a demo.",
                    "links": { "demo": "https://example.com/demo" }
                },
                {
                    "id": "staged",
                    "title": "Staged",
                    "category": "code",
                    "description": "Coming soon, no links.",
                    "availability": "coming_soon"
                }
            ]
        }));
        assert!(validate_catalog(&index).is_empty());
    }

    #[test]
    fn cross_catalog_reuse_names_every_owner() {
        let left = index_from(json!({
            "schema_version": "folio_catalog_v1",
            "catalog": { "key": "left_v1", "title": "Left", "labels": ["fixture"] },
            "scope": {
                "description": "Left fixture.",
                "categories": { "code": "Code" }
            },
            "items": [
                {
                    "id": "shared-id",
                    "title": "Shared",
                    "category": "code",
                    "description": "Lives in both catalogs.",
                    "links": { "demo": "https://example.com/a" }
                }
            ]
        }));
        let right = index_from(json!({
            "schema_version": "folio_catalog_v1",
            "catalog": { "key": "right_v1", "title": "Right", "labels": ["fixture"] },
            "scope": {
                "description": "Right fixture.",
                "categories": { "code": "Code" }
            },
            "items": [
                {
                    "id": "shared-id",
                    "title": "Shared",
                    "category": "code",
                    "description": "Lives in both catalogs.",
                    "links": { "demo": "https://example.com/b" }
                }
            ]
        }));

        let findings = cross_catalog_findings(&[&left, &right]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("shared-id"));
        assert!(findings[0].contains("left_v1") && findings[0].contains("right_v1"));

        assert!(cross_catalog_findings(&[&left]).is_empty());
    }
}
