//! NDJSON interchange between `folio-filter` and `folio-browse`.
//!
//! `folio-filter` prints one feed entry per matching item; `folio-browse`
//! reads them back from stdin. The format is versioned so a browse built
//! against a newer entry shape refuses old feeds instead of misrendering
//! them.

use crate::catalog::{CatalogIndex, CatalogItem, CatalogKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;

pub const FEED_SCHEMA_VERSION: &str = "folio_feed_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One filtered item on the wire.
///
/// Entries denormalize catalog metadata (key, title, category label) so the
/// feed stays self-describing: `folio-browse` renders it without reloading
/// any manifest, and a feed saved to disk keeps meaning after the manifest
/// changes.
pub struct FeedEntry {
    pub schema_version: String,
    pub catalog: CatalogKey,
    pub catalog_title: String,
    pub category_label: String,
    pub item: CatalogItem,
}

impl FeedEntry {
    /// Wrap `item` with the catalog metadata browse needs to render it.
    pub fn from_index(index: &CatalogIndex, item: &CatalogItem) -> FeedEntry {
        FeedEntry {
            schema_version: FEED_SCHEMA_VERSION.to_string(),
            catalog: index.key().clone(),
            catalog_title: index.manifest().catalog.title.clone(),
            // Indexing guarantees the category is declared; fall back to the
            // raw id anyway so serialization stays total.
            category_label: index
                .category_label(&item.category)
                .unwrap_or(item.category.0.as_str())
                .to_string(),
            item: item.clone(),
        }
    }
}

/// Errors that can occur while reading NDJSON feed streams.
#[derive(Debug)]
pub enum FeedReadError {
    Io(std::io::Error),
    Parse {
        line: usize,
        error: serde_json::Error,
    },
    Version {
        line: usize,
        found: String,
    },
}

impl fmt::Display for FeedReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedReadError::Io(err) => write!(f, "failed to read feed stream: {err}"),
            FeedReadError::Parse { line, error } => {
                write!(f, "line {line}: unable to parse feed entry ({error})")
            }
            FeedReadError::Version { line, found } => {
                write!(
                    f,
                    "line {line}: unsupported feed version '{found}' (expected {FEED_SCHEMA_VERSION})"
                )
            }
        }
    }
}

impl std::error::Error for FeedReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedReadError::Io(err) => Some(err),
            FeedReadError::Parse { error, .. } => Some(error),
            FeedReadError::Version { .. } => None,
        }
    }
}

/// Read feed entries from an NDJSON stream.
///
/// Lines containing only whitespace are skipped. Errors include the 1-based
/// line number where reading failed to simplify diagnostics for callers.
pub fn read_feed_entries<R: BufRead>(reader: R) -> Result<Vec<FeedEntry>, FeedReadError> {
    let mut entries = Vec::new();
    let mut line_buf = String::new();
    let mut reader = reader;
    let mut line_number = 0usize;

    loop {
        line_buf.clear();
        let bytes = reader.read_line(&mut line_buf).map_err(FeedReadError::Io)?;
        if bytes == 0 {
            break;
        }
        line_number += 1;
        let trimmed = line_buf.trim();
        if trimmed.is_empty() {
            continue;
        }
        let entry =
            serde_json::from_str::<FeedEntry>(trimmed).map_err(|error| FeedReadError::Parse {
                line: line_number,
                error,
            })?;
        if entry.schema_version != FEED_SCHEMA_VERSION {
            return Err(FeedReadError::Version {
                line: line_number,
                found: entry.schema_version,
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::CatalogManifest;
    use serde_json::json;
    use std::io::{BufReader, Cursor};

    #[test]
    fn entries_round_trip_in_catalog_order() {
        let manifest: CatalogManifest = serde_json::from_value(json!({
            "schema_version": "folio_catalog_v1",
            "catalog": { "key": "wire_v1", "title": "Wire", "labels": ["fixture"] },
            "scope": {
                "description": "Fixture catalog for feed tests.",
                "categories": { "code": "Code & Scripts" }
            },
            "items": [
                {
                    "id": "first",
                    "title": "First",
                    "category": "code",
                    "description": "First item.",
                    "links": { "demo": "https://example.com/first" }
                },
                {
                    "id": "second",
                    "title": "Second",
                    "category": "code",
                    "description": "Second item.",
                    "availability": "coming_soon"
                }
            ]
        }))
        .expect("fixture manifest parses");
        let index = CatalogIndex::from_manifest(manifest).expect("fixture manifest indexes");

        let ndjson = index
            .items()
            .iter()
            .map(|item| {
                serde_json::to_string(&FeedEntry::from_index(&index, item))
                    .expect("entry serializes")
            })
            .collect::<Vec<_>>()
            .join("\n");

        let entries = read_feed_entries(BufReader::new(Cursor::new(ndjson.into_bytes())))
            .expect("feed parses");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item.id.0, "first");
        assert_eq!(entries[1].item.id.0, "second");
        assert_eq!(entries[0].category_label, "Code & Scripts");
        assert_eq!(entries[0].catalog_title, "Wire");
    }

    #[test]
    fn ignores_blank_lines() {
        let first = sample_entry("alpha", FEED_SCHEMA_VERSION);
        let second = sample_entry("beta", FEED_SCHEMA_VERSION);
        let ndjson = format!("{first}\n  \n{second}\n");
        let cursor = Cursor::new(ndjson.into_bytes());
        let entries = read_feed_entries(BufReader::new(cursor)).expect("parses with blanks");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item.id.0, "alpha");
        assert_eq!(entries[1].item.id.0, "beta");
    }

    #[test]
    fn reports_line_numbers_on_parse_error() {
        let first = sample_entry("alpha", FEED_SCHEMA_VERSION);
        let ndjson = format!("{first}\n{first}\n{{ invalid json }}\n");
        let cursor = Cursor::new(ndjson.into_bytes());
        let err = read_feed_entries(BufReader::new(cursor)).expect_err("should fail");
        match err {
            FeedReadError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_foreign_feed_versions() {
        let first = sample_entry("alpha", FEED_SCHEMA_VERSION);
        let stale = sample_entry("beta", "folio_feed_v0");
        let ndjson = format!("{first}\n{stale}\n");
        let cursor = Cursor::new(ndjson.into_bytes());
        let err = read_feed_entries(BufReader::new(cursor)).expect_err("should fail");
        match err {
            FeedReadError::Version { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, "folio_feed_v0");
            }
            other => panic!("expected version error, got {:?}", other),
        }
    }

    fn sample_entry(item_id: &str, version: &str) -> String {
        json!({
            "schema_version": version,
            "catalog": "wire_v1",
            "catalog_title": "Wire",
            "category_label": "Code & Scripts",
            "item": {
                "id": item_id,
                "title": "Sample",
                "category": "code",
                "description": "Sample item.",
                "tags": ["Rust"],
                "featured": false,
                "availability": "live",
                "metadata": {}
            }
        })
        .to_string()
    }
}
