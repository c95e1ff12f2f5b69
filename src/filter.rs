//! Pure catalog filtering.
//!
//! Everything here is a total function over an immutable [`CatalogIndex`]:
//! the same query against the same index always yields the same items, in
//! manifest order, with no interior state. Binaries layer argument parsing
//! and rendering on top; sessions layer selection on top. Neither feeds back
//! into the filter.

use crate::catalog::{CatalogIndex, CatalogItem, CategoryId};
use anyhow::{Result, bail};

/// Category side of a catalog query.
///
/// `all` is a selector, never a category id. Manifests are rejected at index
/// time if they try to declare a category named `all`, so the two namespaces
/// cannot collide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Category(CategoryId),
}

impl CategorySelector {
    pub fn parse(value: &str) -> CategorySelector {
        if value == "all" {
            CategorySelector::All
        } else {
            CategorySelector::Category(CategoryId(value.to_string()))
        }
    }

    pub fn admits(&self, category: &CategoryId) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Category(id) => id == category,
        }
    }
}

impl Default for CategorySelector {
    fn default() -> Self {
        CategorySelector::All
    }
}

/// One catalog query: a category selector and a free-text search.
///
/// The two legs are independent and commute. An empty search matches
/// everything, so `CatalogQuery::default()` is the identity query.
#[derive(Clone, Debug, Default)]
pub struct CatalogQuery {
    pub category: CategorySelector,
    pub search: String,
}

/// Apply `query` to the catalog, preserving manifest order.
///
/// Selecting a category the scope never declared is not an error here; it
/// simply matches nothing. Binaries that take the category from user input
/// call [`ensure_selector_declared`] first to turn the typo into a message.
pub fn filter_items<'a>(index: &'a CatalogIndex, query: &CatalogQuery) -> Vec<&'a CatalogItem> {
    let needle = query.search.to_lowercase();
    index
        .items()
        .iter()
        .filter(|item| query.category.admits(&item.category))
        .filter(|item| item_matches_search(item, &needle))
        .collect()
}

/// Case-insensitive substring match over title, description, and tags.
///
/// `needle` must already be lowercased so the per-item work stays linear.
/// Blurbs are deliberately outside the haystack: they repeat the description
/// in shortened form and would only add false hits.
fn item_matches_search(item: &CatalogItem, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// The featured shelf: flagged items that are actually live.
///
/// Independent of any query. A coming-soon item stays off the shelf even if
/// the manifest flags it, so a staged item cannot be promoted by accident.
pub fn featured_items<'a>(index: &'a CatalogIndex) -> Vec<&'a CatalogItem> {
    index
        .items()
        .iter()
        .filter(|item| item.featured && !item.availability.is_coming_soon())
        .collect()
}

/// Availability counts over a set of items, usually a filter result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AvailabilitySummary {
    pub total: usize,
    pub available: usize,
    pub coming_soon: usize,
}

impl AvailabilitySummary {
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a CatalogItem>) -> AvailabilitySummary {
        let mut summary = AvailabilitySummary::default();
        for item in items {
            summary.total += 1;
            if item.availability.is_coming_soon() {
                summary.coming_soon += 1;
            } else {
                summary.available += 1;
            }
        }
        summary
    }
}

/// Reject selectors naming a category the catalog scope never declared.
pub fn ensure_selector_declared(index: &CatalogIndex, selector: &CategorySelector) -> Result<()> {
    match selector {
        CategorySelector::All => Ok(()),
        CategorySelector::Category(id) => {
            if index.category_label(id).is_some() {
                Ok(())
            } else {
                let declared: Vec<&str> = index
                    .declared_categories()
                    .keys()
                    .map(String::as_str)
                    .collect();
                bail!(
                    "unknown category {} (declared: {})",
                    id.0,
                    declared.join(", ")
                );
            }
        }
    }
}
