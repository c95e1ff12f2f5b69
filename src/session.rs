//! Per-session state layered over an immutable catalog.
//!
//! A session owns the mutable half of a browsing run: the active query, at
//! most one selected item, and the set of acknowledged downloads. The catalog
//! index it points at never changes underneath it; availability moves only
//! when a manifest is edited and the process restarts.

use crate::catalog::{CatalogIndex, CatalogItem, ItemId};
use crate::filter::{CatalogQuery, filter_items};
use anyhow::{Result, bail};
use std::collections::BTreeSet;

/// Holder for the one item a session may have open.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    active: Option<ItemId>,
}

impl Selection {
    /// Select `id`, replacing any previous selection.
    ///
    /// Unknown ids are rejected and leave the previous selection in place.
    pub fn select(&mut self, index: &CatalogIndex, id: ItemId) -> Result<()> {
        if index.item(&id).is_none() {
            bail!("no item {} in catalog {}", id.0, index.key().0);
        }
        self.active = Some(id);
        Ok(())
    }

    /// Drop the selection. Always succeeds, selected or not.
    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&ItemId> {
        self.active.as_ref()
    }
}

/// Set of item ids whose download this session has acknowledged.
///
/// Insert-only with set semantics: recording an id twice is a no-op and the
/// log reports one entry. Nothing here persists past the process.
#[derive(Clone, Debug, Default)]
pub struct DownloadLog {
    acked: BTreeSet<ItemId>,
}

impl DownloadLog {
    /// Record `id`; returns `false` when it was already in the log.
    pub fn record(&mut self, id: ItemId) -> bool {
        self.acked.insert(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.acked.contains(id)
    }

    /// Recorded ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.acked.iter()
    }

    pub fn len(&self) -> usize {
        self.acked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acked.is_empty()
    }
}

/// A browsing session over one catalog.
pub struct Session<'a> {
    index: &'a CatalogIndex,
    query: CatalogQuery,
    selection: Selection,
    downloads: DownloadLog,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a CatalogIndex) -> Session<'a> {
        Session {
            index,
            query: CatalogQuery::default(),
            selection: Selection::default(),
            downloads: DownloadLog::default(),
        }
    }

    pub fn index(&self) -> &'a CatalogIndex {
        self.index
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Replace the active query. Selection and downloads are untouched;
    /// narrowing the view does not close an open item.
    pub fn set_query(&mut self, query: CatalogQuery) {
        self.query = query;
    }

    /// Items matching the active query, in catalog order.
    pub fn results(&self) -> Vec<&'a CatalogItem> {
        filter_items(self.index, &self.query)
    }

    /// Open an item by id. The id must exist in the catalog; it does not
    /// have to match the active query.
    pub fn select(&mut self, id: ItemId) -> Result<()> {
        self.selection.select(self.index, id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_item(&self) -> Option<&'a CatalogItem> {
        self.selection
            .active()
            .and_then(|id| self.index.item(id))
    }

    /// Acknowledge a download; returns `false` on repeats.
    pub fn mark_downloaded(&mut self, id: &ItemId) -> Result<bool> {
        if self.index.item(id).is_none() {
            bail!("no item {} in catalog {}", id.0, self.index.key().0);
        }
        Ok(self.downloads.record(id.clone()))
    }

    pub fn downloads(&self) -> &DownloadLog {
        &self.downloads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::BuiltinCatalog;
    use crate::filter::CategorySelector;

    #[test]
    fn selection_rejects_unknown_ids_and_keeps_the_previous_pick() {
        let index = BuiltinCatalog::Projects.index().expect("builtin indexes");
        let mut session = Session::new(&index);

        session
            .select(ItemId("pneumonia-detection".to_string()))
            .expect("known id selects");
        assert!(session.select(ItemId("missing".to_string())).is_err());
        assert_eq!(
            session.selected_item().map(|item| item.id.0.as_str()),
            Some("pneumonia-detection")
        );

        session.clear_selection();
        assert!(session.selected_item().is_none());
        session.clear_selection();
        assert!(session.selected_item().is_none());
    }

    #[test]
    fn narrowing_the_query_does_not_drop_selection_or_downloads() {
        let index = BuiltinCatalog::Resources.index().expect("builtin indexes");
        let mut session = Session::new(&index);

        session
            .select(ItemId("cv-template".to_string()))
            .expect("known id selects");
        session
            .mark_downloaded(&ItemId("cv-template".to_string()))
            .expect("known id records");

        session.set_query(CatalogQuery {
            category: CategorySelector::parse("guides"),
            ..CatalogQuery::default()
        });
        assert!(session.results().iter().all(|item| item.id.0 != "cv-template"));
        assert!(session.selected_item().is_some());
        assert!(session.downloads().contains(&ItemId("cv-template".to_string())));
    }

    #[test]
    fn download_log_is_idempotent() {
        let index = BuiltinCatalog::Resources.index().expect("builtin indexes");
        let mut session = Session::new(&index);
        let id = ItemId("budget-tracker".to_string());

        assert!(session.mark_downloaded(&id).expect("known id records"));
        assert!(!session.mark_downloaded(&id).expect("repeat is accepted"));
        assert_eq!(session.downloads().len(), 1);
        assert!(session.mark_downloaded(&ItemId("missing".to_string())).is_err());
    }
}
