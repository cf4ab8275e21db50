//! Journal state
//!
//! `Journal` is the single owner of the dream entries. Every mutation goes
//! through it, and statistics are always derived from the entries it holds at
//! the moment they are requested.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{JournalError, JournalResult};
use crate::model::{DreamEntry, DreamType, EntryPatch};
use crate::search;
use crate::stats::{Stats, StatsOptions};

#[derive(Debug, Clone, Default)]
pub struct Journal {
    /// Newest first
    entries: Vec<DreamEntry>,
    selected_id: Option<String>,
    search_query: String,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing collection. Later duplicates of an id are dropped.
    pub fn from_entries(entries: Vec<DreamEntry>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut kept: Vec<DreamEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                tracing::warn!("Skipping duplicate dream id {}", entry.id);
                continue;
            }
            kept.push(entry);
        }
        Self {
            entries: kept,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[DreamEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DreamEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DreamEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: &str) -> JournalResult<&mut DreamEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))
    }

    /// Record a new dream at the front of the journal
    pub fn add(&mut self, entry: DreamEntry) -> JournalResult<&DreamEntry> {
        if self.get(&entry.id).is_some() {
            return Err(JournalError::DuplicateId(entry.id));
        }
        debug!("Adding dream {} ({})", entry.id, entry.category);
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    pub fn update(&mut self, id: &str, patch: EntryPatch) -> JournalResult<&DreamEntry> {
        let entry = self.get_mut(id)?;
        patch.apply(entry);
        debug!("Updated dream {}", id);
        Ok(&*entry)
    }

    /// Remove a dream; clears the selection if it pointed at this dream.
    /// Connections from other dreams are left as they are.
    pub fn delete(&mut self, id: &str) -> JournalResult<DreamEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))?;
        let removed = self.entries.remove(index);

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        debug!("Deleted dream {}", id);
        Ok(removed)
    }

    /// Flip the starred flag and return its new value
    pub fn toggle_starred(&mut self, id: &str) -> JournalResult<bool> {
        let entry = self.get_mut(id)?;
        entry.is_starred = !entry.is_starred;
        debug!("Dream {} starred: {}", id, entry.is_starred);
        Ok(entry.is_starred)
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected_id = id.map(str::to_string);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&DreamEntry> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Entries matching the current search query
    pub fn filtered(&self) -> Vec<&DreamEntry> {
        search::filter_entries(&self.entries, &self.search_query)
    }

    /// Current search narrowed to one dream type
    pub fn filtered_by(&self, category: Option<DreamType>) -> Vec<&DreamEntry> {
        search::filter_by_category(&self.entries, &self.search_query, category)
    }

    /// First `limit` starred dreams, newest first
    pub fn starred(&self, limit: usize) -> Vec<&DreamEntry> {
        self.entries.iter().filter(|e| e.is_starred).take(limit).collect()
    }

    /// Connected dreams that still exist; dangling ids are skipped
    pub fn related(&self, id: &str) -> JournalResult<Vec<&DreamEntry>> {
        let entry = self
            .get(id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))?;
        Ok(entry
            .connections
            .iter()
            .flatten()
            .filter_map(|other| self.get(other))
            .collect())
    }

    pub fn stats(&self, now: DateTime<Utc>, options: &StatsOptions) -> Stats {
        Stats::compute(&self.entries, now, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 8, 0, 0).unwrap()
    }

    fn dream(id: &str) -> DreamEntry {
        DreamEntry::new(id, format!("Dream {}", id), "A quiet night", now())
    }

    #[test]
    fn test_add_prepends_and_rejects_duplicates() {
        let mut journal = Journal::new();
        journal.add(dream("a")).unwrap();
        journal.add(dream("b")).unwrap();

        let ids: Vec<&str> = journal.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);

        let err = journal.add(dream("a")).unwrap_err();
        assert!(matches!(err, JournalError::DuplicateId(id) if id == "a"));
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_from_entries_drops_duplicate_ids() {
        let mut late = dream("a");
        late.title = "Late copy".to_string();
        let journal = Journal::from_entries(vec![dream("a"), dream("b"), late, dream("c"), dream("b")]);

        let ids: Vec<&str> = journal.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(journal.get("a").unwrap().title, "Dream a");
    }

    #[test]
    fn test_update_merges_fields() {
        let mut journal = Journal::from_entries(vec![dream("a")]);
        let patch = EntryPatch {
            category: Some(DreamType::Lucid),
            lucidity: Some(75),
            ..Default::default()
        };
        let updated = journal.update("a", patch).unwrap();
        assert_eq!(updated.category, DreamType::Lucid);
        assert_eq!(updated.title, "Dream a");

        assert!(matches!(
            journal.update("missing", EntryPatch::default()),
            Err(JournalError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_clears_matching_selection() {
        let mut journal = Journal::from_entries(vec![dream("a"), dream("b")]);

        journal.select(Some("b"));
        journal.delete("a").unwrap();
        assert_eq!(journal.selected_id(), Some("b"));

        journal.delete("b").unwrap();
        assert_eq!(journal.selected_id(), None);
        assert!(journal.is_empty());
        assert!(journal.delete("b").is_err());
    }

    #[test]
    fn test_toggle_starred() {
        let mut journal = Journal::from_entries(vec![dream("a")]);
        assert!(journal.toggle_starred("a").unwrap());
        assert_eq!(journal.starred(3).len(), 1);
        assert!(!journal.toggle_starred("a").unwrap());
        assert!(journal.starred(3).is_empty());
    }

    #[test]
    fn test_starred_limit_keeps_order() {
        let mut journal = Journal::new();
        for id in ["a", "b", "c", "d"] {
            journal.add(dream(id).starred(true)).unwrap();
        }
        let ids: Vec<&str> = journal.starred(3).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["d", "c", "b"]);
    }

    #[test]
    fn test_search_query_drives_filtered() {
        let mut journal = Journal::from_entries(vec![
            dream("a").tags(["ocean"]),
            dream("b").category(DreamType::Lucid).tags(["ocean"]),
            dream("c"),
        ]);
        assert_eq!(journal.filtered().len(), 3);

        journal.set_search_query("OCEAN");
        assert_eq!(journal.filtered().len(), 2);
        assert_eq!(journal.filtered_by(Some(DreamType::Lucid)).len(), 1);
    }

    #[test]
    fn test_related_skips_dangling_ids() {
        let journal = Journal::from_entries(vec![
            dream("a").connections(["b", "gone"]),
            dream("b"),
        ]);
        let related = journal.related("a").unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "b");
        assert!(journal.related("b").unwrap().is_empty());
        assert!(journal.related("zzz").is_err());
    }

    #[test]
    fn test_stats_follow_mutations() {
        let mut journal = Journal::new();
        journal
            .add(dream("a").category(DreamType::Lucid).clarity(5))
            .unwrap();
        journal
            .add(DreamEntry::new("b", "Dream b", "", now() - Duration::days(1)).clarity(3))
            .unwrap();

        let stats = journal.stats(now(), &StatsOptions::default());
        assert_eq!(stats.total_dreams, 2);
        assert_eq!(stats.lucid_dreams, 1);
        assert_eq!(stats.lucid_percentage, 50);
        assert_eq!(stats.streak_days, 2);

        journal.delete("a").unwrap();
        let stats = journal.stats(now(), &StatsOptions::default());
        assert_eq!(stats.total_dreams, 1);
        assert_eq!(stats.lucid_percentage, 0);
        assert_eq!(stats.avg_clarity, 3.0);
    }
}
