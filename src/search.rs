//! Journal search
//!
//! Case-insensitive substring matching over title, content, tags and symbols.
//! Results keep the input order; there is no ranking.

use crate::model::{DreamEntry, DreamType};

/// True when `needle` (already lowercased) occurs in any searchable field
fn matches(entry: &DreamEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry.content.to_lowercase().contains(needle)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || entry.symbols.iter().any(|s| s.to_lowercase().contains(needle))
}

/// Entries matching `query`. A blank query passes everything through.
pub fn filter_entries<'a, I>(entries: I, query: &str) -> Vec<&'a DreamEntry>
where
    I: IntoIterator<Item = &'a DreamEntry>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.into_iter().collect();
    }
    entries.into_iter().filter(|e| matches(e, &needle)).collect()
}

/// Search, then narrow to one dream type when a quick-filter is active
pub fn filter_by_category<'a, I>(
    entries: I,
    query: &str,
    category: Option<DreamType>,
) -> Vec<&'a DreamEntry>
where
    I: IntoIterator<Item = &'a DreamEntry>,
{
    let mut found = filter_entries(entries, query);
    if let Some(category) = category {
        found.retain(|e| e.category == category);
    }
    found
}
