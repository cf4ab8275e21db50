//! Recurring pattern detection
//!
//! Finds symbols, characters, locations and emotions that show up across
//! several dreams and remembers which dreams they appeared in.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::DreamEntry;
use crate::stats::rank_by_frequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Symbol,
    Character,
    Location,
    Emotion,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Symbol => "symbol",
            PatternKind::Character => "character",
            PatternKind::Location => "location",
            PatternKind::Emotion => "emotion",
        }
    }
}

/// Stable id for a pattern: `<kind>-<name>`, lowercased, whitespace as `-`
pub fn pattern_id(kind: PatternKind, name: &str) -> String {
    let slug = name.split_whitespace().join("-").to_lowercase();
    format!("{}-{}", kind.as_str(), slug)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamPattern {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub name: String,
    /// Number of dreams containing the pattern
    pub frequency: usize,
    pub associated_dreams: Vec<String>,
    /// Free-text reading attached by the user; detection leaves it empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

fn occurrences(entry: &DreamEntry) -> Vec<(PatternKind, String)> {
    let mut found = Vec::new();
    let named = [
        (PatternKind::Symbol, &entry.symbols),
        (PatternKind::Character, &entry.characters),
        (PatternKind::Location, &entry.locations),
    ];
    for (kind, values) in named {
        found.extend(values.iter().map(|v| (kind, v.clone())));
    }
    found.extend(
        entry
            .emotions
            .iter()
            .map(|e| (PatternKind::Emotion, e.as_str().to_string())),
    );
    found.into_iter().unique().collect()
}

/// Patterns seen in at least `min_frequency` dreams, most frequent first.
/// Ties keep the order of first appearance in `entries`.
pub fn detect_patterns(entries: &[DreamEntry], min_frequency: usize) -> Vec<DreamPattern> {
    let mut seen_in: HashMap<(PatternKind, String), Vec<String>> = HashMap::new();
    let mut keys: Vec<(PatternKind, String)> = Vec::new();

    for entry in entries {
        for key in occurrences(entry) {
            seen_in.entry(key.clone()).or_default().push(entry.id.clone());
            keys.push(key);
        }
    }

    rank_by_frequency(keys)
        .into_iter()
        .filter(|(_, frequency)| *frequency >= min_frequency)
        .map(|(key, frequency)| {
            let associated_dreams = seen_in.remove(&key).unwrap_or_default();
            let (kind, name) = key;
            DreamPattern {
                id: pattern_id(kind, &name),
                kind,
                name,
                frequency,
                associated_dreams,
                interpretation: None,
            }
        })
        .collect()
}
