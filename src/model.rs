//! Core journal types
//!
//! - `DreamEntry`: a single recorded dream
//! - `DreamType` and `Emotion`: closed classifications with display colors
//! - `EntryPatch`: partial update applied in place by the journal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JournalError;

/// Dream classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DreamType {
    #[default]
    Normal,
    Lucid,
    Nightmare,
    Recurring,
    Prophetic,
    Shared,
}

impl DreamType {
    pub const ALL: [DreamType; 6] = [
        DreamType::Normal,
        DreamType::Lucid,
        DreamType::Nightmare,
        DreamType::Recurring,
        DreamType::Prophetic,
        DreamType::Shared,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DreamType::Normal => "normal",
            DreamType::Lucid => "lucid",
            DreamType::Nightmare => "nightmare",
            DreamType::Recurring => "recurring",
            DreamType::Prophetic => "prophetic",
            DreamType::Shared => "shared",
        }
    }

    /// Hex color used by charts and badges
    pub fn color(&self) -> &'static str {
        match self {
            DreamType::Normal => "#D4AF37",
            DreamType::Lucid => "#FFD700",
            DreamType::Nightmare => "#B22222",
            DreamType::Recurring => "#6B8E23",
            DreamType::Prophetic => "#9370DB",
            DreamType::Shared => "#4682B4",
        }
    }

    /// Color lookup by name; unknown names get the `normal` color.
    pub fn color_for(name: &str) -> &'static str {
        name.parse::<DreamType>()
            .unwrap_or_default()
            .color()
    }
}

impl fmt::Display for DreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DreamType {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DreamType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| JournalError::InvalidValue(format!("unknown dream type '{}'", s)))
    }
}

/// Emotion felt during a dream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Fear,
    Peace,
    Confusion,
    Love,
    Anxiety,
    Wonder,
    #[default]
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Fear,
        Emotion::Peace,
        Emotion::Confusion,
        Emotion::Love,
        Emotion::Anxiety,
        Emotion::Wonder,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Fear => "fear",
            Emotion::Peace => "peace",
            Emotion::Confusion => "confusion",
            Emotion::Love => "love",
            Emotion::Anxiety => "anxiety",
            Emotion::Wonder => "wonder",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Joy => "#FFD700",
            Emotion::Fear => "#8B0000",
            Emotion::Peace => "#87CEEB",
            Emotion::Confusion => "#9370DB",
            Emotion::Love => "#FF69B4",
            Emotion::Anxiety => "#FF6347",
            Emotion::Wonder => "#DAA520",
            Emotion::Neutral => "#A0A0A0",
        }
    }

    /// Color lookup by name; unknown names get the `neutral` color.
    pub fn color_for(name: &str) -> &'static str {
        name.parse::<Emotion>().unwrap_or_default().color()
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| JournalError::InvalidValue(format!("unknown emotion '{}'", s)))
    }
}

/// A single journal record.
///
/// Ratings are stored as given; range checks belong to whoever produces the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub category: DreamType,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    /// 1-5
    pub clarity: u8,
    /// 0-100
    pub lucidity: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// 0-100
    pub sleep_quality: u8,
    /// Estimated REM duration in minutes
    pub duration: u32,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
    /// Ids of related dreams; may point at entries that no longer exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<String>>,
}

impl DreamEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            date,
            category: DreamType::Normal,
            emotions: Vec::new(),
            clarity: 3,
            lucidity: 0,
            tags: Vec::new(),
            symbols: Vec::new(),
            characters: Vec::new(),
            locations: Vec::new(),
            sleep_quality: 50,
            duration: 0,
            is_starred: false,
            ai_analysis: None,
            connections: None,
        }
    }

    pub fn category(mut self, category: DreamType) -> Self {
        self.category = category;
        self
    }

    pub fn emotions(mut self, emotions: impl IntoIterator<Item = Emotion>) -> Self {
        self.emotions = emotions.into_iter().collect();
        self
    }

    pub fn clarity(mut self, clarity: u8) -> Self {
        self.clarity = clarity;
        self
    }

    pub fn lucidity(mut self, lucidity: u8) -> Self {
        self.lucidity = lucidity;
        self
    }

    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn symbols<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn characters<S: Into<String>>(mut self, characters: impl IntoIterator<Item = S>) -> Self {
        self.characters = characters.into_iter().map(Into::into).collect();
        self
    }

    pub fn locations<S: Into<String>>(mut self, locations: impl IntoIterator<Item = S>) -> Self {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn sleep(mut self, sleep_quality: u8, duration: u32) -> Self {
        self.sleep_quality = sleep_quality;
        self.duration = duration;
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.is_starred = starred;
        self
    }

    pub fn analysis(mut self, analysis: impl Into<String>) -> Self {
        self.ai_analysis = Some(analysis.into());
        self
    }

    pub fn connections<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.connections = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_lucid(&self) -> bool {
        self.category == DreamType::Lucid
    }
}

/// Partial update for an existing entry. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub category: Option<DreamType>,
    pub emotions: Option<Vec<Emotion>>,
    pub clarity: Option<u8>,
    pub lucidity: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub symbols: Option<Vec<String>>,
    pub characters: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub sleep_quality: Option<u8>,
    pub duration: Option<u32>,
    pub is_starred: Option<bool>,
    pub ai_analysis: Option<String>,
    pub connections: Option<Vec<String>>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.emotions.is_none()
            && self.clarity.is_none()
            && self.lucidity.is_none()
            && self.tags.is_none()
            && self.symbols.is_none()
            && self.characters.is_none()
            && self.locations.is_none()
            && self.sleep_quality.is_none()
            && self.duration.is_none()
            && self.is_starred.is_none()
            && self.ai_analysis.is_none()
            && self.connections.is_none()
    }

    /// Merge the set fields into `entry`. The id is never touched.
    pub fn apply(self, entry: &mut DreamEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
        if let Some(emotions) = self.emotions {
            entry.emotions = emotions;
        }
        if let Some(clarity) = self.clarity {
            entry.clarity = clarity;
        }
        if let Some(lucidity) = self.lucidity {
            entry.lucidity = lucidity;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(symbols) = self.symbols {
            entry.symbols = symbols;
        }
        if let Some(characters) = self.characters {
            entry.characters = characters;
        }
        if let Some(locations) = self.locations {
            entry.locations = locations;
        }
        if let Some(sleep_quality) = self.sleep_quality {
            entry.sleep_quality = sleep_quality;
        }
        if let Some(duration) = self.duration {
            entry.duration = duration;
        }
        if let Some(starred) = self.is_starred {
            entry.is_starred = starred;
        }
        if let Some(analysis) = self.ai_analysis {
            entry.ai_analysis = Some(analysis);
        }
        if let Some(connections) = self.connections {
            entry.connections = Some(connections);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DreamEntry {
        DreamEntry::new(
            "d-1",
            "Flying over the city",
            "I was soaring above rooftops",
            Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap(),
        )
        .category(DreamType::Lucid)
        .emotions([Emotion::Joy, Emotion::Wonder])
        .clarity(4)
        .lucidity(85)
        .tags(["flying", "city"])
        .sleep(88, 45)
    }

    #[test]
    fn test_dream_type_parse() {
        assert_eq!("lucid".parse::<DreamType>().unwrap(), DreamType::Lucid);
        assert_eq!(" Nightmare ".parse::<DreamType>().unwrap(), DreamType::Nightmare);
        assert!("daydream".parse::<DreamType>().is_err());
    }

    #[test]
    fn test_color_fallbacks() {
        assert_eq!(DreamType::color_for("lucid"), "#FFD700");
        assert_eq!(DreamType::color_for("unknown"), DreamType::Normal.color());
        assert_eq!(Emotion::color_for("love"), "#FF69B4");
        assert_eq!(Emotion::color_for("boredom"), Emotion::Neutral.color());
    }

    #[test]
    fn test_entry_serializes_with_dashboard_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"type\":\"lucid\""));
        assert!(json.contains("\"sleepQuality\":88"));
        assert!(json.contains("\"isStarred\":false"));
        assert!(json.contains("\"emotions\":[\"joy\",\"wonder\"]"));
        assert!(!json.contains("aiAnalysis"));
    }

    #[test]
    fn test_entry_deserializes_with_missing_collections() {
        let json = r#"{
            "id": "x",
            "title": "t",
            "content": "c",
            "date": "2024-01-05T03:00:00Z",
            "type": "recurring",
            "clarity": 2,
            "lucidity": 10,
            "sleepQuality": 40,
            "duration": 30
        }"#;
        let entry: DreamEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, DreamType::Recurring);
        assert!(entry.tags.is_empty());
        assert!(!entry.is_starred);
        assert!(entry.connections.is_none());
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut entry = sample();
        let patch = EntryPatch {
            title: Some("Falling".to_string()),
            clarity: Some(2),
            ai_analysis: Some("Loss of control".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut entry);

        assert_eq!(entry.id, "d-1");
        assert_eq!(entry.title, "Falling");
        assert_eq!(entry.clarity, 2);
        assert_eq!(entry.lucidity, 85);
        assert_eq!(entry.ai_analysis.as_deref(), Some("Loss of control"));
        assert!(EntryPatch::default().is_empty());
    }
}
