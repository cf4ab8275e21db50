//! # lucid-journal
//!
//! Dream journal core: an entry store plus the statistics, search and labels a
//! dashboard needs.
//!
//! ## Modules
//!
//! - [`model`]: dream entries, dream types, emotions and partial updates
//! - [`journal`]: the state container that owns and mutates entries
//! - [`stats`]: pure aggregation (lucid rate, streaks, rankings, trends)
//! - [`search`]: case-insensitive substring search
//! - [`labels`]: lucidity and sleep quality bands
//! - [`patterns`]: recurring symbols, people, places and emotions
//! - [`storage`]: JSON persistence used by the CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use lucid_journal::{DreamEntry, DreamType, Journal, StatsOptions, lucidity_level};
//!
//! let mut journal = Journal::new();
//! journal
//!     .add(
//!         DreamEntry::new("d-1", "Flying", "Over the rooftops", Utc::now())
//!             .category(DreamType::Lucid)
//!             .lucidity(92),
//!     )
//!     .unwrap();
//!
//! let stats = journal.stats(Utc::now(), &StatsOptions::default());
//! assert_eq!(stats.lucid_percentage, 100);
//! assert_eq!(lucidity_level(92.0), "Full Control");
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod journal;
pub mod labels;
pub mod model;
pub mod patterns;
pub mod search;
pub mod seed;
pub mod stats;
pub mod storage;

pub use config::{Config, ConfigError};
pub use error::{JournalError, JournalResult};
pub use journal::Journal;
pub use labels::{lucidity_level, sleep_quality_label};
pub use model::{DreamEntry, DreamType, Emotion, EntryPatch};
pub use patterns::{DreamPattern, PatternKind, detect_patterns};
pub use search::{filter_by_category, filter_entries};
pub use stats::{Stats, StatsOptions};
