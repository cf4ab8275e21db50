//! Sample journal used to populate a fresh install

use chrono::{DateTime, Duration, Utc};

use crate::model::{DreamEntry, DreamType, Emotion};

/// A small, varied journal ending at `now`, newest first
pub fn sample_entries(now: DateTime<Utc>) -> Vec<DreamEntry> {
    let night = |days: i64, hours: i64| now - Duration::days(days) - Duration::hours(hours);

    vec![
        DreamEntry::new(
            "seed-1",
            "The Golden Library",
            "Endless shelves of glowing books. I realized I was dreaming when the text kept changing, and I pulled a book that opened into a staircase.",
            night(0, 2),
        )
        .category(DreamType::Lucid)
        .emotions([Emotion::Wonder, Emotion::Joy])
        .clarity(5)
        .lucidity(92)
        .tags(["library", "books", "realization"])
        .symbols(["key", "staircase", "light"])
        .locations(["library"])
        .sleep(88, 45)
        .starred(true)
        .analysis("Libraries often stand for stored knowledge waiting to be accessed.")
        .connections(["seed-4"]),
        DreamEntry::new(
            "seed-2",
            "Ocean Without a Shore",
            "I was swimming in warm water that glowed beneath me. Whales sang somewhere far below.",
            night(1, 3),
        )
        .category(DreamType::Normal)
        .emotions([Emotion::Peace, Emotion::Wonder])
        .clarity(4)
        .lucidity(20)
        .tags(["water", "ocean", "animals"])
        .symbols(["whale", "light"])
        .locations(["ocean"])
        .sleep(79, 38),
        DreamEntry::new(
            "seed-3",
            "The Hallway Chase",
            "Something followed me down a school hallway that never ended. Every door was locked.",
            night(2, 1),
        )
        .category(DreamType::Nightmare)
        .emotions([Emotion::Fear, Emotion::Anxiety])
        .clarity(3)
        .lucidity(5)
        .tags(["chase", "school"])
        .symbols(["door", "key"])
        .locations(["school"])
        .sleep(42, 25),
        DreamEntry::new(
            "seed-4",
            "Flying Over the City",
            "I noticed my hands had too many fingers, became lucid, and flew over the rooftops at sunrise.",
            night(3, 4),
        )
        .category(DreamType::Lucid)
        .emotions([Emotion::Joy])
        .clarity(5)
        .lucidity(78)
        .tags(["flying", "city", "realization"])
        .symbols(["hands", "sun"])
        .locations(["city"])
        .sleep(91, 52)
        .starred(true),
        DreamEntry::new(
            "seed-5",
            "Grandmother's Kitchen",
            "We baked bread together like we used to. She told me the door key was under the mat.",
            night(6, 2),
        )
        .category(DreamType::Recurring)
        .emotions([Emotion::Love, Emotion::Peace])
        .clarity(4)
        .lucidity(35)
        .tags(["family", "home"])
        .symbols(["bread", "key", "door"])
        .characters(["Grandmother"])
        .locations(["kitchen"])
        .sleep(84, 40),
        DreamEntry::new(
            "seed-6",
            "Shared Campfire",
            "My sister and I sat by a fire in a forest. She described the same dream the next morning.",
            night(40, 1),
        )
        .category(DreamType::Shared)
        .emotions([Emotion::Confusion, Emotion::Wonder])
        .clarity(2)
        .lucidity(10)
        .tags(["family", "forest"])
        .symbols(["fire"])
        .characters(["Sister"])
        .locations(["forest"])
        .sleep(66, 30),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Stats, StatsOptions};
    use chrono::TimeZone;

    #[test]
    fn test_sample_is_consistent() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 9, 0, 0).unwrap();
        let entries = sample_entries(now);
        let stats = Stats::compute(&entries, now, &StatsOptions::default());

        assert_eq!(stats.total_dreams, 6);
        assert_eq!(stats.lucid_dreams, 2);
        assert_eq!(stats.lucid_percentage, 33);
        // today through three nights ago
        assert_eq!(stats.streak_days, 4);
        assert!(entries.iter().all(|e| (1..=5).contains(&e.clarity)));
        assert!(entries.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
