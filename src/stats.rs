//! Dream statistics
//!
//! Pure aggregation over a slice of entries. Nothing here fails: an empty
//! journal yields zero counts, zero averages and empty rankings. The two
//! date-relative results (`monthly_trend`, and therefore `Stats::compute`)
//! take the reference time explicitly.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::model::{DreamEntry, DreamType, Emotion};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Longest trend window, in months
pub const MAX_TREND_MONTHS: u32 = 1200;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub day: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTrend {
    pub month: String,
    pub lucid: usize,
    pub normal: usize,
}

/// Share of one dream type, for the distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeShare {
    pub name: DreamType,
    pub value: usize,
    pub fill: &'static str,
}

/// One axis of the quality radar, scaled to 0-100
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityScore {
    pub quality: &'static str,
    pub value: f64,
}

/// Knobs for the ranked and windowed parts of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    pub top_n: usize,
    pub months_back: u32,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            months_back: 6,
        }
    }
}

/// Read-only snapshot derived from the current entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_dreams: usize,
    pub lucid_dreams: usize,
    pub lucid_percentage: u32,
    pub avg_clarity: f64,
    pub avg_sleep_quality: f64,
    pub streak_days: u32,
    pub most_common_emotions: Vec<EmotionCount>,
    pub most_common_tags: Vec<TagCount>,
    pub weekly_activity: Vec<DayCount>,
    pub monthly_trend: Vec<MonthTrend>,
}

impl Stats {
    pub fn compute(entries: &[DreamEntry], now: DateTime<Utc>, options: &StatsOptions) -> Self {
        Self {
            total_dreams: total_count(entries),
            lucid_dreams: count_by_category(entries, DreamType::Lucid),
            lucid_percentage: lucid_percentage(entries),
            avg_clarity: average_clarity(entries),
            avg_sleep_quality: average_sleep_quality(entries),
            streak_days: streak_days(entries),
            most_common_emotions: top_emotions(entries, options.top_n),
            most_common_tags: top_tags(entries, options.top_n),
            weekly_activity: weekly_activity(entries),
            monthly_trend: monthly_trend(entries, options.months_back, now),
        }
    }
}

pub fn total_count(entries: &[DreamEntry]) -> usize {
    entries.len()
}

pub fn count_by_category(entries: &[DreamEntry], category: DreamType) -> usize {
    entries.iter().filter(|e| e.category == category).count()
}

/// Rounded share of lucid dreams, 0 for an empty journal
pub fn lucid_percentage(entries: &[DreamEntry]) -> u32 {
    let total = total_count(entries);
    if total == 0 {
        return 0;
    }
    let lucid = count_by_category(entries, DreamType::Lucid);
    (100.0 * lucid as f64 / total as f64).round() as u32
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

pub fn average_clarity(entries: &[DreamEntry]) -> f64 {
    mean(entries.iter().map(|e| e.clarity as f64))
}

pub fn average_sleep_quality(entries: &[DreamEntry]) -> f64 {
    mean(entries.iter().map(|e| e.sleep_quality as f64))
}

/// Count occurrences and order by count descending.
/// Ties keep the order in which keys were first seen.
pub(crate) fn rank_by_frequency<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut ranked: Vec<(K, usize)> = Vec::new();
    let mut position: HashMap<K, usize> = HashMap::new();

    for item in items {
        match position.get(&item) {
            Some(&i) => ranked[i].1 += 1,
            None => {
                position.insert(item.clone(), ranked.len());
                ranked.push((item, 1));
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Most frequent emotions. Repeats inside a single entry count once.
pub fn top_emotions(entries: &[DreamEntry], n: usize) -> Vec<EmotionCount> {
    rank_by_frequency(entries.iter().flat_map(|e| e.emotions.iter().copied().unique()))
        .into_iter()
        .take(n)
        .map(|(emotion, count)| EmotionCount { emotion, count })
        .collect()
}

/// Most frequent tags. Repeats inside a single entry count once.
pub fn top_tags(entries: &[DreamEntry], n: usize) -> Vec<TagCount> {
    rank_by_frequency(entries.iter().flat_map(|e| e.tags.iter().unique()))
        .into_iter()
        .take(n)
        .map(|(tag, count)| TagCount {
            tag: tag.clone(),
            count,
        })
        .collect()
}

/// Entries per weekday, always seven buckets starting on Sunday
pub fn weekly_activity(entries: &[DreamEntry]) -> Vec<DayCount> {
    let mut counts = [0usize; 7];
    for entry in entries {
        counts[entry.date.weekday().num_days_from_sunday() as usize] += 1;
    }

    WEEKDAY_LABELS
        .iter()
        .zip(counts)
        .map(|(day, count)| DayCount {
            day: day.to_string(),
            count,
        })
        .collect()
}

/// (year, month 1-12) that lies `back` calendar months before the given one
fn months_before(year: i32, month: u32, back: u32) -> (i64, u32) {
    let index = year as i64 * 12 + (month as i64 - 1) - back as i64;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Lucid vs. non-lucid counts for the last `months_back` months, oldest first.
/// The newest bucket is the month containing `now`; the window is capped at
/// `MAX_TREND_MONTHS`.
pub fn monthly_trend(entries: &[DreamEntry], months_back: u32, now: DateTime<Utc>) -> Vec<MonthTrend> {
    (0..months_back.min(MAX_TREND_MONTHS))
        .rev()
        .map(|back| {
            let (year, month) = months_before(now.year(), now.month(), back);
            let (lucid, normal) = entries
                .iter()
                .filter(|e| e.date.year() as i64 == year && e.date.month() == month)
                .fold((0, 0), |(lucid, normal), e| {
                    if e.is_lucid() {
                        (lucid + 1, normal)
                    } else {
                        (lucid, normal + 1)
                    }
                });
            MonthTrend {
                month: MONTH_LABELS[(month - 1) as usize].to_string(),
                lucid,
                normal,
            }
        })
        .collect()
}

/// Consecutive days with at least one entry, counted back from the day of the
/// most recent entry.
pub fn streak_days(entries: &[DreamEntry]) -> u32 {
    let days: HashSet<NaiveDate> = entries.iter().map(|e| e.date.date_naive()).collect();
    let Some(latest) = days.iter().max().copied() else {
        return 0;
    };

    let mut streak = 0;
    let mut day = Some(latest);
    while let Some(current) = day {
        if !days.contains(&current) {
            break;
        }
        streak += 1;
        day = current.pred_opt();
    }
    streak
}

/// Per-type counts in enumeration order, omitting types with no entries
pub fn type_distribution(entries: &[DreamEntry]) -> Vec<TypeShare> {
    DreamType::ALL
        .into_iter()
        .map(|name| TypeShare {
            name,
            value: count_by_category(entries, name),
            fill: name.color(),
        })
        .filter(|share| share.value > 0)
        .collect()
}

/// Radar axes derived from a snapshot, each on a 0-100 scale
pub fn quality_profile(stats: &Stats) -> Vec<QualityScore> {
    vec![
        QualityScore {
            quality: "Clarity",
            value: stats.avg_clarity * 20.0,
        },
        QualityScore {
            quality: "Sleep",
            value: stats.avg_sleep_quality,
        },
        QualityScore {
            quality: "Lucidity",
            value: stats.lucid_percentage as f64,
        },
    ]
}
