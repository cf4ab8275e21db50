//! Display helpers shared by the CLI and any other front end

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// "Today", "Yesterday", the weekday name within the current Sunday-based
/// week, otherwise e.g. "Mar 5, 2024".
pub fn format_dream_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = date.date_naive();
    let today = now.date_naive();

    if day == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(day) {
        return "Yesterday".to_string();
    }

    let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    let week_end = week_start + Duration::days(6);
    if day >= week_start && day <= week_end {
        return date.format("%A").to_string();
    }

    date.format("%b %-d, %Y").to_string()
}

/// Coarse "3 hours ago" / "in 2 days" description
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(date);
    let future = delta < Duration::zero();
    let delta = delta.abs();

    let phrase = if delta < Duration::minutes(1) {
        return "just now".to_string();
    } else if delta < Duration::hours(1) {
        plural(delta.num_minutes(), "minute")
    } else if delta < Duration::days(1) {
        plural(delta.num_hours(), "hour")
    } else if delta < Duration::days(30) {
        plural(delta.num_days(), "day")
    } else if delta < Duration::days(365) {
        plural(delta.num_days() / 30, "month")
    } else {
        plural(delta.num_days() / 365, "year")
    };

    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", value.round())
}

/// Cut to `length` characters, trim, and append "..." when anything was cut
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", text[..cut].trim()),
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Timestamp-plus-random identifier, e.g. "lh3j9k2-a8b9c0d"
pub fn generate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..7)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", to_base36(now.timestamp_millis().max(0) as u64), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_format_dream_date() {
        // Wednesday
        let now = at(2024, 6, 12, 20);
        assert_eq!(format_dream_date(at(2024, 6, 12, 3), now), "Today");
        assert_eq!(format_dream_date(at(2024, 6, 11, 3), now), "Yesterday");
        assert_eq!(format_dream_date(at(2024, 6, 9, 3), now), "Sunday");
        assert_eq!(format_dream_date(at(2024, 6, 8, 3), now), "Jun 8, 2024");
        assert_eq!(format_dream_date(at(2023, 12, 25, 3), now), "Dec 25, 2023");
    }

    #[test]
    fn test_format_relative_time() {
        let now = at(2024, 6, 12, 20);
        assert_eq!(format_relative_time(now, now), "just now");
        assert_eq!(format_relative_time(at(2024, 6, 12, 18), now), "2 hours ago");
        assert_eq!(format_relative_time(at(2024, 6, 11, 20), now), "1 day ago");
        assert_eq!(format_relative_time(at(2024, 6, 15, 20), now), "in 3 days");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(72.5), "73%");
        assert_eq!(format_percentage(0.0), "0%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Long dream description here", 10), "Long dream...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Träume über Wolken", 6), "Träume...");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("lucid dream"), "Lucid dream");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id(at(2024, 6, 12, 20));
        let (stamp, suffix) = id.split_once('-').unwrap();
        assert_eq!(stamp, to_base36(at(2024, 6, 12, 20).timestamp_millis() as u64));
        assert_eq!(suffix.len(), 7);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(generate_id(at(2024, 6, 12, 20)), id);
    }
}
