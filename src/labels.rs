//! Score-to-label bands
//!
//! Each table is evaluated top-down and the first threshold the score reaches
//! wins. Scores below every threshold, including negative or NaN input, land in
//! the fallback band.

const LUCIDITY_BANDS: [(f64, &str); 4] = [
    (90.0, "Full Control"),
    (70.0, "High Awareness"),
    (50.0, "Moderate"),
    (30.0, "Glimpses"),
];
const LUCIDITY_FALLBACK: &str = "Non-Lucid";

const SLEEP_QUALITY_BANDS: [(f64, &str); 4] = [
    (90.0, "Excellent"),
    (70.0, "Good"),
    (50.0, "Fair"),
    (30.0, "Poor"),
];
const SLEEP_QUALITY_FALLBACK: &str = "Very Poor";

fn band(score: f64, table: &[(f64, &'static str)], fallback: &'static str) -> &'static str {
    table
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}

/// Describe a lucidity percentage
pub fn lucidity_level(lucidity: f64) -> &'static str {
    band(lucidity, &LUCIDITY_BANDS, LUCIDITY_FALLBACK)
}

/// Describe a sleep quality score
pub fn sleep_quality_label(quality: f64) -> &'static str {
    band(quality, &SLEEP_QUALITY_BANDS, SLEEP_QUALITY_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lucidity_level() {
        assert_eq!(lucidity_level(92.0), "Full Control");
        assert_eq!(lucidity_level(90.0), "Full Control");
        assert_eq!(lucidity_level(85.0), "High Awareness");
        assert_eq!(lucidity_level(50.0), "Moderate");
        assert_eq!(lucidity_level(45.0), "Glimpses");
        assert_eq!(lucidity_level(29.9), "Non-Lucid");
        assert_eq!(lucidity_level(-5.0), "Non-Lucid");
    }

    #[test]
    fn test_sleep_quality_label() {
        assert_eq!(sleep_quality_label(150.0), "Excellent");
        assert_eq!(sleep_quality_label(88.0), "Good");
        assert_eq!(sleep_quality_label(69.99), "Fair");
        assert_eq!(sleep_quality_label(30.0), "Poor");
        assert_eq!(sleep_quality_label(0.0), "Very Poor");
    }

    #[test]
    fn test_nan_falls_to_lowest_band() {
        assert_eq!(lucidity_level(f64::NAN), "Non-Lucid");
        assert_eq!(sleep_quality_label(f64::NAN), "Very Poor");
    }
}
