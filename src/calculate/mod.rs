//! Metric calculation engine.
//!
//! Computes derived metrics from classified match events:
//! - Per-match raw counters and ratio buckets
//! - Single-match and cross-match gauges
//! - Objective checks and color bands
//! - Rankings of single performances
//! - Zone maps, player reports and score timelines

pub mod aggregate;
pub mod banding;
pub mod combine;
pub mod objective;
pub mod players;
pub mod ranking;
pub mod timeline;
pub mod zones;

pub use aggregate::{aggregate, buckets_from_counts, count_match, AggregateBucket};
pub use banding::{band, band_for, DEFAULT_BAND_MARGIN};
pub use combine::{combine, combine_with_margin};
pub use objective::{evaluate, Objective, ObjectiveError};
pub use ranking::{metric_value, rank, top_n, RankedRow, RankingRow};

/// `numerator / denominator` as a percentage clamped to [0, 100].
/// A zero denominator yields 0.
pub fn percentage(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        clamp_percentage(numerator as f64 * 100.0 / denominator as f64)
    }
}

/// Clamp to [0, 100]; NaN becomes 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
