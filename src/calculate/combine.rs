//! Cross-match combination of ratio buckets into gauges.
//!
//! One contributing match: its raw ratio and raw counts pass through.
//! Several: the gauge is the mean of the per-match percentages over the
//! matches that had at least one opportunity. Raw counts are never pooled.

use std::collections::{BTreeMap, HashSet};

use super::{band_for, mean, round1, AggregateBucket, DEFAULT_BAND_MARGIN};
use crate::models::{Gauge, MatchId, MetricKey};

/// Combine buckets into one gauge per metric, in catalog order.
pub fn combine(buckets: &[AggregateBucket]) -> Vec<Gauge> {
    combine_with_margin(buckets, DEFAULT_BAND_MARGIN)
}

/// [`combine`] with an explicit color band margin.
pub fn combine_with_margin(buckets: &[AggregateBucket], band_margin: f64) -> Vec<Gauge> {
    let mut by_metric: BTreeMap<MetricKey, Vec<&AggregateBucket>> = BTreeMap::new();
    for bucket in buckets {
        by_metric.entry(bucket.metric).or_default().push(bucket);
    }

    let contributing = contributing_matches(buckets);

    by_metric
        .into_iter()
        .map(|(key, metric_buckets)| {
            let mut gauge = if contributing.len() > 1 {
                averaged_gauge(key, &metric_buckets)
            } else {
                single_match_gauge(key, &metric_buckets, contributing.first().copied())
            };
            if gauge.has_opportunities() {
                gauge.color_band = band_for(key, gauge.percentage, band_margin);
            }
            gauge
        })
        .collect()
}

/// Distinct matches with at least one non-empty bucket, in first-seen order.
fn contributing_matches(buckets: &[AggregateBucket]) -> Vec<&MatchId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for bucket in buckets {
        if bucket.has_opportunities() && seen.insert(&bucket.match_id) {
            ids.push(&bucket.match_id);
        }
    }
    ids
}

fn single_match_gauge(
    key: MetricKey,
    buckets: &[&AggregateBucket],
    match_id: Option<&MatchId>,
) -> Gauge {
    let bucket = match match_id {
        Some(id) => buckets.iter().find(|b| &b.match_id == id),
        None => buckets.first(),
    };

    let Some(bucket) = bucket else {
        return Gauge::empty(key);
    };

    let mut gauge = Gauge::empty(key);
    gauge.percentage = bucket.percentage();
    gauge.display_count = format!("{}/{}", bucket.numerator, bucket.denominator);
    gauge.numerator = bucket.numerator as f64;
    gauge.denominator = bucket.denominator as f64;
    gauge.matches = u32::from(bucket.has_opportunities());
    gauge
}

fn averaged_gauge(key: MetricKey, buckets: &[&AggregateBucket]) -> Gauge {
    let included: Vec<&&AggregateBucket> =
        buckets.iter().filter(|b| b.has_opportunities()).collect();
    if included.is_empty() {
        return Gauge::empty(key);
    }

    let percentages: Vec<f64> = included.iter().map(|b| b.percentage()).collect();
    let numerators: Vec<f64> = included.iter().map(|b| b.numerator as f64).collect();
    let denominators: Vec<f64> = included.iter().map(|b| b.denominator as f64).collect();

    let mean_numerator = mean(&numerators);
    let mean_denominator = mean(&denominators);

    let mut gauge = Gauge::empty(key);
    gauge.percentage = mean(&percentages);
    gauge.numerator = mean_numerator;
    gauge.denominator = mean_denominator;
    gauge.display_count = format!(
        "{:.1}/{:.1}",
        round1(mean_numerator),
        round1(mean_denominator)
    );
    gauge.matches = included.len() as u32;
    gauge
}
