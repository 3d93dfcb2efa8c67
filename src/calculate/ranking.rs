//! Ranking of single-match performances.
//!
//! Rows are (team, match) pairs carrying that match's raw counters. Values
//! are never averaged across matches: a ranking answers "which single
//! performance was best".

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::models::{Direction, MatchCounts, MatchId, MetricKey};

/// One team's performance in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub match_id: MatchId,
    pub match_label: String,
    /// Team name for display
    pub team: String,
    pub opponent: String,
    pub logo: Option<String>,
    pub round: Option<u32>,
    pub date: Option<NaiveDate>,
    pub counts: MatchCounts,
}

/// A ranked row with the value it was ranked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// 1-based position
    pub position: usize,
    pub criterion: MetricKey,
    /// `None` when the row had no opportunity for a ratio metric
    pub value: Option<f64>,
    pub display_count: String,
    pub row: RankingRow,
}

/// Value of a metric for one match. Ratios with a zero denominator have
/// no value.
pub fn metric_value(key: MetricKey, counts: &MatchCounts) -> Option<f64> {
    let def = key.definition();
    let numerator = def.numerator.read(counts);
    match def.denominator {
        Some(denominator) => {
            let denominator = denominator.read(counts);
            (denominator > 0).then(|| percentage(numerator, denominator))
        }
        None => Some(numerator as f64),
    }
}

fn display_count(key: MetricKey, counts: &MatchCounts) -> String {
    let def = key.definition();
    let numerator = def.numerator.read(counts);
    match def.denominator {
        Some(denominator) => format!("{}/{}", numerator, denominator.read(counts)),
        None => numerator.to_string(),
    }
}

/// Order two values best first. Missing values sort last in either direction.
fn compare(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                Direction::HigherIsBetter => ord.reverse(),
                Direction::LowerIsBetter => ord,
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank rows by `criterion`, best first. Ties keep input order.
pub fn rank(rows: &[RankingRow], criterion: MetricKey) -> Vec<RankedRow> {
    let direction = criterion.direction();
    let mut valued: Vec<(Option<f64>, &RankingRow)> = rows
        .iter()
        .map(|row| (metric_value(criterion, &row.counts), row))
        .collect();

    // sort_by is stable
    valued.sort_by(|a, b| compare(a.0, b.0, direction));

    valued
        .into_iter()
        .enumerate()
        .map(|(i, (value, row))| RankedRow {
            position: i + 1,
            criterion,
            value,
            display_count: display_count(criterion, &row.counts),
            row: row.clone(),
        })
        .collect()
}

/// The best `limit` rows.
pub fn top_n(rows: &[RankingRow], criterion: MetricKey, limit: usize) -> Vec<RankedRow> {
    let mut ranked = rank(rows, criterion);
    ranked.truncate(limit);
    ranked
}
