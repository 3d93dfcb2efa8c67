//! Score progression over fixed time windows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::{ClassifiedEvent, ResultKind};

/// Default window length: 10 minutes.
pub const DEFAULT_WINDOW_MS: u64 = 10 * 60 * 1000;

/// Shortest window accepted; shorter ones are widened to this.
pub const MIN_WINDOW_MS: u64 = 60 * 1000;

/// Goals timed past this point are left off the timeline.
pub const MAX_MATCH_MS: u64 = 24 * 60 * 60 * 1000;

/// Goals scored and conceded within one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    pub start_ms: u64,
    pub end_ms: u64,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TimelineWindow {
    pub fn differential(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

/// Goals for `team` and `opponent` bucketed by `window_ms`.
///
/// Untimed goals and goals timed beyond [`MAX_MATCH_MS`] are skipped.
/// Windows are contiguous from zero up to the window of the last goal, so
/// quiet spells show as zeros. Timestamps need not be sorted.
pub fn timeline(
    events: &[ClassifiedEvent],
    team: &str,
    opponent: &str,
    window_ms: u64,
) -> Vec<TimelineWindow> {
    let window_ms = match window_ms {
        0 => DEFAULT_WINDOW_MS,
        ms => ms.max(MIN_WINDOW_MS),
    };

    let mut buckets: BTreeMap<u64, (u32, u32)> = BTreeMap::new();
    for event in events {
        let Some(ts) = event.timestamp_ms else {
            continue;
        };
        let scored = event.outcome(team) == Some(ResultKind::Goal);
        let conceded = event.outcome(opponent) == Some(ResultKind::Goal);
        if !scored && !conceded {
            continue;
        }
        if ts > MAX_MATCH_MS {
            warn!("Goal at {} ms is past the end of any match, left off the timeline", ts);
            continue;
        }

        let slot = buckets.entry(ts / window_ms).or_default();
        if scored {
            slot.0 += 1;
        }
        if conceded {
            slot.1 += 1;
        }
    }

    let Some(&last) = buckets.keys().next_back() else {
        return Vec::new();
    };

    (0..=last)
        .map(|idx| {
            let (goals_for, goals_against) = buckets.get(&idx).copied().unwrap_or_default();
            TimelineWindow {
                start_ms: idx.saturating_mul(window_ms),
                end_ms: idx.saturating_add(1).saturating_mul(window_ms),
                goals_for,
                goals_against,
            }
        })
        .collect()
}

/// Sum of two timelines window by window. Both must use the same window.
pub fn merge_timelines(into: &mut Vec<TimelineWindow>, other: &[TimelineWindow]) {
    for (i, window) in other.iter().enumerate() {
        match into.get_mut(i) {
            Some(existing) => {
                existing.goals_for += window.goals_for;
                existing.goals_against += window.goals_against;
            }
            None => into.push(*window),
        }
    }
}
