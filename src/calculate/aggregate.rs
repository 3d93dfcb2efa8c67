//! Per-match aggregation.
//!
//! Walks one match's events once and accumulates raw counters for both
//! sides, then turns them into one ratio bucket per catalog metric.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::percentage;
use crate::classify::{ClassifiedEvent, Phase, ResultKind};
use crate::models::{MatchCounts, MatchId, MetricKey, SideCounts, Zone, CATALOG};

/// Numerator and denominator of one metric for one team in one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub match_id: MatchId,
    pub team: String,
    pub metric: MetricKey,
    pub numerator: u32,
    pub denominator: u32,
}

impl AggregateBucket {
    /// Ratio as a clamped percentage; 0 when there was no opportunity.
    pub fn percentage(&self) -> f64 {
        percentage(self.numerator, self.denominator)
    }

    pub fn has_opportunities(&self) -> bool {
        self.denominator > 0
    }
}

/// Count both sides of a match in a single pass.
///
/// An empty team name leaves its side at zero.
pub fn count_match(events: &[ClassifiedEvent], team: &str, opponent: &str) -> MatchCounts {
    let mut counts = MatchCounts::default();
    for event in events {
        accumulate(&mut counts.team, event, team);
        accumulate(&mut counts.opponent, event, opponent);
    }
    counts
}

/// Ratio buckets for every catalog ratio metric, seen from `team`.
pub fn aggregate(
    match_id: &MatchId,
    events: &[ClassifiedEvent],
    team: &str,
    opponent: &str,
) -> Vec<AggregateBucket> {
    let counts = count_match(events, team, opponent);
    debug!(
        "Match {}: {} possessions / {} goals for {:?}, {} / {} for {:?}",
        match_id,
        counts.team.possessions,
        counts.team.goals,
        team,
        counts.opponent.possessions,
        counts.opponent.goals,
        opponent
    );
    buckets_from_counts(match_id, team, &counts)
}

/// Turn counters into ratio buckets, in catalog order.
pub fn buckets_from_counts(
    match_id: &MatchId,
    team: &str,
    counts: &MatchCounts,
) -> Vec<AggregateBucket> {
    CATALOG
        .iter()
        .filter_map(|def| {
            let denominator = def.denominator?;
            Some(AggregateBucket {
                match_id: match_id.clone(),
                team: team.to_string(),
                metric: def.key,
                numerator: def.numerator.read(counts),
                denominator: denominator.read(counts),
            })
        })
        .collect()
}

fn accumulate(side: &mut SideCounts, event: &ClassifiedEvent, team: &str) {
    if team.is_empty() {
        return;
    }

    let phase = event.attack_phase(team);
    let power_play = event.is_power_play();
    let short_handed = event.is_short_handed();

    if event.is_possession_of(team) {
        side.possessions += 1;
        match phase {
            Some(Phase::PlacedAttack) => side.placed_possessions += 1,
            Some(Phase::BigSpace) => side.big_space_possessions += 1,
            None => {}
        }
        if power_play {
            side.power_play_possessions += 1;
        }
        if short_handed {
            side.shorthanded_possessions += 1;
        }
    }

    let Some(outcome) = event.outcome(team) else {
        return;
    };

    if outcome.is_shot() {
        let seven = event.is_seven_meter();
        let duel = !seven && event.zone.is_some_and(Zone::is_duel);

        side.shots += 1;
        if seven {
            side.seven_shots += 1;
        } else {
            side.non_seven_shots += 1;
        }
        if duel {
            side.duel_shots += 1;
        }

        match outcome {
            ResultKind::Goal => {
                side.goals += 1;
                if seven {
                    side.seven_goals += 1;
                } else {
                    side.non_seven_goals += 1;
                }
                match phase {
                    Some(Phase::PlacedAttack) => side.placed_goals += 1,
                    Some(Phase::BigSpace) => side.big_space_goals += 1,
                    None => {}
                }
                if power_play {
                    side.power_play_goals += 1;
                }
                if short_handed {
                    side.shorthanded_goals += 1;
                }
                if duel {
                    side.duel_goals += 1;
                }
            }
            ResultKind::ShotSaved => side.shots_saved += 1,
            ResultKind::ShotWide => side.shots_wide += 1,
            ResultKind::ShotBlocked => side.shots_blocked += 1,
            _ => {}
        }
        return;
    }

    match outcome {
        ResultKind::Turnover => side.turnovers += 1,
        ResultKind::Neutralized => side.neutralized += 1,
        ResultKind::SevenMeterWon => side.seven_meters_won += 1,
        ResultKind::ExclusionWon => side.exclusions_won += 1,
        _ => {}
    }
}
