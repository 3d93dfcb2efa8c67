//! Raw per-match counters.

use serde::{Deserialize, Serialize};

/// Counters for one attacking side over one match.
///
/// Defensive figures for a team are the attacking counters of its opponent,
/// so a match is fully described by one `SideCounts` per team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCounts {
    pub possessions: u32,
    pub placed_possessions: u32,
    pub big_space_possessions: u32,
    pub shots: u32,
    pub goals: u32,
    pub placed_goals: u32,
    pub big_space_goals: u32,
    pub non_seven_shots: u32,
    pub non_seven_goals: u32,
    pub seven_shots: u32,
    pub seven_goals: u32,
    pub shots_saved: u32,
    pub shots_wide: u32,
    pub shots_blocked: u32,
    pub turnovers: u32,
    pub neutralized: u32,
    pub seven_meters_won: u32,
    pub exclusions_won: u32,
    pub power_play_possessions: u32,
    pub power_play_goals: u32,
    pub shorthanded_possessions: u32,
    pub shorthanded_goals: u32,
    pub duel_shots: u32,
    pub duel_goals: u32,
}

impl SideCounts {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Read one statistic.
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Possessions => self.possessions,
            Stat::PlacedPossessions => self.placed_possessions,
            Stat::BigSpacePossessions => self.big_space_possessions,
            Stat::Shots => self.shots,
            Stat::Goals => self.goals,
            Stat::PlacedGoals => self.placed_goals,
            Stat::BigSpaceGoals => self.big_space_goals,
            Stat::NonSevenShots => self.non_seven_shots,
            Stat::NonSevenGoals => self.non_seven_goals,
            Stat::SevenShots => self.seven_shots,
            Stat::SevenGoals => self.seven_goals,
            Stat::ShotsSaved => self.shots_saved,
            Stat::OnTarget => self.goals + self.shots_saved,
            Stat::Turnovers => self.turnovers,
            Stat::Neutralized => self.neutralized,
            Stat::SevenMetersWon => self.seven_meters_won,
            Stat::ExclusionsWon => self.exclusions_won,
            Stat::PowerPlayPossessions => self.power_play_possessions,
            Stat::PowerPlayGoals => self.power_play_goals,
            Stat::ShorthandedPossessions => self.shorthanded_possessions,
            Stat::ShorthandedGoals => self.shorthanded_goals,
            Stat::DuelShots => self.duel_shots,
            Stat::DuelGoals => self.duel_goals,
            Stat::Stops => self.possessions.saturating_sub(self.goals),
            Stat::PlacedStops => self.placed_possessions.saturating_sub(self.placed_goals),
            Stat::BigSpaceStops => self
                .big_space_possessions
                .saturating_sub(self.big_space_goals),
        }
    }
}

/// A statistic readable from [`SideCounts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Possessions,
    PlacedPossessions,
    BigSpacePossessions,
    Shots,
    Goals,
    PlacedGoals,
    BigSpaceGoals,
    NonSevenShots,
    NonSevenGoals,
    SevenShots,
    SevenGoals,
    ShotsSaved,
    /// Goals plus saved shots
    OnTarget,
    Turnovers,
    Neutralized,
    SevenMetersWon,
    ExclusionsWon,
    PowerPlayPossessions,
    PowerPlayGoals,
    ShorthandedPossessions,
    ShorthandedGoals,
    DuelShots,
    DuelGoals,
    /// Possessions that did not end in a goal
    Stops,
    PlacedStops,
    BigSpaceStops,
}

/// Whose attacking counters a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Own,
    Opponent,
}

/// A numerator or denominator rule of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counter {
    pub perspective: Perspective,
    pub stat: Stat,
}

impl Counter {
    pub const fn own(stat: Stat) -> Self {
        Self {
            perspective: Perspective::Own,
            stat,
        }
    }

    pub const fn opp(stat: Stat) -> Self {
        Self {
            perspective: Perspective::Opponent,
            stat,
        }
    }

    pub fn read(&self, counts: &MatchCounts) -> u32 {
        match self.perspective {
            Perspective::Own => counts.team.get(self.stat),
            Perspective::Opponent => counts.opponent.get(self.stat),
        }
    }
}

/// Both sides' counters for one match, seen from `team`'s perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub team: SideCounts,
    pub opponent: SideCounts,
}

impl MatchCounts {
    /// The same match seen from the other side.
    pub fn mirrored(&self) -> Self {
        Self {
            team: self.opponent,
            opponent: self.team,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.team.is_empty() && self.opponent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_stats() {
        let side = SideCounts {
            possessions: 30,
            goals: 14,
            shots_saved: 8,
            placed_possessions: 20,
            placed_goals: 8,
            ..Default::default()
        };

        assert_eq!(side.get(Stat::Stops), 16);
        assert_eq!(side.get(Stat::OnTarget), 22);
        assert_eq!(side.get(Stat::PlacedStops), 12);
    }

    #[test]
    fn test_stops_never_underflow() {
        let side = SideCounts {
            possessions: 2,
            goals: 5,
            ..Default::default()
        };
        assert_eq!(side.get(Stat::Stops), 0);
    }

    #[test]
    fn test_counter_perspective_and_mirror() {
        let counts = MatchCounts {
            team: SideCounts {
                goals: 30,
                ..Default::default()
            },
            opponent: SideCounts {
                goals: 25,
                ..Default::default()
            },
        };

        assert_eq!(Counter::own(Stat::Goals).read(&counts), 30);
        assert_eq!(Counter::opp(Stat::Goals).read(&counts), 25);
        assert_eq!(Counter::own(Stat::Goals).read(&counts.mirrored()), 25);
    }
}
