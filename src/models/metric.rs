//! Static metric catalog.
//!
//! One table holds every metric's label, counting rules, direction of
//! goodness, color threshold and default objective. Ranking, banding and
//! objective evaluation all read from here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Counter, Stat};

/// Whether a higher or lower value is the better performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Offensive phase a metric is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseTag {
    PlacedAttack,
    BigSpace,
    None,
}

/// Report a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Offensive,
    Defensive,
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "offensive" | "offense" | "attack" => Ok(ReportMode::Offensive),
            "defensive" | "defense" | "defence" => Ok(ReportMode::Defensive),
            other => Err(format!("unknown report mode: {}", other)),
        }
    }
}

/// Catalog key of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    AttackEfficiency,
    PlacedAttackEfficiency,
    BigSpaceEfficiency,
    ShootingEfficiency,
    NonSevenShooting,
    SevenMeterShooting,
    DuelShooting,
    PowerPlayEfficiency,
    ShorthandedEfficiency,
    TurnoverRate,
    NeutralizationRate,
    BigSpaceShare,
    SevenMetersWonRate,
    ExclusionsWonRate,
    DefensiveEfficiency,
    PlacedDefenseEfficiency,
    BigSpaceDefenseEfficiency,
    GoalkeeperSaveRate,
    ForcedTurnoverRate,
    NeutralizationsForced,
    OpponentShooting,
    DuelDefense,
    ShorthandedGoalsConceded,
    GoalsScored,
    GoalsConceded,
    Turnovers,
    Shots,
    Saves,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub slug: &'static str,
    pub label: &'static str,
    pub mode: ReportMode,
    pub phase: PhaseTag,
    pub numerator: Counter,
    /// `None` for plain counts
    pub denominator: Option<Counter>,
    pub direction: Direction,
    /// Percentage the color bands are centred on
    pub threshold: Option<f64>,
    /// Default objective expression
    pub objective: Option<&'static str>,
}

impl MetricDefinition {
    pub fn is_ratio(&self) -> bool {
        self.denominator.is_some()
    }

    pub fn lower_is_better(&self) -> bool {
        self.direction == Direction::LowerIsBetter
    }
}

#[allow(clippy::too_many_arguments)]
const fn ratio(
    key: MetricKey,
    slug: &'static str,
    label: &'static str,
    mode: ReportMode,
    phase: PhaseTag,
    numerator: Counter,
    denominator: Counter,
    direction: Direction,
    threshold: f64,
    objective: Option<&'static str>,
) -> MetricDefinition {
    MetricDefinition {
        key,
        slug,
        label,
        mode,
        phase,
        numerator,
        denominator: Some(denominator),
        direction,
        threshold: Some(threshold),
        objective,
    }
}

const fn count(
    key: MetricKey,
    slug: &'static str,
    label: &'static str,
    mode: ReportMode,
    numerator: Counter,
    direction: Direction,
) -> MetricDefinition {
    MetricDefinition {
        key,
        slug,
        label,
        mode,
        phase: PhaseTag::None,
        numerator,
        denominator: None,
        direction,
        threshold: None,
        objective: None,
    }
}

use Direction::{HigherIsBetter as Higher, LowerIsBetter as Lower};
use MetricKey as K;
use PhaseTag as P;
use ReportMode::{Defensive as Def, Offensive as Off};

/// Every metric, in display order. Indexed by `MetricKey as usize`.
#[rustfmt::skip]
pub static CATALOG: [MetricDefinition; 28] = [
    ratio(K::AttackEfficiency, "attack_efficiency", "Attack efficiency", Off, P::None,
        Counter::own(Stat::Goals), Counter::own(Stat::Possessions), Higher, 50.0, Some(">=50")),
    ratio(K::PlacedAttackEfficiency, "placed_attack_efficiency", "Placed attack efficiency", Off, P::PlacedAttack,
        Counter::own(Stat::PlacedGoals), Counter::own(Stat::PlacedPossessions), Higher, 45.0, Some(">=45")),
    ratio(K::BigSpaceEfficiency, "big_space_efficiency", "Big space efficiency", Off, P::BigSpace,
        Counter::own(Stat::BigSpaceGoals), Counter::own(Stat::BigSpacePossessions), Higher, 65.0, Some(">=65")),
    ratio(K::ShootingEfficiency, "shooting_efficiency", "Shooting efficiency", Off, P::None,
        Counter::own(Stat::Goals), Counter::own(Stat::Shots), Higher, 60.0, Some("60")),
    ratio(K::NonSevenShooting, "non_seven_shooting", "Shooting efficiency (excl. 7m)", Off, P::None,
        Counter::own(Stat::NonSevenGoals), Counter::own(Stat::NonSevenShots), Higher, 58.0, None),
    ratio(K::SevenMeterShooting, "seven_meter_shooting", "7m conversion", Off, P::None,
        Counter::own(Stat::SevenGoals), Counter::own(Stat::SevenShots), Higher, 75.0, Some(">=75")),
    ratio(K::DuelShooting, "duel_shooting", "Duel efficiency", Off, P::None,
        Counter::own(Stat::DuelGoals), Counter::own(Stat::DuelShots), Higher, 65.0, None),
    ratio(K::PowerPlayEfficiency, "power_play_efficiency", "Power play efficiency", Off, P::None,
        Counter::own(Stat::PowerPlayGoals), Counter::own(Stat::PowerPlayPossessions), Higher, 60.0, None),
    ratio(K::ShorthandedEfficiency, "shorthanded_efficiency", "Shorthanded attack efficiency", Off, P::None,
        Counter::own(Stat::ShorthandedGoals), Counter::own(Stat::ShorthandedPossessions), Higher, 30.0, None),
    ratio(K::TurnoverRate, "turnover_rate", "Turnover rate", Off, P::None,
        Counter::own(Stat::Turnovers), Counter::own(Stat::Possessions), Lower, 12.0, Some("<12")),
    ratio(K::NeutralizationRate, "neutralization_rate", "Neutralized possessions", Off, P::None,
        Counter::own(Stat::Neutralized), Counter::own(Stat::Possessions), Lower, 15.0, None),
    ratio(K::BigSpaceShare, "big_space_share", "Big space share", Off, P::BigSpace,
        Counter::own(Stat::BigSpacePossessions), Counter::own(Stat::Possessions), Higher, 20.0, Some("15-30")),
    ratio(K::SevenMetersWonRate, "seven_meters_won_rate", "7m won per possession", Off, P::None,
        Counter::own(Stat::SevenMetersWon), Counter::own(Stat::Possessions), Higher, 5.0, None),
    ratio(K::ExclusionsWonRate, "exclusions_won_rate", "Exclusions won per possession", Off, P::None,
        Counter::own(Stat::ExclusionsWon), Counter::own(Stat::Possessions), Higher, 4.0, None),
    ratio(K::DefensiveEfficiency, "defensive_efficiency", "Defensive efficiency", Def, P::None,
        Counter::opp(Stat::Stops), Counter::opp(Stat::Possessions), Higher, 50.0, Some(">=50")),
    ratio(K::PlacedDefenseEfficiency, "placed_defense_efficiency", "Placed defense efficiency", Def, P::PlacedAttack,
        Counter::opp(Stat::PlacedStops), Counter::opp(Stat::PlacedPossessions), Higher, 55.0, Some(">=55")),
    ratio(K::BigSpaceDefenseEfficiency, "big_space_defense_efficiency", "Big space defense efficiency", Def, P::BigSpace,
        Counter::opp(Stat::BigSpaceStops), Counter::opp(Stat::BigSpacePossessions), Higher, 35.0, None),
    ratio(K::GoalkeeperSaveRate, "goalkeeper_save_rate", "Goalkeeper save rate", Def, P::None,
        Counter::opp(Stat::ShotsSaved), Counter::opp(Stat::OnTarget), Higher, 33.0, Some(">=33")),
    ratio(K::ForcedTurnoverRate, "forced_turnover_rate", "Forced turnovers", Def, P::None,
        Counter::opp(Stat::Turnovers), Counter::opp(Stat::Possessions), Higher, 12.0, None),
    ratio(K::NeutralizationsForced, "neutralizations_forced", "Neutralizations", Def, P::None,
        Counter::opp(Stat::Neutralized), Counter::opp(Stat::Possessions), Higher, 15.0, None),
    ratio(K::OpponentShooting, "opponent_shooting", "Opponent shooting efficiency", Def, P::None,
        Counter::opp(Stat::Goals), Counter::opp(Stat::Shots), Lower, 60.0, Some("<=60")),
    ratio(K::DuelDefense, "duel_defense", "Duels conceded", Def, P::None,
        Counter::opp(Stat::DuelGoals), Counter::opp(Stat::DuelShots), Lower, 65.0, None),
    ratio(K::ShorthandedGoalsConceded, "shorthanded_goals_conceded", "Goals conceded shorthanded", Def, P::None,
        Counter::opp(Stat::PowerPlayGoals), Counter::opp(Stat::PowerPlayPossessions), Lower, 60.0, None),
    count(K::GoalsScored, "goals_scored", "Goals scored", Off, Counter::own(Stat::Goals), Higher),
    count(K::GoalsConceded, "goals_conceded", "Goals conceded", Def, Counter::opp(Stat::Goals), Lower),
    count(K::Turnovers, "turnovers", "Turnovers", Off, Counter::own(Stat::Turnovers), Lower),
    count(K::Shots, "shots", "Shots", Off, Counter::own(Stat::Shots), Higher),
    count(K::Saves, "saves", "Goalkeeper saves", Def, Counter::opp(Stat::ShotsSaved), Higher),
];

impl MetricKey {
    pub fn definition(self) -> &'static MetricDefinition {
        &CATALOG[self as usize]
    }

    pub fn slug(self) -> &'static str {
        self.definition().slug
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    pub fn direction(self) -> Direction {
        self.definition().direction
    }

    /// Look a metric up by slug; case, accents and `-`/space separators are ignored.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let wanted = crate::classify::normalize(slug).replace(['-', ' '], "_");
        CATALOG.iter().find(|d| d.slug == wanted).map(|d| d.key)
    }

    /// All keys in catalog order.
    pub fn all() -> impl Iterator<Item = MetricKey> {
        CATALOG.iter().map(|d| d.key)
    }

    /// Ratio metrics shown as gauges for a report mode, in catalog order.
    pub fn gauges_for(mode: ReportMode) -> impl Iterator<Item = MetricKey> {
        CATALOG
            .iter()
            .filter(move |d| d.mode == mode && d.is_ratio())
            .map(|d| d.key)
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::from_slug(s).ok_or_else(|| format!("unknown metric: {}", s))
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indexed_by_key() {
        for (i, def) in CATALOG.iter().enumerate() {
            assert_eq!(def.key as usize, i, "catalog out of order at {}", def.slug);
            assert_eq!(def.key.definition().slug, def.slug);
        }
    }

    #[test]
    fn test_slugs_match_serde_names() {
        for def in CATALOG.iter() {
            let json = serde_json::to_string(&def.key).unwrap();
            assert_eq!(json, format!("\"{}\"", def.slug));
        }
    }

    #[test]
    fn test_ratio_metrics_have_thresholds() {
        for def in CATALOG.iter().filter(|d| d.is_ratio()) {
            assert!(def.threshold.is_some(), "{} lacks a threshold", def.slug);
        }
    }

    #[test]
    fn test_lower_is_better_set() {
        let lower: Vec<_> = CATALOG
            .iter()
            .filter(|d| d.lower_is_better())
            .map(|d| d.key)
            .collect();
        assert!(lower.contains(&MetricKey::Turnovers));
        assert!(lower.contains(&MetricKey::GoalsConceded));
        assert!(lower.contains(&MetricKey::TurnoverRate));
        assert!(!lower.contains(&MetricKey::GoalsScored));
    }

    #[test]
    fn test_from_slug() {
        assert_eq!(MetricKey::from_slug("turnovers"), Some(MetricKey::Turnovers));
        assert_eq!(
            MetricKey::from_slug("Goals-Scored"),
            Some(MetricKey::GoalsScored)
        );
        assert_eq!(MetricKey::from_slug("nope"), None);
        assert!("goalkeeper_save_rate".parse::<MetricKey>().is_ok());
    }

    #[test]
    fn test_gauges_for_mode() {
        let offensive: Vec<_> = MetricKey::gauges_for(ReportMode::Offensive).collect();
        assert_eq!(offensive.first(), Some(&MetricKey::AttackEfficiency));
        assert!(!offensive.contains(&MetricKey::GoalsScored));
        assert!(!offensive.contains(&MetricKey::DefensiveEfficiency));

        let defensive: Vec<_> = MetricKey::gauges_for(ReportMode::Defensive).collect();
        assert!(defensive.contains(&MetricKey::GoalkeeperSaveRate));
    }

    #[test]
    fn test_report_mode_from_str() {
        assert_eq!("Offensive".parse::<ReportMode>(), Ok(ReportMode::Offensive));
        assert_eq!("defence".parse::<ReportMode>(), Ok(ReportMode::Defensive));
        assert!("sideways".parse::<ReportMode>().is_err());
    }
}
