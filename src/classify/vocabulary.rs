//! Recognized action and result vocabulary.
//!
//! Event text is a tiny grammar: a known prefix followed by the team the
//! action or outcome belongs to, e.g. `contre-attaque limoges` or
//! `tir arrete usdk`. All entries are in normalized form.

use serde::{Deserialize, Serialize};

/// Bumped whenever a prefix is added, removed or reinterpreted.
pub const VOCABULARY_VERSION: u32 = 1;

/// Offensive phase named by an action string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PlacedAttack,
    BigSpace,
}

/// Big space phase prefixes: counter-attack, fast engagement, ball advance,
/// transition.
pub const BIG_SPACE_PREFIXES: &[&str] = &[
    "contre-attaque",
    "contre attaque",
    "engagement rapide",
    "montee de balle",
    "transition",
];

pub const PLACED_ATTACK_PREFIX: &str = "attaque";

/// Outcome named by a result string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Goal,
    ShotWide,
    ShotSaved,
    ShotBlocked,
    Turnover,
    Neutralized,
    SevenMeterWon,
    ExclusionWon,
}

impl ResultKind {
    /// Goals are shot attempts too.
    pub fn is_shot(self) -> bool {
        matches!(
            self,
            ResultKind::Goal | ResultKind::ShotWide | ResultKind::ShotSaved | ResultKind::ShotBlocked
        )
    }
}

/// Result prefixes. Longer prefixes sharing a stem come first.
pub const RESULT_PREFIXES: &[(&str, ResultKind)] = &[
    ("but", ResultKind::Goal),
    ("tir hors cadre", ResultKind::ShotWide),
    ("tir arrete", ResultKind::ShotSaved),
    ("tir contre", ResultKind::ShotBlocked),
    ("perte de balle", ResultKind::Turnover),
    ("neutralisation", ResultKind::Neutralized),
    ("7m obtenu", ResultKind::SevenMeterWon),
    ("2min obtenu", ResultKind::ExclusionWon),
    ("2 min obtenu", ResultKind::ExclusionWon),
];

pub const POSSESSION_PREFIX: &str = "possession";

/// Numeric situation prefixes, relative to the attacking side.
pub const POWER_PLAY_PREFIXES: &[&str] = &["superiorite", "sup"];
pub const SHORT_HANDED_PREFIXES: &[&str] = &["inferiorite", "inf"];

pub const SEVEN_METER_TOKEN: &str = "7m";

/// Strip `prefix` from `text` when it is followed by a space, returning the
/// trimmed remainder. The remainder must be non-empty.
pub fn strip_word_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?.strip_prefix(' ')?.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Whether `text` equals `prefix` or starts with it followed by a space.
pub fn has_word_prefix(text: &str, prefix: &str) -> bool {
    text == prefix
        || text
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(' '))
}

/// Split a normalized action into its phase and subject team.
pub fn parse_action(action: &str) -> Option<(Phase, &str)> {
    for prefix in BIG_SPACE_PREFIXES {
        if let Some(subject) = strip_word_prefix(action, prefix) {
            return Some((Phase::BigSpace, subject));
        }
    }
    strip_word_prefix(action, PLACED_ATTACK_PREFIX).map(|subject| (Phase::PlacedAttack, subject))
}

/// Split a normalized result into its outcome and subject team.
pub fn parse_result(result: &str) -> Option<(ResultKind, &str)> {
    RESULT_PREFIXES
        .iter()
        .find_map(|(prefix, kind)| strip_word_prefix(result, prefix).map(|subject| (*kind, subject)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("attaque usdk"), Some((Phase::PlacedAttack, "usdk")));
        assert_eq!(
            parse_action("contre-attaque paris sg"),
            Some((Phase::BigSpace, "paris sg"))
        );
        assert_eq!(
            parse_action("montee de balle limoges"),
            Some((Phase::BigSpace, "limoges"))
        );
        assert_eq!(parse_action("attaque"), None);
        assert_eq!(parse_action("attaques usdk"), None);
        assert_eq!(parse_action("defense usdk"), None);
    }

    #[test]
    fn test_parse_result() {
        assert_eq!(parse_result("but usdk"), Some((ResultKind::Goal, "usdk")));
        assert_eq!(
            parse_result("tir hors cadre limoges"),
            Some((ResultKind::ShotWide, "limoges"))
        );
        assert_eq!(
            parse_result("2 min obtenu nantes"),
            Some((ResultKind::ExclusionWon, "nantes"))
        );
        assert_eq!(parse_result("butee usdk"), None);
        assert_eq!(parse_result(""), None);
    }

    #[test]
    fn test_goal_is_shot() {
        assert!(ResultKind::Goal.is_shot());
        assert!(ResultKind::ShotBlocked.is_shot());
        assert!(!ResultKind::Turnover.is_shot());
        assert!(!ResultKind::SevenMeterWon.is_shot());
    }

    #[test]
    fn test_word_prefix() {
        assert!(has_word_prefix("sup", "sup"));
        assert!(has_word_prefix("sup numerique", "sup"));
        assert!(!has_word_prefix("super", "sup"));
        assert_eq!(strip_word_prefix("but  ", "but"), None);
    }
}
