//! Field classification.
//!
//! Predicates deciding facts about normalized event text relative to a team
//! ("is this an attack by X", "is this a goal by X"). Every predicate is
//! false for unrecognized or empty input and for an empty team name; none of
//! them fail.

mod normalize;
pub mod vocabulary;

use std::sync::OnceLock;

use regex::Regex;

pub use normalize::{normalize, normalize_opt};
pub use vocabulary::{Phase, ResultKind, VOCABULARY_VERSION};

use crate::models::{Event, Side, Zone};
use vocabulary::{
    has_word_prefix, parse_action, parse_result, POSSESSION_PREFIX, POWER_PLAY_PREFIXES,
    SEVEN_METER_TOKEN, SHORT_HANDED_PREFIXES,
};

/// Whether a parsed subject names `team`. Both sides must be normalized.
pub fn subject_is(subject: &str, team: &str) -> bool {
    !team.is_empty() && has_word_prefix(subject, team)
}

pub fn is_placed_attack(action: &str, team: &str) -> bool {
    matches!(parse_action(action), Some((Phase::PlacedAttack, subject)) if subject_is(subject, team))
}

pub fn is_big_space_phase(action: &str, team: &str) -> bool {
    matches!(parse_action(action), Some((Phase::BigSpace, subject)) if subject_is(subject, team))
}

/// Any offensive phase by `team`.
pub fn is_attack_by(action: &str, team: &str) -> bool {
    attack_phase_by(action, team).is_some()
}

pub fn attack_phase_by(action: &str, team: &str) -> Option<Phase> {
    match parse_action(action) {
        Some((phase, subject)) if subject_is(subject, team) => Some(phase),
        _ => None,
    }
}

/// Outcome of `result` when it belongs to `team`.
pub fn outcome_for(result: &str, team: &str) -> Option<ResultKind> {
    match parse_result(result) {
        Some((kind, subject)) if subject_is(subject, team) => Some(kind),
        _ => None,
    }
}

pub fn is_goal_by(result: &str, team: &str) -> bool {
    outcome_for(result, team) == Some(ResultKind::Goal)
}

/// Any shot attempt, goals included.
pub fn is_shot_attempt(result: &str) -> bool {
    parse_result(result).is_some_and(|(kind, _)| kind.is_shot())
}

pub fn is_shot_by(result: &str, team: &str) -> bool {
    outcome_for(result, team).is_some_and(ResultKind::is_shot)
}

pub fn is_turnover_by(result: &str, team: &str) -> bool {
    outcome_for(result, team) == Some(ResultKind::Turnover)
}

/// `team`'s possession was neutralized by the defense.
pub fn is_neutralized(result: &str, team: &str) -> bool {
    outcome_for(result, team) == Some(ResultKind::Neutralized)
}

pub fn is_seven_meter(zone: &str, action: &str) -> bool {
    Zone::parse(zone) == Some(Zone::SevenMeter)
        || action
            .split(|c: char| c.is_whitespace() || c == '-')
            .any(|token| token == SEVEN_METER_TOKEN)
}

pub fn is_power_play(situation: &str) -> bool {
    POWER_PLAY_PREFIXES
        .iter()
        .any(|prefix| has_word_prefix(situation, prefix))
}

pub fn is_short_handed(situation: &str) -> bool {
    SHORT_HANDED_PREFIXES
        .iter()
        .any(|prefix| has_word_prefix(situation, prefix))
}

fn possession_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^{}\s+(.+?)\s*_\s*(.+?)\s*(?:_|$)",
            POSSESSION_PREFIX
        ))
        .expect("possession pattern is valid")
    })
}

/// Split `possession <A> _ <B> _ ...` into `(A, B)`.
pub fn possession_teams(possession: &str) -> Option<(&str, &str)> {
    let caps = possession_regex().captures(possession)?;
    let holder = caps.get(1)?.as_str().trim();
    let other = caps.get(2)?.as_str().trim();
    if holder.is_empty() || other.is_empty() {
        return None;
    }
    Some((holder, other))
}

/// An event with every text field normalized once.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub action: String,
    pub results: [String; 2],
    pub zone_text: String,
    pub zone: Option<Zone>,
    pub possession: String,
    pub situation: String,
    pub timestamp_ms: Option<u64>,
}

impl ClassifiedEvent {
    pub fn new(event: &Event) -> Self {
        let zone_text = normalize(event.zone_label());
        Self {
            action: normalize(event.action()),
            results: [
                normalize(event.result(Side::A)),
                normalize(event.result(Side::B)),
            ],
            zone: Zone::parse(&zone_text),
            zone_text,
            possession: normalize(event.possession_text()),
            situation: normalize(event.situation()),
            timestamp_ms: event.timestamp_ms,
        }
    }

    /// Phase of the event when it is an attack by `team`.
    pub fn attack_phase(&self, team: &str) -> Option<Phase> {
        attack_phase_by(&self.action, team)
    }

    /// Whether the event opens a possession for `team`.
    ///
    /// A phase-tagged action decides. Without one, the possession descriptor's
    /// holder does.
    pub fn is_possession_of(&self, team: &str) -> bool {
        if team.is_empty() {
            return false;
        }
        match parse_action(&self.action) {
            Some((_, subject)) => subject_is(subject, team),
            None => possession_teams(&self.possession)
                .is_some_and(|(holder, _)| subject_is(holder, team)),
        }
    }

    /// First result channel carrying an outcome for `team`.
    pub fn outcome(&self, team: &str) -> Option<ResultKind> {
        self.results.iter().find_map(|r| outcome_for(r, team))
    }

    /// Outcome recorded on one side's channel, whoever it belongs to.
    pub fn channel_outcome(&self, side: Side) -> Option<ResultKind> {
        let idx = match side {
            Side::A => 0,
            Side::B => 1,
        };
        parse_result(&self.results[idx]).map(|(kind, _)| kind)
    }

    pub fn is_seven_meter(&self) -> bool {
        self.zone == Some(Zone::SevenMeter) || is_seven_meter(&self.zone_text, &self.action)
    }

    pub fn is_power_play(&self) -> bool {
        is_power_play(&self.situation)
    }

    pub fn is_short_handed(&self) -> bool {
        is_short_handed(&self.situation)
    }
}
