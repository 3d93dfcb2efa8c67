//! Team resolution.
//!
//! Decides, per match, which two team names event text is attributed to.
//! Declared names win; otherwise the names are voted on by frequency over
//! the team tokens found in the event stream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::vocabulary::{parse_action, parse_result};
use crate::classify::{normalize, possession_teams, ClassifiedEvent};
use crate::models::Confidence;

/// Default fraction of the winner's count within which the runner-up makes
/// the vote ambiguous.
pub const DEFAULT_LOW_CONFIDENCE_MARGIN: f64 = 0.1;

/// Minimum number of votes for an inferred pair to rate above medium.
const CLEAR_VOTE_SAMPLE: u32 = 10;

/// Resolved team pair for one match. Names are normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResolution {
    pub team: String,
    pub opponent: String,
    pub confidence: Confidence,
    /// Whether the names came from match metadata
    pub declared: bool,
    /// Vote count per candidate token, in first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<(String, u32)>,
}

impl TeamResolution {
    /// No team could be identified.
    pub fn unresolved() -> Self {
        Self {
            team: String::new(),
            opponent: String::new(),
            confidence: Confidence::Low,
            declared: false,
            votes: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.team.is_empty()
    }

    /// The same pair from the opponent's perspective.
    pub fn swapped(&self) -> Self {
        Self {
            team: self.opponent.clone(),
            opponent: self.team.clone(),
            ..self.clone()
        }
    }

    /// Whether `name` designates one of the two teams, and which.
    pub fn side_of(&self, name: &str) -> Option<TeamSide> {
        let name = normalize(name);
        if name.is_empty() {
            None
        } else if name == self.team {
            Some(TeamSide::Team)
        } else if name == self.opponent {
            Some(TeamSide::Opponent)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Team,
    Opponent,
}

/// Frequency tally preserving first-seen order for stable tie-breaks.
#[derive(Debug, Default)]
struct Tally {
    order: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn vote(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        match self.index.get(token) {
            Some(&idx) => self.order[idx].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.order.len());
                self.order.push((token.to_string(), 1));
            }
        }
    }

    /// Most voted token not equal to `exclude`; earliest seen wins ties.
    fn leader(&self, exclude: Option<&str>) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (token, count) in &self.order {
            if Some(token.as_str()) == exclude {
                continue;
            }
            if best.map_or(true, |(_, c)| *count > c) {
                best = Some((token.as_str(), *count));
            }
        }
        best
    }

    fn count(&self, token: &str) -> u32 {
        self.index.get(token).map(|&i| self.order[i].1).unwrap_or(0)
    }
}

/// Team resolver with a configurable ambiguity margin.
#[derive(Debug, Clone, Copy)]
pub struct TeamResolver {
    low_confidence_margin: f64,
}

impl Default for TeamResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_CONFIDENCE_MARGIN)
    }
}

impl TeamResolver {
    pub fn new(low_confidence_margin: f64) -> Self {
        Self {
            low_confidence_margin: low_confidence_margin.clamp(0.0, 1.0),
        }
    }

    /// Resolve the two teams of a match.
    pub fn resolve(
        &self,
        events: &[ClassifiedEvent],
        declared_home: Option<&str>,
        declared_away: Option<&str>,
    ) -> TeamResolution {
        let home = declared_home.map(normalize).filter(|s| !s.is_empty());
        let away = declared_away.map(normalize).filter(|s| !s.is_empty());

        if let (Some(team), Some(opponent)) = (&home, &away) {
            return TeamResolution {
                team: team.clone(),
                opponent: opponent.clone(),
                confidence: Confidence::High,
                declared: true,
                votes: Vec::new(),
            };
        }

        let tally = tally_candidates(events);
        let declared = home.or(away);

        let resolution = match declared {
            Some(team) => {
                let opponent = tally
                    .leader(Some(team.as_str()))
                    .map(|(t, _)| t.to_string())
                    .unwrap_or_default();
                let confidence = if opponent.is_empty() {
                    Confidence::Low
                } else {
                    Confidence::Medium
                };
                TeamResolution {
                    team,
                    opponent,
                    confidence,
                    declared: true,
                    votes: tally.order.clone(),
                }
            }
            None => {
                let Some((team, team_votes)) = tally.leader(None) else {
                    debug!("No team candidates in {} events", events.len());
                    return TeamResolution::unresolved();
                };
                let runner_up = tally.leader(Some(team));
                let confidence = self.vote_confidence(team_votes, runner_up.map(|(_, c)| c));
                TeamResolution {
                    team: team.to_string(),
                    opponent: runner_up.map(|(t, _)| t.to_string()).unwrap_or_default(),
                    confidence,
                    declared: false,
                    votes: tally.order.clone(),
                }
            }
        };

        debug!(
            "Resolved teams {:?} vs {:?} ({} confidence, team votes {})",
            resolution.team,
            resolution.opponent,
            resolution.confidence,
            tally.count(&resolution.team)
        );
        resolution
    }

    fn vote_confidence(&self, team_votes: u32, runner_up: Option<u32>) -> Confidence {
        let Some(runner_up) = runner_up else {
            return Confidence::Low;
        };
        let gap = team_votes.saturating_sub(runner_up) as f64;
        if gap <= team_votes as f64 * self.low_confidence_margin {
            Confidence::Low
        } else if team_votes + runner_up >= CLEAR_VOTE_SAMPLE {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}

/// Resolve with the default margin.
pub fn resolve_teams(
    events: &[ClassifiedEvent],
    declared_home: Option<&str>,
    declared_away: Option<&str>,
) -> TeamResolution {
    TeamResolver::default().resolve(events, declared_home, declared_away)
}

/// Vote for every team token named by phase actions, possession descriptors
/// and result strings, in scan order.
fn tally_candidates(events: &[ClassifiedEvent]) -> Tally {
    let mut tally = Tally::default();
    for event in events {
        if let Some((_, subject)) = parse_action(&event.action) {
            tally.vote(subject);
        }
        if let Some((holder, other)) = possession_teams(&event.possession) {
            tally.vote(holder);
            tally.vote(other);
        }
        for result in &event.results {
            if let Some((_, subject)) = parse_result(result) {
                tally.vote(subject);
            }
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;
    use pretty_assertions::assert_eq;

    fn classify(events: Vec<Event>) -> Vec<ClassifiedEvent> {
        events.iter().map(ClassifiedEvent::new).collect()
    }

    fn attacks(team: &str, n: usize) -> Vec<Event> {
        (0..n)
            .map(|_| Event::new("m1").with_action(&format!("attaque {}", team)))
            .collect()
    }

    #[test]
    fn test_declared_names_returned_normalized() {
        let resolution = resolve_teams(&[], Some("  USDK "), Some("Limoges Handball"));
        assert_eq!(resolution.team, "usdk");
        assert_eq!(resolution.opponent, "limoges handball");
        assert_eq!(resolution.confidence, Confidence::High);
        assert!(resolution.declared);
    }

    #[test]
    fn test_frequency_inference() {
        let mut events = attacks("Paris", 5);
        events.extend(attacks("Lyon", 3));
        let resolution = resolve_teams(&classify(events), None, None);

        assert_eq!(resolution.team, "paris");
        assert_eq!(resolution.opponent, "lyon");
        assert!(!resolution.declared);
        assert_eq!(
            resolution.votes,
            vec![("paris".to_string(), 5), ("lyon".to_string(), 3)]
        );
    }

    #[test]
    fn test_all_three_sources_vote() {
        let events = vec![
            Event::new("m1").with_possession("possession Nantes _ Nimes _ 1"),
            Event::new("m1").with_result_b("but Nimes"),
            Event::new("m1").with_result("tir contre Nimes"),
        ];
        let resolution = resolve_teams(&classify(events), None, None);
        assert_eq!(resolution.team, "nimes");
        assert_eq!(resolution.opponent, "nantes");
    }

    #[test]
    fn test_tie_break_first_seen() {
        let mut events = attacks("Lyon", 2);
        events.extend(attacks("Paris", 2));
        let resolution = resolve_teams(&classify(events), None, None);

        assert_eq!(resolution.team, "lyon");
        assert_eq!(resolution.opponent, "paris");
        assert_eq!(resolution.confidence, Confidence::Low);
    }

    #[test]
    fn test_no_candidates_is_unresolved() {
        let events = vec![Event::new("m1").with_action("temps mort")];
        let resolution = resolve_teams(&classify(events), None, None);
        assert!(!resolution.is_resolved());
        assert_eq!(resolution.opponent, "");
        assert_eq!(resolution.confidence, Confidence::Low);
    }

    #[test]
    fn test_single_declared_name_infers_other() {
        let mut events = attacks("USDK", 6);
        events.extend(attacks("Chambery", 4));
        let resolution = resolve_teams(&classify(events), None, Some("Chambéry"));

        assert_eq!(resolution.team, "chambery");
        assert_eq!(resolution.opponent, "usdk");
        assert_eq!(resolution.confidence, Confidence::Medium);
    }

    #[test]
    fn test_confidence_levels() {
        let resolver = TeamResolver::new(0.1);
        assert_eq!(resolver.vote_confidence(30, Some(28)), Confidence::Low);
        assert_eq!(resolver.vote_confidence(30, Some(20)), Confidence::High);
        assert_eq!(resolver.vote_confidence(5, Some(3)), Confidence::Medium);
        assert_eq!(resolver.vote_confidence(5, None), Confidence::Low);
    }

    #[test]
    fn test_side_of_and_swap() {
        let resolution = resolve_teams(&[], Some("USDK"), Some("Limoges"));
        assert_eq!(resolution.side_of("Usdk"), Some(TeamSide::Team));
        assert_eq!(resolution.side_of("LIMOGES"), Some(TeamSide::Opponent));
        assert_eq!(resolution.side_of("Nantes"), None);

        let swapped = resolution.swapped();
        assert_eq!(swapped.team, "limoges");
        assert_eq!(swapped.opponent, "usdk");
    }
}
