//! Match event model.
//!
//! One row per discrete action logged during a match. Every text field is
//! free text as typed by the operator; nothing is validated here.

use serde::{Deserialize, Serialize};

use super::MatchId;

/// Which side of the match a result channel or participant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Role a player had in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Attacker,
    Goalkeeper,
}

/// A player cited by an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Player name as logged
    pub name: String,

    pub role: ParticipantRole,

    /// Side whose result channel this participant acted on
    pub side: Side,

    /// Team label, when the logger recorded one
    #[serde(default)]
    pub team: Option<String>,

    /// Field position, when the logger recorded one
    #[serde(default)]
    pub position: Option<String>,
}

impl Participant {
    pub fn attacker(name: &str, side: Side) -> Self {
        Self {
            name: name.to_string(),
            role: ParticipantRole::Attacker,
            side,
            team: None,
            position: None,
        }
    }

    pub fn goalkeeper(name: &str, side: Side) -> Self {
        Self {
            name: name.to_string(),
            role: ParticipantRole::Goalkeeper,
            side,
            team: None,
            position: None,
        }
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }
}

/// A logged match event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Match this event belongs to
    pub match_id: MatchId,

    /// Action text, e.g. "attaque USDK" or "contre-attaque Limoges"
    #[serde(default)]
    pub action_name: Option<String>,

    /// Result channel of side A, e.g. "but USDK"
    #[serde(default)]
    pub result_team_a: Option<String>,

    /// Result channel of side B
    #[serde(default)]
    pub result_team_b: Option<String>,

    /// Shot or impact location label
    #[serde(default)]
    pub zone: Option<String>,

    /// Possession descriptor, e.g. "possession USDK _ Limoges _ 12"
    #[serde(default)]
    pub possession: Option<String>,

    /// Numeric situation tag, relative to the attacking side
    #[serde(default)]
    pub numeric_situation: Option<String>,

    /// Position in the match, in milliseconds
    #[serde(default)]
    pub timestamp_ms: Option<u64>,

    /// Free-text credit for the assist on a goal
    #[serde(default)]
    pub assisted_by: Option<String>,

    /// Up to four cited players (attacker and goalkeeper of each side)
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Event {
    pub fn new(match_id: impl Into<MatchId>) -> Self {
        Self {
            match_id: match_id.into(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action_name = Some(action.to_string());
        self
    }

    /// Set the result channel of side A.
    pub fn with_result(mut self, result: &str) -> Self {
        self.result_team_a = Some(result.to_string());
        self
    }

    /// Set the result channel of side B.
    pub fn with_result_b(mut self, result: &str) -> Self {
        self.result_team_b = Some(result.to_string());
        self
    }

    pub fn with_zone(mut self, zone: &str) -> Self {
        self.zone = Some(zone.to_string());
        self
    }

    pub fn with_possession(mut self, possession: &str) -> Self {
        self.possession = Some(possession.to_string());
        self
    }

    pub fn with_numeric_situation(mut self, situation: &str) -> Self {
        self.numeric_situation = Some(situation.to_string());
        self
    }

    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    pub fn with_assist(mut self, assisted_by: &str) -> Self {
        self.assisted_by = Some(assisted_by.to_string());
        self
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    pub fn action(&self) -> &str {
        self.action_name.as_deref().unwrap_or("")
    }

    pub fn zone_label(&self) -> &str {
        self.zone.as_deref().unwrap_or("")
    }

    pub fn possession_text(&self) -> &str {
        self.possession.as_deref().unwrap_or("")
    }

    pub fn situation(&self) -> &str {
        self.numeric_situation.as_deref().unwrap_or("")
    }

    /// Result text of one side's channel.
    pub fn result(&self, side: Side) -> &str {
        match side {
            Side::A => self.result_team_a.as_deref().unwrap_or(""),
            Side::B => self.result_team_b.as_deref().unwrap_or(""),
        }
    }

    /// Both result channels, side A first.
    pub fn results(&self) -> [&str; 2] {
        [self.result(Side::A), self.result(Side::B)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = Event::new("m1")
            .with_action("attaque USDK")
            .with_result("but USDK")
            .with_zone("Aile gauche")
            .at(65_000);

        assert_eq!(event.match_id.as_str(), "m1");
        assert_eq!(event.action(), "attaque USDK");
        assert_eq!(event.result(Side::A), "but USDK");
        assert_eq!(event.result(Side::B), "");
        assert_eq!(event.timestamp_ms, Some(65_000));
    }

    #[test]
    fn test_event_deserialize_with_nulls() {
        let json = r#"{
            "match_id": "m7",
            "action_name": null,
            "result_team_a": "tir arrete PAUC",
            "participants": [
                {"name": "Kevin Bonnefoi", "role": "goalkeeper", "side": "b"}
            ]
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.action(), "");
        assert_eq!(event.results(), ["tir arrete PAUC", ""]);
        assert_eq!(event.participants.len(), 1);
        assert_eq!(event.participants[0].role, ParticipantRole::Goalkeeper);
        assert_eq!(event.participants[0].side, Side::B);
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }
}
