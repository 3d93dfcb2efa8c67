//! Match descriptor model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MatchId;

/// A match descriptor as supplied by the ingestion layer.
///
/// Home and away names are the vocabulary event text is matched against,
/// so they are only readable once the match is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,

    #[serde(default)]
    home_team: Option<String>,

    #[serde(default)]
    away_team: Option<String>,

    /// Display label, e.g. "USDK - Limoges"
    #[serde(default)]
    pub label: Option<String>,

    /// Logo reference of the home club
    #[serde(default)]
    pub home_logo: Option<String>,

    /// Logo reference of the away club
    #[serde(default)]
    pub away_logo: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Championship round ("journée")
    #[serde(default)]
    pub round: Option<u32>,
}

impl Match {
    pub fn new(id: impl Into<MatchId>, home_team: Option<&str>, away_team: Option<&str>) -> Self {
        Self {
            id: id.into(),
            home_team: home_team.map(str::to_string),
            away_team: away_team.map(str::to_string),
            label: None,
            home_logo: None,
            away_logo: None,
            date: None,
            round: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_logos(mut self, home: &str, away: &str) -> Self {
        self.home_logo = Some(home.to_string());
        self.away_logo = Some(away.to_string());
        self
    }

    pub fn home_team(&self) -> Option<&str> {
        self.home_team.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn away_team(&self) -> Option<&str> {
        self.away_team.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Label for display, falling back to "home - away" or the id.
    pub fn display_label(&self) -> String {
        if let Some(label) = self.label.as_deref().filter(|l| !l.trim().is_empty()) {
            return label.to_string();
        }
        match (self.home_team(), self.away_team()) {
            (Some(home), Some(away)) => format!("{} - {}", home, away),
            _ => self.id.to_string(),
        }
    }
}
