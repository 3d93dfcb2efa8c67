//! Report scope selection.
//!
//! What used to be ambient UI state (selected mode, selected match) is an
//! explicit request value passed into the pipeline.

use serde::{Deserialize, Serialize};

use super::{MatchId, ReportMode};

/// Which matches a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScope {
    SingleMatch(MatchId),
    AllMatches,
}

impl MatchScope {
    pub fn includes(&self, match_id: &MatchId) -> bool {
        match self {
            MatchScope::SingleMatch(id) => id == match_id,
            MatchScope::AllMatches => true,
        }
    }
}

/// Parameters of one report computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub mode: ReportMode,

    pub scope: MatchScope,

    /// Team whose perspective is taken; defaults to each match's resolved team
    #[serde(default)]
    pub focus_team: Option<String>,
}

impl ReportRequest {
    pub fn new(mode: ReportMode, scope: MatchScope) -> Self {
        Self {
            mode,
            scope,
            focus_team: None,
        }
    }

    pub fn for_team(mut self, team: &str) -> Self {
        self.focus_team = Some(team.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_includes() {
        let single = MatchScope::SingleMatch("m1".into());
        assert!(single.includes(&"m1".into()));
        assert!(!single.includes(&"m2".into()));
        assert!(MatchScope::AllMatches.includes(&"m2".into()));
    }

    #[test]
    fn test_request_builder() {
        let request = ReportRequest::new(ReportMode::Defensive, MatchScope::AllMatches).for_team("USDK");
        assert_eq!(request.focus_team.as_deref(), Some("USDK"));
        assert_eq!(request.mode, ReportMode::Defensive);
    }
}
