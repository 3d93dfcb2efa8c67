//! Report orchestration.
//!
//! Groups events by match, classifies and resolves each match once, then
//! feeds the calculation engine. Every entry point takes its scope as an
//! explicit argument and holds no state between calls.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculate::players::{player_reports, PlayerReport};
use crate::calculate::timeline::{merge_timelines, timeline, TimelineWindow, DEFAULT_WINDOW_MS};
use crate::calculate::zones::zone_map;
use crate::calculate::{
    buckets_from_counts, combine_with_margin, count_match, evaluate, top_n, AggregateBucket,
    Objective, RankedRow, RankingRow, DEFAULT_BAND_MARGIN,
};
use crate::classify::{normalize, ClassifiedEvent};
use crate::config::{AppConfig, ConfigError};
use crate::models::{
    Confidence, Event, Gauge, Match, MatchCounts, MatchId, MatchScope, MetricKey, ReportMode,
    ReportRequest, ZoneMap,
};
use crate::teams::{TeamResolution, TeamResolver, TeamSide};

/// A non-fatal problem found while building a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// No events were supplied
    EmptyEventCollection,
    /// No team could be identified; the match contributes nothing
    UnresolvedTeams { match_id: MatchId },
    /// Team names were inferred from ambiguous votes
    LowConfidenceTeams {
        match_id: MatchId,
        team: String,
        opponent: String,
    },
    /// The selected match has no events and no descriptor
    UnknownMatch { match_id: MatchId },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::EmptyEventCollection => write!(f, "no events supplied"),
            ReportWarning::UnresolvedTeams { match_id } => {
                write!(f, "match {}: teams could not be identified", match_id)
            }
            ReportWarning::LowConfidenceTeams {
                match_id,
                team,
                opponent,
            } => write!(
                f,
                "match {}: teams inferred with low confidence ({} vs {})",
                match_id, team, opponent
            ),
            ReportWarning::UnknownMatch { match_id } => write!(f, "unknown match {}", match_id),
        }
    }
}

/// Per-match figures behind a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub label: String,
    /// Team the figures are seen from, normalized
    pub team: String,
    pub opponent: String,
    pub confidence: Confidence,
    pub counts: MatchCounts,
}

/// Output of [`Analyzer::report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub mode: ReportMode,
    pub scope: MatchScope,
    /// One gauge per ratio metric of the mode, in catalog order
    pub gauges: Vec<Gauge>,
    /// Offensive: shots and goals per zone. Defensive: shots faced and saves.
    pub zone_map: ZoneMap,
    pub timeline: Vec<TimelineWindow>,
    pub matches: Vec<MatchSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ReportWarning>,
}

/// Team attribution of one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTeams {
    pub match_id: MatchId,
    pub label: String,
    pub event_count: usize,
    pub resolution: TeamResolution,
}

/// One match's events, classified and attributed.
struct PreparedMatch<'a> {
    id: MatchId,
    info: Option<&'a Match>,
    events: Vec<ClassifiedEvent>,
    resolution: TeamResolution,
}

impl PreparedMatch<'_> {
    fn label(&self) -> String {
        match self.info {
            Some(info) => info.display_label(),
            None => self.id.to_string(),
        }
    }

    /// Declared display name and logo for a normalized team name.
    fn display(&self, team: &str) -> (String, Option<String>) {
        if let Some(info) = self.info {
            if let Some(home) = info.home_team().filter(|h| normalize(h) == team) {
                return (home.to_string(), info.home_logo.clone());
            }
            if let Some(away) = info.away_team().filter(|a| normalize(a) == team) {
                return (away.to_string(), info.away_logo.clone());
            }
        }
        (team.to_string(), None)
    }
}

/// Entry point of the analytics core.
#[derive(Debug, Clone)]
pub struct Analyzer {
    resolver: TeamResolver,
    band_margin: f64,
    timeline_window_ms: u64,
    objectives: BTreeMap<MetricKey, String>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            resolver: TeamResolver::default(),
            band_margin: DEFAULT_BAND_MARGIN,
            timeline_window_ms: DEFAULT_WINDOW_MS,
            objectives: BTreeMap::new(),
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from validated configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            resolver: TeamResolver::new(config.analysis.low_confidence_margin),
            band_margin: config.analysis.band_margin,
            timeline_window_ms: config.analysis.timeline_window_ms(),
            objectives: config.objective_overrides()?,
        })
    }

    /// Override a metric's objective. An empty expression disables it.
    pub fn with_objective(mut self, key: MetricKey, expression: &str) -> Self {
        self.objectives.insert(key, expression.trim().to_string());
        self
    }

    /// Objective in force for a metric: the override, else the catalog default.
    pub fn objective_for(&self, key: MetricKey) -> Option<&str> {
        match self.objectives.get(&key) {
            Some(expression) if expression.is_empty() => None,
            Some(expression) => Some(expression.as_str()),
            None => key.definition().objective,
        }
    }

    /// Group events by match and attribute teams.
    ///
    /// Matches follow the descriptor list order, then any match only known
    /// from events in first-appearance order. Descriptors without events are
    /// left out.
    fn prepare<'a>(&self, events: &[Event], matches: &'a [Match]) -> Vec<PreparedMatch<'a>> {
        let mut order: Vec<MatchId> = Vec::new();
        let mut grouped: HashMap<MatchId, Vec<ClassifiedEvent>> = HashMap::new();
        for event in events {
            grouped
                .entry(event.match_id.clone())
                .or_insert_with(|| {
                    order.push(event.match_id.clone());
                    Vec::new()
                })
                .push(ClassifiedEvent::new(event));
        }

        let descriptors: HashMap<&MatchId, &Match> = matches.iter().map(|m| (&m.id, m)).collect();

        let mut ids: Vec<MatchId> = matches
            .iter()
            .filter(|m| grouped.contains_key(&m.id))
            .map(|m| m.id.clone())
            .collect();
        for id in order {
            if !descriptors.contains_key(&id) {
                ids.push(id);
            }
        }

        ids.into_iter()
            .filter_map(|id| {
                let events = grouped.remove(&id)?;
                let info = descriptors.get(&id).copied();
                let resolution = self.resolver.resolve(
                    &events,
                    info.and_then(Match::home_team),
                    info.and_then(Match::away_team),
                );
                Some(PreparedMatch {
                    id,
                    info,
                    events,
                    resolution,
                })
            })
            .collect()
    }

    /// Gauges, zone map and timeline for the requested mode and scope.
    pub fn report(&self, events: &[Event], matches: &[Match], request: &ReportRequest) -> Report {
        let mut warnings = Vec::new();
        if events.is_empty() {
            warnings.push(ReportWarning::EmptyEventCollection);
        }

        let prepared: Vec<PreparedMatch> = self
            .prepare(events, matches)
            .into_iter()
            .filter(|m| request.scope.includes(&m.id))
            .collect();

        if let MatchScope::SingleMatch(id) = &request.scope {
            let described = matches.iter().any(|m| &m.id == id);
            if prepared.is_empty() && !described && !events.is_empty() {
                warnings.push(ReportWarning::UnknownMatch {
                    match_id: id.clone(),
                });
            }
        }

        let mut buckets = Vec::new();
        let mut zones = ZoneMap::new();
        let mut windows: Vec<TimelineWindow> = Vec::new();
        let mut summaries = Vec::new();

        for m in &prepared {
            if !m.resolution.is_resolved() {
                warn!("Match {}: no team could be identified", m.id);
                warnings.push(ReportWarning::UnresolvedTeams {
                    match_id: m.id.clone(),
                });
                continue;
            }

            let resolution = match request.focus_team.as_deref() {
                None => m.resolution.clone(),
                Some(focus) => match m.resolution.side_of(focus) {
                    Some(TeamSide::Team) => m.resolution.clone(),
                    Some(TeamSide::Opponent) => m.resolution.swapped(),
                    None => {
                        debug!("Match {}: {:?} did not play, skipped", m.id, focus);
                        continue;
                    }
                },
            };

            if resolution.confidence.needs_review() {
                warn!(
                    "Match {}: low confidence attribution {:?} vs {:?}",
                    m.id, resolution.team, resolution.opponent
                );
                warnings.push(ReportWarning::LowConfidenceTeams {
                    match_id: m.id.clone(),
                    team: resolution.team.clone(),
                    opponent: resolution.opponent.clone(),
                });
            }

            let (team, opponent) = (resolution.team.as_str(), resolution.opponent.as_str());
            let counts = count_match(&m.events, team, opponent);
            buckets.extend(buckets_from_counts(&m.id, team, &counts));
            zones.merge(&zone_map(&m.events, team, opponent, request.mode));
            merge_timelines(
                &mut windows,
                &timeline(&m.events, team, opponent, self.timeline_window_ms),
            );

            summaries.push(MatchSummary {
                match_id: m.id.clone(),
                label: m.label(),
                team: resolution.team.clone(),
                opponent: resolution.opponent.clone(),
                confidence: resolution.confidence,
                counts,
            });
        }

        let gauges = self.gauges(&buckets, request.mode);
        info!(
            "Built {:?} report over {} matches ({} warnings)",
            request.mode,
            summaries.len(),
            warnings.len()
        );

        Report {
            mode: request.mode,
            scope: request.scope.clone(),
            gauges,
            zone_map: zones,
            timeline: windows,
            matches: summaries,
            warnings,
        }
    }

    /// Combine buckets into the mode's gauges and evaluate objectives.
    fn gauges(&self, buckets: &[AggregateBucket], mode: ReportMode) -> Vec<Gauge> {
        let mut combined: BTreeMap<MetricKey, Gauge> = combine_with_margin(buckets, self.band_margin)
            .into_iter()
            .map(|g| (g.key, g))
            .collect();

        MetricKey::gauges_for(mode)
            .map(|key| {
                let mut gauge = combined.remove(&key).unwrap_or_else(|| Gauge::empty(key));
                let expression = self.objective_for(key);
                gauge.objective_status = evaluate(&gauge, expression);
                gauge.objective = expression
                    .and_then(|e| e.parse::<Objective>().ok())
                    .map(|o| o.to_string());
                gauge
            })
            .collect()
    }

    /// Single-match rows for both teams of every match in scope, ranked by
    /// `criterion`, best `limit` first.
    pub fn rankings(
        &self,
        events: &[Event],
        matches: &[Match],
        scope: &MatchScope,
        criterion: MetricKey,
        limit: usize,
    ) -> Vec<RankedRow> {
        top_n(&self.ranking_rows(events, matches, scope), criterion, limit)
    }

    /// Unranked (team, match) rows in match order, team before opponent.
    pub fn ranking_rows(
        &self,
        events: &[Event],
        matches: &[Match],
        scope: &MatchScope,
    ) -> Vec<RankingRow> {
        let mut rows = Vec::new();
        for m in self.prepare(events, matches) {
            if !scope.includes(&m.id) || !m.resolution.is_resolved() {
                continue;
            }
            let counts = count_match(&m.events, &m.resolution.team, &m.resolution.opponent);
            let label = m.label();

            let mut push = |team: &str, opponent: &str, counts: MatchCounts| {
                let (name, logo) = m.display(team);
                let (opponent_name, _) = m.display(opponent);
                rows.push(RankingRow {
                    match_id: m.id.clone(),
                    match_label: label.clone(),
                    team: name,
                    opponent: opponent_name,
                    logo,
                    round: m.info.and_then(|i| i.round),
                    date: m.info.and_then(|i| i.date),
                    counts,
                });
            };

            push(&m.resolution.team, &m.resolution.opponent, counts);
            if !m.resolution.opponent.is_empty() {
                push(&m.resolution.opponent, &m.resolution.team, counts.mirrored());
            }
        }
        rows
    }

    /// Player reports over the events in scope, in first-mention order.
    pub fn player_reports(&self, events: &[Event], scope: &MatchScope) -> Vec<PlayerReport> {
        let selected: Vec<Event> = events
            .iter()
            .filter(|e| scope.includes(&e.match_id))
            .cloned()
            .collect();
        let classified: Vec<ClassifiedEvent> = selected.iter().map(ClassifiedEvent::new).collect();
        player_reports(&selected, &classified)
    }

    /// Team attribution for every match.
    pub fn teams(&self, events: &[Event], matches: &[Match]) -> Vec<MatchTeams> {
        self.prepare(events, matches)
            .into_iter()
            .map(|m| MatchTeams {
                label: m.label(),
                event_count: m.events.len(),
                match_id: m.id,
                resolution: m.resolution,
            })
            .collect()
    }
}
