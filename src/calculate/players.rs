//! Player-level reports.
//!
//! Attackers are credited with the outcome on their side's result channel;
//! goalkeepers face the shots on the other side's channel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::percentage;
use crate::classify::{ClassifiedEvent, ResultKind};
use crate::models::{Event, ParticipantRole, Player, PlayerId, PlayerRegistry, Side, ZoneMap};

/// Shooting and goalkeeping figures for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub player: Player,
    pub shots: u32,
    pub goals: u32,
    pub seven_shots: u32,
    pub seven_goals: u32,
    pub assists: u32,
    pub shots_faced: u32,
    pub saves: u32,
    /// Shots per zone, successes are goals
    pub shot_zones: ZoneMap,
    /// On-target shots faced per zone, successes are saves
    pub save_zones: ZoneMap,
}

impl PlayerReport {
    fn new(player: Player) -> Self {
        Self {
            player,
            shots: 0,
            goals: 0,
            seven_shots: 0,
            seven_goals: 0,
            assists: 0,
            shots_faced: 0,
            saves: 0,
            shot_zones: ZoneMap::new(),
            save_zones: ZoneMap::new(),
        }
    }

    pub fn shooting_percentage(&self) -> f64 {
        percentage(self.goals, self.shots)
    }

    pub fn save_percentage(&self) -> f64 {
        percentage(self.saves, self.shots_faced)
    }
}

/// Reports keyed by player, in first-mention order.
#[derive(Default)]
struct ReportBook {
    registry: PlayerRegistry,
    reports: Vec<PlayerReport>,
    index: HashMap<PlayerId, usize>,
}

impl ReportBook {
    /// Report for `name`, registering the player on first mention.
    fn entry(
        &mut self,
        name: &str,
        position: Option<&str>,
        team: Option<&str>,
    ) -> Option<&mut PlayerReport> {
        let player = self.registry.get_or_create(name, position, team)?.clone();
        let idx = match self.index.get(&player.id) {
            Some(&idx) => {
                self.reports[idx].player = player;
                idx
            }
            None => {
                self.index.insert(player.id.clone(), self.reports.len());
                self.reports.push(PlayerReport::new(player));
                self.reports.len() - 1
            }
        };
        Some(&mut self.reports[idx])
    }
}

/// Build one report per player cited by `events`, in first-mention order.
///
/// `classified` must be the classification of `events`, index for index.
pub fn player_reports(events: &[Event], classified: &[ClassifiedEvent]) -> Vec<PlayerReport> {
    let mut book = ReportBook::default();

    for (event, class) in events.iter().zip(classified) {
        for participant in &event.participants {
            let Some(report) = book.entry(
                &participant.name,
                participant.position.as_deref(),
                participant.team.as_deref(),
            ) else {
                continue;
            };

            match participant.role {
                ParticipantRole::Attacker => {
                    let Some(kind) = class.channel_outcome(participant.side) else {
                        continue;
                    };
                    if !kind.is_shot() {
                        continue;
                    }
                    let goal = kind == ResultKind::Goal;
                    report.shots += 1;
                    if goal {
                        report.goals += 1;
                    }
                    if class.is_seven_meter() {
                        report.seven_shots += 1;
                        if goal {
                            report.seven_goals += 1;
                        }
                    }
                    if let Some(zone) = class.zone {
                        report.shot_zones.record(zone, goal);
                    }
                }
                ParticipantRole::Goalkeeper => {
                    let saved = match class.channel_outcome(participant.side.other()) {
                        Some(ResultKind::Goal) => false,
                        Some(ResultKind::ShotSaved) => true,
                        _ => continue,
                    };
                    report.shots_faced += 1;
                    if saved {
                        report.saves += 1;
                    }
                    if let Some(zone) = class.zone {
                        report.save_zones.record(zone, saved);
                    }
                }
            }
        }

        let scored = [Side::A, Side::B]
            .into_iter()
            .any(|side| class.channel_outcome(side) == Some(ResultKind::Goal));
        if let Some(assist) = event.assisted_by.as_deref().filter(|_| scored) {
            if let Some(report) = book.entry(assist, None, None) {
                report.assists += 1;
            }
        }
    }

    book.reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    fn build(events: Vec<Event>) -> Vec<PlayerReport> {
        let classified: Vec<_> = events.iter().map(ClassifiedEvent::new).collect();
        player_reports(&events, &classified)
    }

    fn find<'a>(reports: &'a [PlayerReport], name: &str) -> &'a PlayerReport {
        reports
            .iter()
            .find(|r| r.player.name == name)
            .unwrap_or_else(|| panic!("no report for {}", name))
    }

    #[test]
    fn test_attacker_and_goalkeeper_credit() {
        let reports = build(vec![
            Event::new("m1")
                .with_result("but USDK")
                .with_zone("aile droite")
                .with_participant(Participant::attacker("Kylian Villeminot", Side::A).with_team("USDK"))
                .with_participant(Participant::goalkeeper("Yann Genty", Side::B)),
            Event::new("m1")
                .with_result("tir arrete USDK")
                .with_zone("aile droite")
                .with_participant(Participant::attacker("kylian villeminot", Side::A))
                .with_participant(Participant::goalkeeper("Yann Genty", Side::B)),
            Event::new("m1")
                .with_result("but USDK")
                .with_zone("7m")
                .with_participant(Participant::attacker("Kylian Villeminot", Side::A)),
        ]);

        assert_eq!(reports.len(), 2);

        let shooter = find(&reports, "Kylian Villeminot");
        assert_eq!(shooter.shots, 3);
        assert_eq!(shooter.goals, 2);
        assert_eq!(shooter.seven_shots, 1);
        assert_eq!(shooter.seven_goals, 1);
        assert_eq!(shooter.player.team.as_deref(), Some("USDK"));
        assert!((shooter.shooting_percentage() - 66.666).abs() < 0.01);

        let keeper = find(&reports, "Yann Genty");
        assert_eq!(keeper.shots_faced, 2);
        assert_eq!(keeper.saves, 1);
        assert_eq!(keeper.save_percentage(), 50.0);
        assert_eq!(keeper.save_zones.total().shots, 2);
    }

    #[test]
    fn test_assists_only_on_goals() {
        let reports = build(vec![
            Event::new("m1").with_result("but USDK").with_assist("Elohim Prandi"),
            Event::new("m1").with_result("tir arrete USDK").with_assist("Elohim Prandi"),
        ]);

        let passer = find(&reports, "Elohim Prandi");
        assert_eq!(passer.assists, 1);
        assert_eq!(passer.shots, 0);
    }

    #[test]
    fn test_non_shot_outcomes_ignored() {
        let reports = build(vec![Event::new("m1")
            .with_result("perte de balle USDK")
            .with_participant(Participant::attacker("Dika Mem", Side::A))]);

        let player = find(&reports, "Dika Mem");
        assert_eq!(player.shots, 0);
    }
}
