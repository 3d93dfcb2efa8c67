//! Zone maps for shot charts.

use crate::classify::{ClassifiedEvent, ResultKind};
use crate::models::{ReportMode, ZoneMap};

/// Shot chart for one match.
///
/// Offensive: `team`'s shots per zone, successes are goals.
/// Defensive: `opponent`'s on-target shots per zone, successes are saves by
/// `team`'s goalkeeper. Events without a recognized zone are skipped.
pub fn zone_map(
    events: &[ClassifiedEvent],
    team: &str,
    opponent: &str,
    mode: ReportMode,
) -> ZoneMap {
    let mut map = ZoneMap::new();
    for event in events {
        let Some(zone) = event.zone else {
            continue;
        };
        match mode {
            ReportMode::Offensive => match event.outcome(team) {
                Some(kind) if kind.is_shot() => map.record(zone, kind == ResultKind::Goal),
                _ => {}
            },
            ReportMode::Defensive => match event.outcome(opponent) {
                Some(ResultKind::Goal) => map.record(zone, false),
                Some(ResultKind::ShotSaved) => map.record(zone, true),
                _ => {}
            },
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Zone, ZoneTally};

    fn events() -> Vec<ClassifiedEvent> {
        [
            Event::new("m1").with_result("but usdk").with_zone("aile gauche"),
            Event::new("m1").with_result("tir hors cadre usdk").with_zone("aile gauche"),
            Event::new("m1").with_result("but usdk").with_zone("7m"),
            Event::new("m1").with_result("but usdk"),
            Event::new("m1").with_result_b("tir arrete limoges").with_zone("9m centre"),
            Event::new("m1").with_result_b("but limoges").with_zone("9m centre"),
            Event::new("m1").with_result_b("tir hors cadre limoges").with_zone("9m centre"),
        ]
        .iter()
        .map(ClassifiedEvent::new)
        .collect()
    }

    #[test]
    fn test_offensive_map() {
        let map = zone_map(&events(), "usdk", "limoges", ReportMode::Offensive);
        assert_eq!(map.get(Zone::LeftWing), ZoneTally { shots: 2, successes: 1 });
        assert_eq!(map.get(Zone::SevenMeter), ZoneTally { shots: 1, successes: 1 });
        // unzoned goal skipped
        assert_eq!(map.total().shots, 3);
    }

    #[test]
    fn test_goalkeeper_save_map() {
        let map = zone_map(&events(), "usdk", "limoges", ReportMode::Defensive);
        // wide shots are not on target
        assert_eq!(map.get(Zone::CentreBack), ZoneTally { shots: 2, successes: 1 });
        assert_eq!(map.get(Zone::CentreBack).rate(), 50.0);
        assert_eq!(map.zones.len(), 1);
    }

    #[test]
    fn test_unresolved_teams_give_empty_map() {
        assert!(zone_map(&events(), "", "", ReportMode::Offensive).is_empty());
    }
}
