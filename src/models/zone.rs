//! Court zones and zone maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::normalize;

/// Canonical named court region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "aile gauche")]
    LeftWing,
    #[serde(rename = "9m gauche")]
    LeftBack,
    #[serde(rename = "9m centre")]
    CentreBack,
    #[serde(rename = "9m droit")]
    RightBack,
    #[serde(rename = "aile droite")]
    RightWing,
    #[serde(rename = "6m gauche")]
    LeftSixMeter,
    #[serde(rename = "6m centre")]
    CentreSixMeter,
    #[serde(rename = "6m droit")]
    RightSixMeter,
    #[serde(rename = "7m")]
    SevenMeter,
    #[serde(rename = "longue distance")]
    LongRange,
}

/// Normalized label prefixes, canonical labels first. Longer aliases are
/// listed before shorter ones sharing a prefix.
const ZONE_ALIASES: &[(&str, Zone)] = &[
    ("aile gauche", Zone::LeftWing),
    ("ailier gauche", Zone::LeftWing),
    ("aile droite", Zone::RightWing),
    ("ailier droit", Zone::RightWing),
    ("9m gauche", Zone::LeftBack),
    ("arriere gauche", Zone::LeftBack),
    ("9m centre", Zone::CentreBack),
    ("demi-centre", Zone::CentreBack),
    ("demi centre", Zone::CentreBack),
    ("9m droit", Zone::RightBack),
    ("arriere droit", Zone::RightBack),
    ("6m gauche", Zone::LeftSixMeter),
    ("6m centre", Zone::CentreSixMeter),
    ("pivot", Zone::CentreSixMeter),
    ("penetration centrale", Zone::CentreSixMeter),
    ("6m droit", Zone::RightSixMeter),
    ("7m", Zone::SevenMeter),
    ("jet de 7m", Zone::SevenMeter),
    ("penalty", Zone::SevenMeter),
    ("longue distance", Zone::LongRange),
    ("tir lointain", Zone::LongRange),
    ("but vide", Zone::LongRange),
];

impl Zone {
    pub const ALL: [Zone; 10] = [
        Zone::LeftWing,
        Zone::LeftBack,
        Zone::CentreBack,
        Zone::RightBack,
        Zone::RightWing,
        Zone::LeftSixMeter,
        Zone::CentreSixMeter,
        Zone::RightSixMeter,
        Zone::SevenMeter,
        Zone::LongRange,
    ];

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Zone::LeftWing => "aile gauche",
            Zone::LeftBack => "9m gauche",
            Zone::CentreBack => "9m centre",
            Zone::RightBack => "9m droit",
            Zone::RightWing => "aile droite",
            Zone::LeftSixMeter => "6m gauche",
            Zone::CentreSixMeter => "6m centre",
            Zone::RightSixMeter => "6m droit",
            Zone::SevenMeter => "7m",
            Zone::LongRange => "longue distance",
        }
    }

    /// Resolve a free-text zone label. Unknown labels resolve to `None`.
    pub fn parse(text: &str) -> Option<Zone> {
        let norm = normalize(text);
        if norm.is_empty() {
            return None;
        }
        ZONE_ALIASES
            .iter()
            .find(|(alias, _)| {
                norm == *alias
                    || norm
                        .strip_prefix(alias)
                        .is_some_and(|rest| rest.starts_with(' '))
            })
            .map(|(_, zone)| *zone)
    }

    /// One-on-one attacking positions: wings and the six-meter line.
    pub fn is_duel(self) -> bool {
        matches!(
            self,
            Zone::LeftWing
                | Zone::RightWing
                | Zone::LeftSixMeter
                | Zone::CentreSixMeter
                | Zone::RightSixMeter
        )
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Attempts and successes in one zone.
///
/// On an offensive map `successes` counts goals; on a goalkeeper map it
/// counts saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTally {
    pub shots: u32,
    pub successes: u32,
}

impl ZoneTally {
    pub fn rate(&self) -> f64 {
        crate::calculate::percentage(self.successes, self.shots)
    }
}

/// Shot chart keyed by canonical zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneMap {
    pub zones: BTreeMap<Zone, ZoneTally>,
}

impl ZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, zone: Zone, success: bool) {
        let tally = self.zones.entry(zone).or_default();
        tally.shots += 1;
        if success {
            tally.successes += 1;
        }
    }

    pub fn merge(&mut self, other: &ZoneMap) {
        for (zone, tally) in &other.zones {
            let entry = self.zones.entry(*zone).or_default();
            entry.shots += tally.shots;
            entry.successes += tally.successes;
        }
    }

    pub fn get(&self, zone: Zone) -> ZoneTally {
        self.zones.get(&zone).copied().unwrap_or_default()
    }

    pub fn total(&self) -> ZoneTally {
        self.zones.values().fold(ZoneTally::default(), |acc, t| ZoneTally {
            shots: acc.shots + t.shots,
            successes: acc.successes + t.successes,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
