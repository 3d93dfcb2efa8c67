//! Display-ready metric values.

use serde::{Deserialize, Serialize};

use super::MetricKey;

/// Color band of a percentage relative to its metric threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    /// Comfortably on the good side of the threshold
    Good,
    /// Within the margin around the threshold
    Marginal,
    /// On the bad side of the threshold
    Poor,
}

impl std::fmt::Display for ColorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorBand::Good => write!(f, "good"),
            ColorBand::Marginal => write!(f, "marginal"),
            ColorBand::Poor => write!(f, "poor"),
        }
    }
}

/// Outcome of checking a value against an objective expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveStatus {
    Ok,
    Bad,
    #[default]
    NotApplicable,
}

impl std::fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveStatus::Ok => write!(f, "ok"),
            ObjectiveStatus::Bad => write!(f, "bad"),
            ObjectiveStatus::NotApplicable => write!(f, "not-applicable"),
        }
    }
}

/// One labeled metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub key: MetricKey,

    pub label: String,

    /// 0 to 100
    pub percentage: f64,

    /// "num/den"; raw counts for one match, mean counts across several
    pub display_count: String,

    /// Numerator shown in `display_count`
    pub numerator: f64,

    /// Denominator shown in `display_count`; zero means no opportunity
    pub denominator: f64,

    /// Matches whose ratio went into `percentage`
    pub matches: u32,

    /// `None` when there was no opportunity to measure
    pub color_band: Option<ColorBand>,

    pub objective_status: ObjectiveStatus,

    /// Objective the status was evaluated against, as rendered for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
}

impl Gauge {
    /// A gauge with no opportunities.
    pub fn empty(key: MetricKey) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            percentage: 0.0,
            display_count: "0/0".to_string(),
            numerator: 0.0,
            denominator: 0.0,
            matches: 0,
            color_band: None,
            objective_status: ObjectiveStatus::NotApplicable,
            objective: None,
        }
    }

    pub fn has_opportunities(&self) -> bool {
        self.denominator > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gauge() {
        let gauge = Gauge::empty(MetricKey::ShootingEfficiency);
        assert_eq!(gauge.label, "Shooting efficiency");
        assert_eq!(gauge.display_count, "0/0");
        assert!(!gauge.has_opportunities());
        assert_eq!(gauge.objective_status, ObjectiveStatus::NotApplicable);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ObjectiveStatus::NotApplicable).unwrap();
        assert_eq!(json, "\"not-applicable\"");
        assert_eq!(format!("{}", ObjectiveStatus::Ok), "ok");
    }
}
