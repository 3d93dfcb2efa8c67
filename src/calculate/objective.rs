//! Objective expressions.
//!
//! Grammar: `N` (at least N), `<N` / `<=N` (at most N), `>N` / `>=N`
//! (at least N), `A-B` (between A and B inclusive). A trailing `%` and
//! decimal commas are accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{Gauge, ObjectiveStatus};

/// Tolerance absorbing float noise in computed percentages.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Error, PartialEq)]
pub enum ObjectiveError {
    #[error("Empty objective expression")]
    Empty,

    #[error("Invalid number in objective: {0}")]
    InvalidNumber(String),

    #[error("Inverted objective range: {0}-{1}")]
    InvertedRange(f64, f64),
}

/// A parsed objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Bare number: higher is better, met at or above the target
    Target { value: f64 },
    /// `<X` or `<=X`: met at or below X
    AtMost { value: f64, strict: bool },
    /// `>X` or `>=X`: met at or above X
    AtLeast { value: f64, strict: bool },
    /// `A-B`: met between A and B inclusive
    Range { low: f64, high: f64 },
}

fn parse_number(text: &str) -> Result<f64, ObjectiveError> {
    let cleaned = text.trim().trim_end_matches('%').trim().replace(',', ".");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ObjectiveError::InvalidNumber(text.trim().to_string()))
}

impl FromStr for Objective {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ObjectiveError::Empty);
        }

        if let Some(rest) = s.strip_prefix("<=") {
            return Ok(Objective::AtMost {
                value: parse_number(rest)?,
                strict: false,
            });
        }
        if let Some(rest) = s.strip_prefix('<') {
            return Ok(Objective::AtMost {
                value: parse_number(rest)?,
                strict: true,
            });
        }
        if let Some(rest) = s.strip_prefix(">=") {
            return Ok(Objective::AtLeast {
                value: parse_number(rest)?,
                strict: false,
            });
        }
        if let Some(rest) = s.strip_prefix('>') {
            return Ok(Objective::AtLeast {
                value: parse_number(rest)?,
                strict: true,
            });
        }

        // Skip the first character so a leading minus is not taken as a range.
        if let Some(pos) = s.char_indices().skip(1).find(|(_, c)| *c == '-').map(|(i, _)| i) {
            let low = parse_number(&s[..pos])?;
            let high = parse_number(&s[pos + 1..])?;
            if low > high {
                return Err(ObjectiveError::InvertedRange(low, high));
            }
            return Ok(Objective::Range { low, high });
        }

        Ok(Objective::Target {
            value: parse_number(s)?,
        })
    }
}

impl Objective {
    /// Whether `value` satisfies the objective.
    ///
    /// Strict and non-strict comparisons are both inclusive.
    pub fn is_met(&self, value: f64) -> bool {
        match *self {
            Objective::Target { value: target } => value + EPSILON >= target,
            Objective::AtLeast { value: target, .. } => value + EPSILON >= target,
            Objective::AtMost { value: target, .. } => value - EPSILON <= target,
            Objective::Range { low, high } => value + EPSILON >= low && value - EPSILON <= high,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Objective::Target { value } => write!(f, "{}", value),
            Objective::AtMost { value, strict: true } => write!(f, "<{}", value),
            Objective::AtMost { value, strict: false } => write!(f, "<={}", value),
            Objective::AtLeast { value, strict: true } => write!(f, ">{}", value),
            Objective::AtLeast { value, strict: false } => write!(f, ">={}", value),
            Objective::Range { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

/// Status of a gauge against an objective expression.
///
/// No expression, no opportunity, or an unparseable expression all give
/// `NotApplicable`.
pub fn evaluate(gauge: &Gauge, expression: Option<&str>) -> ObjectiveStatus {
    let Some(expression) = expression.filter(|e| !e.trim().is_empty()) else {
        return ObjectiveStatus::NotApplicable;
    };
    if !gauge.has_opportunities() {
        return ObjectiveStatus::NotApplicable;
    }

    match expression.parse::<Objective>() {
        Ok(objective) => evaluate_value(gauge.percentage, &objective),
        Err(e) => {
            warn!("Ignoring objective {:?} for {}: {}", expression, gauge.key, e);
            ObjectiveStatus::NotApplicable
        }
    }
}

/// Status of a raw value against a parsed objective.
pub fn evaluate_value(value: f64, objective: &Objective) -> ObjectiveStatus {
    if objective.is_met(value) {
        ObjectiveStatus::Ok
    } else {
        ObjectiveStatus::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricKey;

    fn gauge(percentage: f64) -> Gauge {
        let mut gauge = Gauge::empty(MetricKey::TurnoverRate);
        gauge.percentage = percentage;
        gauge.numerator = 1.0;
        gauge.denominator = 10.0;
        gauge
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("55".parse(), Ok(Objective::Target { value: 55.0 }));
        assert_eq!(
            "<10".parse(),
            Ok(Objective::AtMost { value: 10.0, strict: true })
        );
        assert_eq!(
            "<= 10".parse(),
            Ok(Objective::AtMost { value: 10.0, strict: false })
        );
        assert_eq!(
            ">=33%".parse(),
            Ok(Objective::AtLeast { value: 33.0, strict: false })
        );
        assert_eq!(
            "50-60".parse(),
            Ok(Objective::Range { low: 50.0, high: 60.0 })
        );
        assert_eq!(
            "12,5".parse(),
            Ok(Objective::Target { value: 12.5 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Objective>(), Err(ObjectiveError::Empty));
        assert!(matches!(
            "abc".parse::<Objective>(),
            Err(ObjectiveError::InvalidNumber(_))
        ));
        assert!(matches!(
            "<".parse::<Objective>(),
            Err(ObjectiveError::InvalidNumber(_))
        ));
        assert_eq!(
            "60-50".parse::<Objective>(),
            Err(ObjectiveError::InvertedRange(60.0, 50.0))
        );
    }

    #[test]
    fn test_less_than() {
        assert_eq!(evaluate(&gauge(8.0), Some("<10")), ObjectiveStatus::Ok);
        assert_eq!(evaluate(&gauge(12.0), Some("<10")), ObjectiveStatus::Bad);
        assert_eq!(evaluate(&gauge(10.0), Some("<10")), ObjectiveStatus::Ok);
    }

    #[test]
    fn test_range() {
        assert_eq!(evaluate(&gauge(55.0), Some("50-60")), ObjectiveStatus::Ok);
        assert_eq!(evaluate(&gauge(61.0), Some("50-60")), ObjectiveStatus::Bad);
        assert_eq!(evaluate(&gauge(49.0), Some("50-60")), ObjectiveStatus::Bad);
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(evaluate(&gauge(55.0), Some("55")), ObjectiveStatus::Ok);
        assert_eq!(evaluate(&gauge(54.9), Some("55")), ObjectiveStatus::Bad);
    }

    #[test]
    fn test_greater_than() {
        assert_eq!(evaluate(&gauge(40.0), Some(">33")), ObjectiveStatus::Ok);
        assert_eq!(evaluate(&gauge(20.0), Some(">=33")), ObjectiveStatus::Bad);
    }

    #[test]
    fn test_not_applicable_cases() {
        assert_eq!(evaluate(&gauge(55.0), None), ObjectiveStatus::NotApplicable);
        assert_eq!(evaluate(&gauge(55.0), Some("  ")), ObjectiveStatus::NotApplicable);
        assert_eq!(evaluate(&gauge(55.0), Some("beaucoup")), ObjectiveStatus::NotApplicable);

        let empty = Gauge::empty(MetricKey::TurnoverRate);
        assert_eq!(empty.percentage, 0.0);
        assert_eq!(evaluate(&empty, Some("<10")), ObjectiveStatus::NotApplicable);
    }

    #[test]
    fn test_display() {
        assert_eq!("50-60".parse::<Objective>().unwrap().to_string(), "50-60");
        assert_eq!("<=12".parse::<Objective>().unwrap().to_string(), "<=12");
        assert_eq!(" 55 ".parse::<Objective>().unwrap().to_string(), "55");
        assert_eq!("12.5".parse::<Objective>().unwrap().to_string(), "12.5");
    }
}
