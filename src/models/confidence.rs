//! Confidence in an inferred team attribution.

use serde::{Deserialize, Serialize};

/// How much the team attribution for a match can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Names were declared, or the frequency vote was clear-cut
    High,
    /// Inferred, with a comfortable lead but a thin sample
    #[default]
    Medium,
    /// Top candidates within the configured margin, or a side is missing
    Low,
}

impl Confidence {
    /// Returns true if downstream figures can be shown without a caveat.
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Confidence::High | Confidence::Medium)
    }

    /// Returns true if users should be told the attribution is a guess.
    pub fn needs_review(&self) -> bool {
        matches!(self, Confidence::Low)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_acceptable() {
        assert!(Confidence::High.is_acceptable());
        assert!(Confidence::Medium.is_acceptable());
        assert!(!Confidence::Low.is_acceptable());
        assert!(Confidence::Low.needs_review());
    }

    #[test]
    fn test_confidence_serialization() {
        let json = serde_json::to_string(&Confidence::Low).unwrap();
        assert_eq!(json, "\"low\"");
        let back: Confidence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Confidence::Low);
    }
}
