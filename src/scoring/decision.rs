use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::Thresholds;

/// Gate decision for a scored concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// Advance to the next development stage.
    Go,
    /// Park the concept; revisit after rework.
    Hold,
    /// Stop development.
    Drop,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Go => "GO",
            Decision::Hold => "HOLD",
            Decision::Drop => "DROP",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a score against the gate thresholds.
///
/// GO if `score >= go`, else HOLD if `score >= hold`, else DROP. Lower edges
/// are inclusive. Total over all of f64: NaN fails both comparisons and
/// lands on DROP.
pub fn classify(score: f64, thresholds: &Thresholds) -> Decision {
    if score >= thresholds.go {
        Decision::Go
    } else if score >= thresholds.hold {
        Decision::Hold
    } else {
        Decision::Drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_inclusive() {
        let t = Thresholds::default();
        assert_eq!(classify(3.20, &t), Decision::Go);
        assert_eq!(classify(3.00, &t), Decision::Hold);
        assert_eq!(classify(2.99, &t), Decision::Drop);
    }

    #[test]
    fn test_just_below_go_is_hold() {
        let t = Thresholds::default();
        assert_eq!(classify(3.19, &t), Decision::Hold);
    }

    #[test]
    fn test_extremes() {
        let t = Thresholds::default();
        assert_eq!(classify(4.50, &t), Decision::Go);
        assert_eq!(classify(0.90, &t), Decision::Drop);
        assert_eq!(classify(f64::NEG_INFINITY, &t), Decision::Drop);
        assert_eq!(classify(f64::INFINITY, &t), Decision::Go);
    }

    #[test]
    fn test_nan_classifies_drop() {
        assert_eq!(classify(f64::NAN, &Thresholds::default()), Decision::Drop);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = Thresholds { go: 4.0, hold: 2.0 };
        assert_eq!(classify(3.20, &t), Decision::Hold);
        assert_eq!(classify(4.0, &t), Decision::Go);
        assert_eq!(classify(1.99, &t), Decision::Drop);
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_string(&Decision::Go).unwrap(), "\"GO\"");
        assert_eq!(serde_json::to_string(&Decision::Hold).unwrap(), "\"HOLD\"");
        assert_eq!(serde_json::to_string(&Decision::Drop).unwrap(), "\"DROP\"");
        let back: Decision = serde_json::from_str("\"HOLD\"").unwrap();
        assert_eq!(back, Decision::Hold);
    }

    #[test]
    fn test_display() {
        assert_eq!(Decision::Go.to_string(), "GO");
        assert_eq!(Decision::Drop.to_string(), "DROP");
    }
}
