use serde::{Deserialize, Serialize};

use super::ratings::RatingField;

/// Per-field weights applied when computing a score.
///
/// The default set sums to 0.90, not 1.00, a deliberate carry-over of the
/// original marketing-validation weights, which means the maximum achievable
/// score is 4.50 rather than 5.00. Teams that want a normalized total can
/// configure their own set; validation only requires each weight to be
/// non-negative and finite.
///
/// Example YAML:
/// ```yaml
/// weights:
///   company_fit: 0.20
///   cost_stability: 0.20
///   manufacturability: 0.15
///   customer_acceptance: 0.15
///   repurchase: 0.20
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    #[serde(default = "default_company_fit")]
    pub company_fit: f64,

    #[serde(default = "default_cost_stability")]
    pub cost_stability: f64,

    #[serde(default = "default_manufacturability")]
    pub manufacturability: f64,

    #[serde(default = "default_customer_acceptance")]
    pub customer_acceptance: f64,

    #[serde(default = "default_repurchase")]
    pub repurchase: f64,
}

fn default_company_fit() -> f64 {
    0.20
}

fn default_cost_stability() -> f64 {
    0.20
}

fn default_manufacturability() -> f64 {
    0.15
}

fn default_customer_acceptance() -> f64 {
    0.15
}

fn default_repurchase() -> f64 {
    0.20
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            company_fit: default_company_fit(),
            cost_stability: default_cost_stability(),
            manufacturability: default_manufacturability(),
            customer_acceptance: default_customer_acceptance(),
            repurchase: default_repurchase(),
        }
    }
}

impl Weights {
    /// Look up the weight for one rating field.
    pub fn get(&self, field: RatingField) -> f64 {
        match field {
            RatingField::CompanyFit => self.company_fit,
            RatingField::CostStability => self.cost_stability,
            RatingField::Manufacturability => self.manufacturability,
            RatingField::CustomerAcceptance => self.customer_acceptance,
            RatingField::Repurchase => self.repurchase,
        }
    }

    /// Sum of all five weights (0.90 for the default set).
    pub fn sum(&self) -> f64 {
        RatingField::ALL.iter().map(|&f| self.get(f)).sum()
    }
}

/// Score boundaries for the GO/HOLD/DROP gate.
///
/// Both edges are inclusive on the lower side: a score exactly at `go` is a
/// GO, exactly at `hold` is a HOLD. Configurable so teams can argue about
/// where the line sits without patching the binary.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    /// Score at or above this is a GO (default: 3.2)
    #[serde(default = "default_go")]
    pub go: f64,

    /// Score at or above this (but below `go`) is a HOLD (default: 3.0)
    #[serde(default = "default_hold")]
    pub hold: f64,
}

fn default_go() -> f64 {
    3.2
}

fn default_hold() -> f64 {
    3.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            go: default_go(),
            hold: default_hold(),
        }
    }
}

/// Complete scoring configuration: the weight vector plus gate thresholds.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: Weights,

    #[serde(default)]
    pub thresholds: Thresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = Weights::default();
        assert_eq!(weights.company_fit, 0.20);
        assert_eq!(weights.cost_stability, 0.20);
        assert_eq!(weights.manufacturability, 0.15);
        assert_eq!(weights.customer_acceptance, 0.15);
        assert_eq!(weights.repurchase, 0.20);
    }

    #[test]
    fn test_default_weights_sum_to_090() {
        // Documented property of the default set, not a bug.
        assert!((Weights::default().sum() - 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.go, 3.2);
        assert_eq!(thresholds.hold, 3.0);
    }

    #[test]
    fn test_get_matches_fields() {
        let weights = Weights::default();
        assert_eq!(weights.get(RatingField::CompanyFit), 0.20);
        assert_eq!(weights.get(RatingField::Manufacturability), 0.15);
        assert_eq!(weights.get(RatingField::Repurchase), 0.20);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_weights_fill_defaults() {
        let yaml = r#"
company_fit: 0.30
repurchase: 0.10
"#;
        let weights: Weights = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(weights.company_fit, 0.30);
        assert_eq!(weights.repurchase, 0.10);
        // Unspecified fields keep their defaults.
        assert_eq!(weights.cost_stability, 0.20);
        assert_eq!(weights.manufacturability, 0.15);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
thresholds:
  go: 3.5
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.thresholds.go, 3.5);
        assert_eq!(config.thresholds.hold, 3.0);
        assert_eq!(config.weights, Weights::default());
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let yaml = "{}";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = r#"
weights:
  company_fit: 0.20
  brand_story: 0.10
"#;
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
