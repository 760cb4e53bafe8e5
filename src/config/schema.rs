use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

/// Top-level config file shape (~/.config/stagegate/config.yaml).
///
/// Every section has a built-in default, so an empty or absent file is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mapping_is_default() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
scoring:
  weights:
    company_fit: 0.25
    cost_stability: 0.20
    manufacturability: 0.15
    customer_acceptance: 0.15
    repurchase: 0.25
  thresholds:
    go: 3.4
    hold: 3.1
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.scoring.weights.company_fit, 0.25);
        assert_eq!(config.scoring.thresholds.go, 3.4);
        assert_eq!(config.scoring.thresholds.hold, 3.1);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
