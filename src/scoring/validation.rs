use super::config::ScoringConfig;
use super::ratings::RatingField;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for field in RatingField::ALL {
        let weight = config.weights.get(field);
        if !weight.is_finite() {
            errors.push(format!(
                "scoring.weights.{}: must be a finite number, got {}",
                field, weight
            ));
        } else if weight < 0.0 {
            errors.push(format!(
                "scoring.weights.{}: must be non-negative, got {}",
                field, weight
            ));
        }
    }

    if !config.thresholds.go.is_finite() {
        errors.push(format!(
            "scoring.thresholds.go: must be a finite number, got {}",
            config.thresholds.go
        ));
    }
    if !config.thresholds.hold.is_finite() {
        errors.push(format!(
            "scoring.thresholds.hold: must be a finite number, got {}",
            config.thresholds.hold
        ));
    }

    // A hold boundary above go would make HOLD unreachable.
    if config.thresholds.go.is_finite()
        && config.thresholds.hold.is_finite()
        && config.thresholds.hold > config.thresholds.go
    {
        errors.push(format!(
            "scoring.thresholds: hold ({}) must not exceed go ({})",
            config.thresholds.hold, config.thresholds.go
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
