use serde::{Deserialize, Serialize};

use super::config::{ScoringConfig, Weights};
use super::decision::{classify, Decision};
use super::ratings::{RatingField, RatingSet};

/// One row of a score breakdown: how much a single rating contributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub field: RatingField,
    pub rating: u8,
    pub weight: f64,
    /// rating × weight, unrounded.
    pub contribution: f64,
}

/// A computed score plus the per-field terms that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Weighted sum rounded to two decimals.
    pub score: f64,
    pub terms: Vec<WeightedTerm>,
}

/// The full outcome of gating one rating set: score, decision, breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: f64,
    pub decision: Decision,
    pub terms: Vec<WeightedTerm>,
}

/// Compute the weighted validation score for a rating set.
///
/// `score = Σ rating_i × weight_i` over the five fields, rounded to two
/// decimal places half-away-from-zero (`(x * 100).round() / 100`). Pure:
/// identical inputs always produce identical results. Range validation
/// happened when the `RatingSet` was built, so this function is total.
pub fn compute_score(ratings: &RatingSet, weights: &Weights) -> ScoreResult {
    let terms: Vec<WeightedTerm> = RatingField::ALL
        .iter()
        .map(|&field| {
            let rating = ratings.get(field);
            let weight = weights.get(field);
            WeightedTerm {
                field,
                rating,
                weight,
                contribution: f64::from(rating) * weight,
            }
        })
        .collect();

    let total: f64 = terms.iter().map(|t| t.contribution).sum();
    ScoreResult {
        score: round2(total),
        terms,
    }
}

/// Score and classify in one step.
///
/// Either the caller already holds a valid `RatingSet` and gets a complete
/// (score, decision, breakdown) back, or construction failed earlier and
/// nothing was produced. There is no partial output.
pub fn evaluate(ratings: &RatingSet, config: &ScoringConfig) -> Evaluation {
    let result = compute_score(ratings, &config.weights);
    let decision = classify(result.score, &config.thresholds);
    Evaluation {
        score: result.score,
        decision,
        terms: result.terms,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
