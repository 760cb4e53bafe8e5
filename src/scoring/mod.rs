pub mod config;
pub mod decision;
pub mod engine;
pub mod ratings;
pub mod validation;

pub use config::{ScoringConfig, Thresholds, Weights};
pub use decision::{classify, Decision};
pub use engine::{compute_score, evaluate, Evaluation, ScoreResult, WeightedTerm};
pub use ratings::{InvalidRating, RatingField, RatingSet};
pub use validation::validate_scoring;
