//! Stage-gate scoring for food-product concepts: weighted validation
//! scores, GO/HOLD/DROP gate decisions, and concept-list parsing.

pub mod cache;
pub mod concepts;
pub mod config;
pub mod output;
pub mod scoring;
