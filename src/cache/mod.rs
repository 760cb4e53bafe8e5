use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scoring::{RatingSet, Weights};

/// One cached evaluation: the inputs, the score they produced, and when.
///
/// The decision is deliberately not stored. A score is a pure function of
/// the key, so an entry can never go stale; the decision is recomputed under
/// whatever thresholds are configured at read time, which is what lets a
/// threshold change re-gate old evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEvaluation {
    pub ratings: RatingSet,
    pub weights: Weights,
    pub score: f64,
    pub evaluated_at: DateTime<Utc>,
}

// Key payload with declaration-order serialization, so equal inputs always
// produce byte-equal keys.
#[derive(Serialize)]
struct KeyInputs<'a> {
    ratings: &'a RatingSet,
    weights: &'a Weights,
}

/// Canonical cache key for one (ratings, weights) input pair.
pub fn cache_key(ratings: &RatingSet, weights: &Weights) -> String {
    let inputs = KeyInputs { ratings, weights };
    // Serializing structs with known field types cannot fail.
    let json = serde_json::to_string(&inputs).unwrap_or_default();
    format!("eval:{}", json)
}

/// Get the platform-appropriate cache directory for stagegate
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("stagegate/eval-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/stagegate/eval-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Read a cached evaluation. Any read or decode failure is a miss.
pub fn read_cached(cache_path: &Path, key: &str) -> Option<CachedEvaluation> {
    let bytes = cacache::read_sync(cache_path, key).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Write an evaluation to the cache. Callers treat failure as non-fatal.
pub fn write_cached(cache_path: &Path, key: &str, entry: &CachedEvaluation) -> Result<()> {
    let json = serde_json::to_vec(entry)?;
    cacache::write_sync(cache_path, key, &json)?;
    Ok(())
}

/// List every cached evaluation, newest first. Entries that no longer
/// decode (from older releases, say) are skipped.
pub fn list_cached(cache_path: &Path) -> Vec<CachedEvaluation> {
    let mut entries: Vec<CachedEvaluation> = cacache::list_sync(cache_path)
        .filter_map(|metadata| {
            let metadata = metadata.ok()?;
            if !metadata.key.starts_with("eval:") {
                return None;
            }
            let bytes = cacache::read_sync(cache_path, &metadata.key).ok()?;
            serde_json::from_slice(&bytes).ok()
        })
        .collect();

    entries.sort_by(|a, b| b.evaluated_at.cmp(&a.evaluated_at));
    entries
}

/// Clear the evaluation cache directory. Missing directory is success.
pub fn clear_cache(cache_path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}
