use serde::{Deserialize, Serialize};

/// One model-proposed product concept.
///
/// This is the record schema the surrounding application asks the model to
/// emit, one object per concept. Unknown keys are tolerated (models pad
/// their replies), but all five fields are required: a concept without a
/// `score` is a parse error, not a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConcept {
    pub name: String,
    pub flavor: String,
    pub functionality: String,
    pub target: String,
    /// The model's own 0-5 assessment of the concept. Not a gate score.
    pub score: f64,
}

/// Sort concepts by model score, best first. Ties keep their input order;
/// NaN scores sink to the end.
pub fn rank_concepts(mut concepts: Vec<ProductConcept>) -> Vec<ProductConcept> {
    concepts.sort_by(|a, b| {
        match (a.score.is_nan(), b.score.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => b
                .score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal),
        }
    });
    concepts
}

/// Rank, then keep only the best `n` concepts.
pub fn top_concepts(concepts: Vec<ProductConcept>, n: usize) -> Vec<ProductConcept> {
    let mut ranked = rank_concepts(concepts);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(name: &str, score: f64) -> ProductConcept {
        ProductConcept {
            name: name.to_string(),
            flavor: "yuzu".to_string(),
            functionality: "low sugar".to_string(),
            target: "20s office workers".to_string(),
            score,
        }
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank_concepts(vec![
            concept("b", 3.1),
            concept("a", 4.5),
            concept("c", 2.0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let ranked = rank_concepts(vec![
            concept("first", 3.0),
            concept("second", 3.0),
            concept("third", 3.0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nan_sinks_to_end() {
        let ranked = rank_concepts(vec![
            concept("nan", f64::NAN),
            concept("low", 1.0),
            concept("high", 4.0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["high", "low", "nan"]);
    }

    #[test]
    fn test_top_truncates_after_ranking() {
        let top = top_concepts(
            vec![concept("b", 3.0), concept("a", 4.0), concept("c", 2.0)],
            2,
        );
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "a");
        assert_eq!(top[1].name, "b");
    }

    #[test]
    fn test_top_larger_than_input() {
        let top = top_concepts(vec![concept("only", 3.0)], 5);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_unknown_keys_tolerated() {
        let concept: ProductConcept = serde_json::from_str(
            r#"{"name": "Yuzu Sparkle", "flavor": "yuzu", "functionality": "vitamin C",
                "target": "students", "score": 4.2, "tagline": "extra"}"#,
        )
        .unwrap();
        assert_eq!(concept.name, "Yuzu Sparkle");
        assert_eq!(concept.score, 4.2);
    }

    #[test]
    fn test_missing_score_is_error() {
        let result: Result<ProductConcept, _> = serde_json::from_str(
            r#"{"name": "No Score", "flavor": "plain", "functionality": "none",
                "target": "everyone"}"#,
        );
        assert!(result.is_err());
    }
}
