//! Similarity fusion: combines the doc2vec and sbert similarity signals into
//! one final score with a conflict-aware policy and a confidence label.
//!
//! Absence of a signal is a first-class value. A failed method must never
//! silently depress the fused score; only the total absence of signals is a
//! fatal condition for the match request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weight given to the doc2vec signal when both methods agree well enough
/// to average. Sbert carries the larger weight as the more reliable method.
const DOC2VEC_WEIGHT: f64 = 0.3;
const SBERT_WEIGHT: f64 = 0.7;

/// Disagreement (in percentage points) beyond which the sbert signal is
/// trusted alone instead of averaging.
const CONFLICT_THRESHOLD: f64 = 30.0;
/// Disagreement below which the two methods are considered to agree closely.
const AGREEMENT_THRESHOLD: f64 = 10.0;

#[derive(Debug, Error)]
pub enum FusionError {
    #[error("no similarity method produced a score")]
    NoAvailableSignal,
}

/// The two similarity signals, each in [0,100] or absent if that method was
/// unavailable or failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub doc2vec: Option<f64>,
    pub sbert: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Fused similarity outcome. A pure function of its inputs; computed once
/// per match request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub final_score: f64,
    pub confidence: Confidence,
    pub explanation: String,
    pub methods_used: Vec<String>,
}

/// Fuses the available similarity signals.
pub fn fuse(pair: SimilarityPair) -> Result<FusionResult, FusionError> {
    match (pair.doc2vec, pair.sbert) {
        (Some(a), Some(b)) => {
            let diff = (a - b).abs();
            let mut methods_used = vec!["doc2vec".to_string(), "sbert".to_string()];

            if diff > CONFLICT_THRESHOLD {
                methods_used.push("sbert_prioritized".to_string());
                Ok(FusionResult {
                    final_score: round2(b),
                    confidence: Confidence::Medium,
                    explanation: format!(
                        "Large difference detected ({diff:.1}%). SentenceTransformer prioritized."
                    ),
                    methods_used,
                })
            } else {
                let fused = DOC2VEC_WEIGHT * a + SBERT_WEIGHT * b;
                let (confidence, explanation) = if diff < AGREEMENT_THRESHOLD {
                    (
                        Confidence::High,
                        "Both methods agree closely.".to_string(),
                    )
                } else {
                    (
                        Confidence::Medium,
                        format!("Moderate difference ({diff:.1}%) between methods."),
                    )
                };
                Ok(FusionResult {
                    final_score: round2(fused),
                    confidence,
                    explanation,
                    methods_used,
                })
            }
        }
        (Some(a), None) => Ok(FusionResult {
            final_score: round2(a),
            confidence: Confidence::Low,
            explanation: "Doc2Vec only - may need model update.".to_string(),
            methods_used: vec!["doc2vec".to_string()],
        }),
        (None, Some(b)) => Ok(FusionResult {
            final_score: round2(b),
            confidence: Confidence::High,
            explanation: "SentenceTransformer only - reliable for modern text.".to_string(),
            methods_used: vec!["sbert".to_string()],
        }),
        (None, None) => Err(FusionError::NoAvailableSignal),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(doc2vec: Option<f64>, sbert: Option<f64>) -> SimilarityPair {
        SimilarityPair { doc2vec, sbert }
    }

    #[test]
    fn test_large_disagreement_prioritizes_sbert() {
        let result = fuse(pair(Some(44.15), Some(84.38))).unwrap();
        assert_eq!(result.final_score, 84.38);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.methods_used.contains(&"sbert_prioritized".to_string()));
        assert!(result.explanation.contains("Large difference"));
    }

    #[test]
    fn test_close_agreement_weighted_average_high_confidence() {
        let result = fuse(pair(Some(78.0), Some(82.0))).unwrap();
        // 0.3*78 + 0.7*82 = 81.2
        assert_eq!(result.final_score, 81.2);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.methods_used, vec!["doc2vec", "sbert"]);
    }

    #[test]
    fn test_middle_band_weighted_average_medium_confidence() {
        // diff = 20: same weighted-average formula, medium confidence
        let result = fuse(pair(Some(50.0), Some(70.0))).unwrap();
        assert_eq!(result.final_score, 64.0);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.explanation.contains("Moderate difference"));
        assert!(result.explanation.contains("20.0%"));
    }

    #[test]
    fn test_only_doc2vec_low_confidence() {
        let result = fuse(pair(Some(55.5), None)).unwrap();
        assert_eq!(result.final_score, 55.5);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.methods_used, vec!["doc2vec"]);
    }

    #[test]
    fn test_only_sbert_high_confidence() {
        let result = fuse(pair(None, Some(90.0))).unwrap();
        assert_eq!(result.final_score, 90.0);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.methods_used, vec!["sbert"]);
    }

    #[test]
    fn test_no_signal_is_fatal() {
        assert!(matches!(
            fuse(pair(None, None)),
            Err(FusionError::NoAvailableSignal)
        ));
    }

    #[test]
    fn test_boundary_diff_exactly_30_still_averages() {
        // diff == 30 is NOT a conflict; only diff > 30 triggers prioritization
        let result = fuse(pair(Some(40.0), Some(70.0))).unwrap();
        assert_eq!(result.final_score, 61.0);
        assert!(!result.methods_used.contains(&"sbert_prioritized".to_string()));
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_boundary_diff_exactly_10_is_medium() {
        let result = fuse(pair(Some(60.0), Some(70.0))).unwrap();
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_confidence_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Confidence::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&Confidence::Low).unwrap(), "\"low\"");
    }
}
