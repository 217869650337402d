//! Axum route handlers for the Match API, plus the pipeline they share:
//! terminology normalization → field extraction → industry detection →
//! field score → similarity signals → fusion → recommendation.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::SkillsCatalog;
use crate::errors::AppError;
use crate::extraction::{self, IndustryScoreVector, StructuredRecord};
use crate::matching::field_score;
use crate::matching::fusion::{fuse, Confidence, SimilarityPair};
use crate::matching::recommendation::Recommendation;
use crate::matching::skills_gap::{self, SkillsGap};
use crate::similarity::{MatchClassifier, MethodSelection, SimilarityBackend, SimilarityMethod};
use crate::state::AppState;
use crate::text::{clean, normalize_terms};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub cv_text: String,
    pub jd_text: String,
    #[serde(default)]
    pub method: MethodSelection,
}

#[derive(Debug, Serialize)]
pub struct DocumentAnalysis {
    pub industry: String,
    pub industry_scores: IndustryScoreVector,
    pub record: StructuredRecord,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    /// Final fused similarity in [0,100].
    pub similarity_score: f64,
    /// Probability-like score from the optional classifier; omitted when the
    /// classifier is not configured or failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub doc2vec_similarity: Option<f64>,
    pub sbert_similarity: Option<f64>,
    /// Weighted structured-field compatibility in [0,100].
    pub field_score: f64,
    pub cv: DocumentAnalysis,
    pub jd: DocumentAnalysis,
    pub recommendation: &'static str,
    pub recommendation_band: Recommendation,
    pub confidence_level: Confidence,
    pub method_reliability: String,
    pub methods_used: Vec<String>,
    pub match_skills: String,
    pub missing_skills: String,
}

#[derive(Debug, Serialize)]
pub struct PreprocessingImpact {
    pub original_length: usize,
    pub processed_length: usize,
    pub reduction_percent: f64,
    pub sample: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub cv: PreprocessingImpact,
    pub jd: PreprocessingImpact,
    pub doc2vec_similarity: Option<f64>,
    pub sbert_similarity: Option<f64>,
    pub classifier_configured: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Text-based matching: full extraction + scoring + fusion pipeline.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    validate_texts(&request.cv_text, &request.jd_text)?;

    let response = run_match(
        &state.catalog,
        state.similarity.as_ref(),
        state.classifier.as_deref(),
        &request.cv_text,
        &request.jd_text,
        request.method,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/match/files
///
/// Multipart matching: each side comes either as an uploaded file
/// (`cv_file` / `jd_file`) or as a plain text field (`cv_text` / `jd_text`).
pub async fn handle_match_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut cv_text: Option<String> = None;
    let mut jd_text: Option<String> = None;
    let mut method = MethodSelection::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "cv_file" | "jd_file" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation(format!("'{name}' has no filename")))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                let text = state.readers.read(&filename, &bytes)?;
                if name == "cv_file" {
                    cv_text = Some(text);
                } else {
                    jd_text = Some(text);
                }
            }
            "cv_text" | "jd_text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                if name == "cv_text" {
                    cv_text.get_or_insert(text);
                } else {
                    jd_text.get_or_insert(text);
                }
            }
            "method" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read 'method': {e}")))?;
                method = serde_json::from_value(serde_json::Value::String(raw.clone()))
                    .map_err(|_| AppError::Validation(format!("Unknown method '{raw}'")))?;
            }
            // Extra form fields from older clients are skipped, not rejected.
            other => {
                debug!("Ignoring unrecognized multipart field '{other}'");
            }
        }
    }

    let cv_text = cv_text
        .ok_or_else(|| AppError::Validation("Either cv_file or cv_text must be provided".into()))?;
    let jd_text = jd_text
        .ok_or_else(|| AppError::Validation("Either jd_file or jd_text must be provided".into()))?;
    validate_texts(&cv_text, &jd_text)?;

    let response = run_match(
        &state.catalog,
        state.similarity.as_ref(),
        state.classifier.as_deref(),
        &cv_text,
        &jd_text,
        method,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/match/analyze
///
/// Debug endpoint: shows preprocessing impact and the raw per-method
/// similarities without fusing them.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_texts(&request.cv_text, &request.jd_text)?;

    let cv_cleaned = clean(&request.cv_text);
    let jd_cleaned = clean(&request.jd_text);

    let pair = gather_similarities(
        state.similarity.as_ref(),
        request.method,
        &request.cv_text,
        &request.jd_text,
        &cv_cleaned,
        &jd_cleaned,
    )
    .await;

    Ok(Json(AnalyzeResponse {
        cv: preprocessing_impact(&request.cv_text, &cv_cleaned),
        jd: preprocessing_impact(&request.jd_text, &jd_cleaned),
        doc2vec_similarity: pair.doc2vec,
        sbert_similarity: pair.sbert,
        classifier_configured: state.classifier.is_some(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The match pipeline shared by the text and file handlers. Pure over its
/// inputs apart from the two collaborator calls.
pub async fn run_match(
    catalog: &SkillsCatalog,
    similarity: &dyn SimilarityBackend,
    classifier: Option<&dyn MatchClassifier>,
    cv_text: &str,
    jd_text: &str,
    method: MethodSelection,
) -> Result<MatchResponse, AppError> {
    // Terminology normalization feeds both extraction and industry detection.
    let cv_normalized = normalize_terms(cv_text);
    let jd_normalized = normalize_terms(jd_text);

    let known_skills = catalog.all_skills();
    let cv_record = extraction::extract(&cv_normalized, &known_skills);
    let jd_record = extraction::extract(&jd_normalized, &known_skills);

    let (cv_industry, cv_industry_scores) = extraction::detect(&cv_normalized, catalog);
    let (jd_industry, jd_industry_scores) = extraction::detect(&jd_normalized, catalog);

    let field_score = field_score::score(&cv_record, &jd_record);

    // Doc2vec consumes cleaned text, sbert the raw text, mirroring how each
    // model was trained.
    let cv_cleaned = clean(cv_text);
    let jd_cleaned = clean(jd_text);
    let pair = gather_similarities(
        similarity, method, cv_text, jd_text, &cv_cleaned, &jd_cleaned,
    )
    .await;

    let fusion = fuse(pair)?;

    let match_score = match (classifier, pair.sbert) {
        (Some(classifier), Some(sbert)) => classifier.predict(sbert / 100.0).await,
        _ => None,
    };

    let gap: SkillsGap =
        skills_gap::analyze(&cv_record.skills, &jd_record.skills, fusion.final_score);

    let band = Recommendation::for_score(fusion.final_score);

    Ok(MatchResponse {
        similarity_score: fusion.final_score,
        match_score,
        doc2vec_similarity: pair.doc2vec,
        sbert_similarity: pair.sbert,
        field_score,
        cv: DocumentAnalysis {
            industry: cv_industry,
            industry_scores: cv_industry_scores,
            record: cv_record,
        },
        jd: DocumentAnalysis {
            industry: jd_industry,
            industry_scores: jd_industry_scores,
            record: jd_record,
        },
        recommendation: band.message(),
        recommendation_band: band,
        confidence_level: fusion.confidence,
        method_reliability: fusion.explanation,
        methods_used: fusion.methods_used,
        match_skills: gap.matched_summary,
        missing_skills: gap.missing_summary,
    })
}

async fn gather_similarities(
    similarity: &dyn SimilarityBackend,
    method: MethodSelection,
    cv_raw: &str,
    jd_raw: &str,
    cv_cleaned: &str,
    jd_cleaned: &str,
) -> SimilarityPair {
    let doc2vec = if method.includes(SimilarityMethod::Doc2vec) {
        similarity
            .compare(SimilarityMethod::Doc2vec, cv_cleaned, jd_cleaned)
            .await
    } else {
        None
    };

    let sbert = if method.includes(SimilarityMethod::Sbert) {
        similarity
            .compare(SimilarityMethod::Sbert, cv_raw, jd_raw)
            .await
    } else {
        None
    };

    SimilarityPair { doc2vec, sbert }
}

fn validate_texts(cv_text: &str, jd_text: &str) -> Result<(), AppError> {
    if cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text cannot be empty".to_string()));
    }
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    Ok(())
}

fn preprocessing_impact(original: &str, processed: &str) -> PreprocessingImpact {
    let reduction = if original.is_empty() {
        0.0
    } else {
        (1.0 - processed.len() as f64 / original.len() as f64) * 100.0
    };
    let sample: String = processed.chars().take(200).collect();

    PreprocessingImpact {
        original_length: original.len(),
        processed_length: processed.len(),
        reduction_percent: (reduction * 100.0).round() / 100.0,
        sample,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic backend returning fixed scores per method.
    struct FixedBackend {
        doc2vec: Option<f64>,
        sbert: Option<f64>,
    }

    #[async_trait]
    impl SimilarityBackend for FixedBackend {
        async fn compare(
            &self,
            method: SimilarityMethod,
            _cv_text: &str,
            _jd_text: &str,
        ) -> Option<f64> {
            match method {
                SimilarityMethod::Doc2vec => self.doc2vec,
                SimilarityMethod::Sbert => self.sbert,
            }
        }
    }

    struct FixedClassifier(f64);

    #[async_trait]
    impl MatchClassifier for FixedClassifier {
        async fn predict(&self, _normalized_similarity: f64) -> Option<f64> {
            Some(self.0)
        }
    }

    fn catalog() -> SkillsCatalog {
        SkillsCatalog::parse("[tech]\npython, sql, docker\n[marketing]\nseo, branding\n").unwrap()
    }

    const CV: &str = "Senior Python developer, 5 years of experience, fluent English, bachelor degree. Knows SQL.";
    const JD: &str = "Looking for a Python engineer with SQL and Docker, 3 years of experience, university degree required.";

    #[tokio::test]
    async fn test_run_match_full_pipeline() {
        let backend = FixedBackend {
            doc2vec: Some(78.0),
            sbert: Some(82.0),
        };
        let response = run_match(&catalog(), &backend, None, CV, JD, MethodSelection::Both)
            .await
            .unwrap();

        assert_eq!(response.similarity_score, 81.2);
        assert_eq!(response.confidence_level, Confidence::High);
        assert_eq!(response.recommendation_band, Recommendation::ReadyToSubmit);
        assert_eq!(response.cv.industry, "tech");
        assert_eq!(response.jd.industry, "tech");
        assert_eq!(response.cv.record.experience_years, 5);
        assert_eq!(response.jd.record.experience_years, 3);
        // CV covers python + sql of the JD's three skills
        assert_eq!(response.cv.record.skills, vec!["python", "sql"]);
        assert!(response.match_skills.contains("python"));
        assert!(response.missing_skills.contains("docker"));
        assert!(response.match_score.is_none());
    }

    #[tokio::test]
    async fn test_run_match_no_signal_is_error() {
        let backend = FixedBackend {
            doc2vec: None,
            sbert: None,
        };
        let err = run_match(&catalog(), &backend, None, CV, JD, MethodSelection::Both)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fusion(_)));
    }

    #[tokio::test]
    async fn test_run_match_method_selection_restricts_signals() {
        let backend = FixedBackend {
            doc2vec: Some(40.0),
            sbert: Some(90.0),
        };
        let response = run_match(&catalog(), &backend, None, CV, JD, MethodSelection::Sbert)
            .await
            .unwrap();
        assert!(response.doc2vec_similarity.is_none());
        assert_eq!(response.similarity_score, 90.0);
        assert_eq!(response.methods_used, vec!["sbert"]);
    }

    #[tokio::test]
    async fn test_run_match_classifier_feeds_match_score() {
        let backend = FixedBackend {
            doc2vec: None,
            sbert: Some(80.0),
        };
        let classifier = FixedClassifier(74.5);
        let response = run_match(
            &catalog(),
            &backend,
            Some(&classifier),
            CV,
            JD,
            MethodSelection::Both,
        )
        .await
        .unwrap();
        assert_eq!(response.match_score, Some(74.5));
    }

    #[tokio::test]
    async fn test_run_match_classifier_skipped_without_sbert() {
        let backend = FixedBackend {
            doc2vec: Some(60.0),
            sbert: None,
        };
        let classifier = FixedClassifier(74.5);
        let response = run_match(
            &catalog(),
            &backend,
            Some(&classifier),
            CV,
            JD,
            MethodSelection::Both,
        )
        .await
        .unwrap();
        // classifier consumes the sbert signal only; absent sbert → no score
        assert!(response.match_score.is_none());
    }

    #[tokio::test]
    async fn test_match_files_ignores_unrecognized_fields() {
        use std::sync::Arc;

        use axum::body::{to_bytes, Body};
        use axum::http::{header, Method, Request, StatusCode};
        use tower::ServiceExt;

        use crate::config::Config;
        use crate::document::ReaderChain;
        use crate::routes::build_router;
        use crate::state::AppState;

        let state = AppState {
            config: Config {
                embedding_service_url: "http://localhost:9".to_string(),
                classifier_url: None,
                skills_catalog_path: "unused".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            catalog: Arc::new(catalog()),
            similarity: Arc::new(FixedBackend {
                doc2vec: Some(78.0),
                sbert: Some(82.0),
            }),
            classifier: None,
            readers: Arc::new(ReaderChain::default()),
        };
        let app = build_router(state);

        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"cv_text\"\r\n\r\n{CV}\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"jd_text\"\r\n\r\n{JD}\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"client_version\"\r\n\r\n1.2.3\r\n\
             --{boundary}--\r\n"
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/match/files")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        // the extra field is skipped and the match still runs
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["similarity_score"], 81.2);
    }

    #[test]
    fn test_validate_rejects_empty_inputs() {
        assert!(validate_texts("", "jd").is_err());
        assert!(validate_texts("cv", "   ").is_err());
        assert!(validate_texts("cv", "jd").is_ok());
    }

    #[test]
    fn test_preprocessing_impact_reduction() {
        let impact = preprocessing_impact("The Quick Brown Fox!", "quick brown fox");
        assert_eq!(impact.original_length, 20);
        assert_eq!(impact.processed_length, 15);
        assert!(impact.reduction_percent > 0.0);
    }
}
