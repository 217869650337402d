//! Optional match classifier: converts a normalized similarity into a
//! probability-like match score. Absence (no client configured, or a failed
//! call) means the field is omitted from the response — never defaulted to
//! zero.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Classifier contract: `predict(similarity in [0,1]) -> Some(score in [0,100])`.
#[async_trait]
pub trait MatchClassifier: Send + Sync {
    async fn predict(&self, normalized_similarity: f64) -> Option<f64>;
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    similarity: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    match_probability: f64,
}

/// Client for the classifier service's `POST {base}/predict` endpoint.
#[derive(Clone)]
pub struct ClassifierClient {
    client: Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MatchClassifier for ClassifierClient {
    async fn predict(&self, normalized_similarity: f64) -> Option<f64> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest {
            similarity: normalized_similarity,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("classifier prediction failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("classifier returned {}", response.status());
            return None;
        }

        match response.json::<PredictResponse>().await {
            Ok(parsed) if parsed.match_probability.is_finite() => {
                Some(parsed.match_probability.clamp(0.0, 100.0))
            }
            Ok(parsed) => {
                warn!("classifier returned non-finite score {}", parsed.match_probability);
                None
            }
            Err(e) => {
                warn!("classifier returned malformed body: {e}");
                None
            }
        }
    }
}
