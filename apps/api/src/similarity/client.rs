//! HTTP client for the external embedding service.
//!
//! The service embeds both texts with the requested method and returns a
//! cosine-similarity percentage. Any failure — transport, non-2xx status,
//! malformed body, out-of-range score — is logged and mapped to `None` so
//! the fusion engine can treat the method as absent.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SimilarityBackend, SimilarityMethod};

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct CompareRequest<'a> {
    method: &'a str,
    text_a: &'a str,
    text_b: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    similarity: f64,
}

/// Client for the embedding service's `POST {base}/compare` endpoint.
#[derive(Clone)]
pub struct EmbeddingServiceClient {
    client: Client,
    base_url: String,
}

impl EmbeddingServiceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SimilarityBackend for EmbeddingServiceClient {
    async fn compare(
        &self,
        method: SimilarityMethod,
        cv_text: &str,
        jd_text: &str,
    ) -> Option<f64> {
        let url = format!("{}/compare", self.base_url);
        let body = CompareRequest {
            method: method.as_str(),
            text_a: cv_text,
            text_b: jd_text,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("{} comparison failed: {e}", method.as_str());
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} comparison returned {status}: {body}", method.as_str());
            return None;
        }

        let parsed: CompareResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!("{} comparison returned malformed body: {e}", method.as_str());
                return None;
            }
        };

        if !parsed.similarity.is_finite() || !(0.0..=100.0).contains(&parsed.similarity) {
            warn!(
                "{} comparison returned out-of-range score {}",
                method.as_str(),
                parsed.similarity
            );
            return None;
        }

        debug!(
            "{} similarity = {:.2}",
            method.as_str(),
            parsed.similarity
        );
        Some(parsed.similarity)
    }
}
