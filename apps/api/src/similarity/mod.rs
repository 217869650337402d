//! Similarity collaborators: the embedding-backed similarity backend and the
//! optional match classifier. The core consumes these contracts; it never
//! implements an embedding model itself.

pub mod classifier;
pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use classifier::MatchClassifier;
pub use client::EmbeddingServiceClient;

/// The two embedding-similarity methods the fusion engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMethod {
    Doc2vec,
    Sbert,
}

impl SimilarityMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMethod::Doc2vec => "doc2vec",
            SimilarityMethod::Sbert => "sbert",
        }
    }
}

/// Which methods a match request wants to run. Defaults to both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodSelection {
    Doc2vec,
    Sbert,
    #[default]
    Both,
}

impl MethodSelection {
    pub fn includes(&self, method: SimilarityMethod) -> bool {
        matches!(
            (self, method),
            (MethodSelection::Both, _)
                | (MethodSelection::Doc2vec, SimilarityMethod::Doc2vec)
                | (MethodSelection::Sbert, SimilarityMethod::Sbert)
        )
    }
}

/// Similarity backend contract: embed both texts with the named method and
/// return a similarity percentage in [0,100].
///
/// `None` means that method failed or is unavailable — a recoverable
/// condition handled at the fusion level, never an error. Carried in
/// `AppState` as `Arc<dyn SimilarityBackend>`.
#[async_trait]
pub trait SimilarityBackend: Send + Sync {
    async fn compare(&self, method: SimilarityMethod, cv_text: &str, jd_text: &str)
        -> Option<f64>;
}
