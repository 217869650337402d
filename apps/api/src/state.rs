use std::sync::Arc;

use crate::catalog::SkillsCatalog;
use crate::config::Config;
use crate::document::ReaderChain;
use crate::similarity::{MatchClassifier, SimilarityBackend};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup; concurrent match requests
/// share the catalog and collaborator clients without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skills catalog, loaded once at startup (or the fallback catalog).
    pub catalog: Arc<SkillsCatalog>,
    /// Embedding-similarity collaborator. Swappable behind the trait seam.
    pub similarity: Arc<dyn SimilarityBackend>,
    /// Optional match classifier. `None` omits match_score from responses.
    pub classifier: Option<Arc<dyn MatchClassifier>>,
    /// Ordered document reader strategies for file uploads.
    pub readers: Arc<ReaderChain>,
}
