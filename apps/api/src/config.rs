use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external embedding service (doc2vec + sbert).
    pub embedding_service_url: String,
    /// Base URL of the optional match classifier. `None` disables the feature.
    pub classifier_url: Option<String>,
    /// Path to the skills catalog file. A missing file triggers the fallback catalog.
    pub skills_catalog_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            embedding_service_url: require_env("EMBEDDING_SERVICE_URL")?,
            classifier_url: std::env::var("CLASSIFIER_URL").ok(),
            skills_catalog_path: std::env::var("SKILLS_CATALOG_PATH")
                .unwrap_or_else(|_| "data/skills.ini".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
