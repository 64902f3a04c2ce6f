use anyhow::{Context, Result};

/// Default function slug invoked on the completion endpoint when
/// MUSE_FUNCTION env var is not set
pub const DEFAULT_FUNCTION: &str = "generate-completion";

/// Application configuration from environment
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub project_id: String,
    pub public_key: String,
    pub function: String,
}

impl Config {
    /// Load configuration from .env file and environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Not an error if .env is missing

        let endpoint = std::env::var("MUSE_ENDPOINT").context("MUSE_ENDPOINT not set")?;
        let endpoint = normalize_endpoint(&endpoint)?;

        let project_id = std::env::var("MUSE_PROJECT_ID").context("MUSE_PROJECT_ID not set")?;

        let public_key = std::env::var("MUSE_PUBLIC_KEY").context("MUSE_PUBLIC_KEY not set")?;

        let function =
            std::env::var("MUSE_FUNCTION").unwrap_or_else(|_| DEFAULT_FUNCTION.to_string());

        Ok(Self {
            endpoint,
            project_id,
            public_key,
            function,
        })
    }

    /// Full URL of the completion function
    pub fn function_url(&self) -> String {
        format!("{}/functions/{}", self.endpoint, self.function)
    }
}

/// Validate the endpoint and strip any trailing slash
fn normalize_endpoint(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("MUSE_ENDPOINT is empty");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        anyhow::bail!("MUSE_ENDPOINT must start with http:// or https://");
    }
    Ok(trimmed.to_string())
}
