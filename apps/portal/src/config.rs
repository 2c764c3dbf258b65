use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portal backend, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    /// Where the session token + profile pair is persisted between runs.
    pub credentials_path: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("PORTAL_API_URL")?,
            credentials_path: std::env::var("PORTAL_CREDENTIALS_PATH")
                .unwrap_or_else(|_| ".portal-credentials.json".to_string())
                .into(),
            request_timeout: Duration::from_secs(
                std::env::var("PORTAL_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("PORTAL_REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
