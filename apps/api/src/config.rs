use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    /// Optional GitHub token. Unauthenticated requests work but are heavily
    /// rate-limited, so set one for anything beyond local experiments.
    pub github_token: Option<String>,
    /// Directory holding the on-disk hand-off files
    /// (`extracted_pdf_data.json`, `resume_got_off.json`, ...).
    pub data_dir: PathBuf,
    /// Hard wall-clock ceiling for one whole pipeline run.
    pub pipeline_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            supabase_url: require_env("SUPABASE_URL")?,
            supabase_key: require_env("SUPABASE_KEY")?,
            github_token: std::env::var("GITHUB_TOKEN").ok(),
            data_dir: PathBuf::from(
                std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            ),
            pipeline_timeout_secs: std::env::var("PIPELINE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse::<u64>()
                .context("PIPELINE_TIMEOUT_SECS must be a number of seconds")?,
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
