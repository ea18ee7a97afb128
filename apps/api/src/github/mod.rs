/// GitHub client — the single point of entry for all repository-hosting API
/// calls in the service.
///
/// ARCHITECTURAL RULE: no other module may talk to the GitHub API directly.
/// All evidence fetches go through this module, so rate limiting, auth, and
/// failure defaulting live in one place.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::errors::PipelineError;

pub mod collector;

/// Fetch surface of the evidence source. `GithubClient` is the production
/// implementation; tests substitute a fake so failure-isolation paths are
/// exercisable without the network. Carried in `AppState` as
/// `Arc<dyn EvidenceSource>`.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Repository metadata object; callers read `forks_count` and
    /// `stargazers_count` from it, defaulting to 0 when absent.
    async fn repo_metadata(&self, owner: &str, name: &str) -> Result<Value, PipelineError>;

    /// Language names observed in the repository.
    async fn repo_languages(&self, owner: &str, name: &str)
        -> Result<Vec<String>, PipelineError>;

    /// Commit count of the default branch listing.
    async fn commit_count(&self, owner: &str, name: &str) -> Result<u64, PipelineError>;

    /// README text, or an inline error placeholder when unfetchable.
    async fn readme(&self, owner: &str, name: &str) -> String;
}

const GITHUB_API_URL: &str = "https://api.github.com";
const RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("skillproof-api/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Thin reqwest wrapper over the GitHub REST API and raw-content host.
/// Unauthenticated when no token is configured.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
            token,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, PipelineError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::Fetch(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Fetch(format!("GET {url}: HTTP {status}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PipelineError::Fetch(format!("GET {url}: invalid JSON body: {e}")))
    }
}

#[async_trait]
impl EvidenceSource for GithubClient {
    async fn repo_metadata(&self, owner: &str, name: &str) -> Result<Value, PipelineError> {
        self.get_json(&format!("{GITHUB_API_URL}/repos/{owner}/{name}"))
            .await
    }

    /// Language map keys; byte counts are discarded.
    async fn repo_languages(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<String>, PipelineError> {
        let value = self
            .get_json(&format!("{GITHUB_API_URL}/repos/{owner}/{name}/languages"))
            .await?;
        Ok(match value {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        })
    }

    /// Commit count: length of the commit listing when the response is an
    /// array, 0 otherwise (error objects come back as JSON objects).
    async fn commit_count(&self, owner: &str, name: &str) -> Result<u64, PipelineError> {
        let value = self
            .get_json(&format!("{GITHUB_API_URL}/repos/{owner}/{name}/commits"))
            .await?;
        Ok(match value {
            Value::Array(commits) => commits.len() as u64,
            _ => 0,
        })
    }

    /// README text from the conventional raw-content path on `main`.
    /// Never fails: network/HTTP errors come back as an inline placeholder
    /// string so one unreadable repo cannot abort the batch. Mining detects
    /// the placeholder and skips it.
    async fn readme(&self, owner: &str, name: &str) -> String {
        let url = format!("{RAW_CONTENT_URL}/{owner}/{name}/main/README.md");

        let result = async {
            let response = self.client.get(&url).send().await?;
            let response = response.error_for_status()?;
            response.text().await
        }
        .await;

        match result {
            Ok(text) => text,
            Err(e) => format!("Error fetching README from {url}: {e}"),
        }
    }
}
