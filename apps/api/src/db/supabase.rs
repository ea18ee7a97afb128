/// Supabase client — the single point of entry for all persistence calls.
///
/// Talks to the PostgREST endpoint directly: `POST /rest/v1/{table}` with
/// `Prefer: return=representation`, so inserts echo the stored rows back and
/// the sink-assigned `candidate_id` can be read from the response.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::db::CandidateSink;
use crate::errors::PipelineError;
use crate::models::record::CandidateRecord;

const CANDIDATES: &str = "candidates";
const CANDIDATE_SKILLS: &str = "candidate_skills";
const CANDIDATE_LINKS: &str = "candidate_links";
const CANDIDATE_EXPERIENCE: &str = "candidate_experience";

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Inserts one row and returns the representation rows — the `data`
    /// field of the response envelope. HTTP-level failures are `Err`; a
    /// successful response with no rows is returned as an empty vec for the
    /// caller to interpret.
    async fn insert(&self, table: &str, payload: &Value) -> Result<Vec<Value>, PipelineError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await
            .map_err(|e| PipelineError::Persistence(format!("insert into {table}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Persistence(format!(
                "insert into {table}: HTTP {status}: {body}"
            )));
        }

        let rows: Vec<Value> = response.json().await.map_err(|e| {
            PipelineError::Persistence(format!("insert into {table}: bad response body: {e}"))
        })?;

        debug!("Inserted {} row(s) into {table}", rows.len());
        Ok(rows)
    }

    /// Builds the PostgREST equality lookup. The filter value goes through
    /// the query builder so reserved characters in the email are
    /// percent-encoded instead of splitting the query string.
    fn select_by_email(&self, email: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{CANDIDATES}", self.base_url);
        self.client
            .get(&url)
            .query(&[("select", "*".to_string()), ("email", format!("eq.{email}"))])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}

#[async_trait]
impl CandidateSink for SupabaseClient {
    async fn insert_candidate(
        &self,
        record: &CandidateRecord,
    ) -> Result<Vec<Value>, PipelineError> {
        let payload = serde_json::to_value(record)?;
        self.insert(CANDIDATES, &payload).await
    }

    async fn insert_skill(
        &self,
        candidate_id: i64,
        skill_name: &str,
    ) -> Result<(), PipelineError> {
        self.insert(
            CANDIDATE_SKILLS,
            &json!({
                "candidate_id": candidate_id,
                "skill_name": skill_name,
            }),
        )
        .await
        .map(|_| ())
    }

    async fn insert_link(
        &self,
        candidate_id: i64,
        platform: &str,
        link: &str,
    ) -> Result<(), PipelineError> {
        self.insert(
            CANDIDATE_LINKS,
            &json!({
                "candidate_id": candidate_id,
                "platform": platform,
                "link": link,
            }),
        )
        .await
        .map(|_| ())
    }

    async fn insert_experience(
        &self,
        candidate_id: i64,
        years_of_experience: usize,
        description: &str,
    ) -> Result<(), PipelineError> {
        self.insert(
            CANDIDATE_EXPERIENCE,
            &json!({
                "candidate_id": candidate_id,
                "years_of_experience": years_of_experience,
                "experience_description": description,
            }),
        )
        .await
        .map(|_| ())
    }

    async fn get_candidate_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Value>, PipelineError> {
        let response = self
            .select_by_email(email)
            .send()
            .await
            .map_err(|e| PipelineError::Persistence(format!("select from {CANDIDATES}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Persistence(format!(
                "select from {CANDIDATES}: HTTP {status}: {body}"
            )));
        }

        let mut rows: Vec<Value> = response.json().await.map_err(|e| {
            PipelineError::Persistence(format!("select from {CANDIDATES}: bad body: {e}"))
        })?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }
}
