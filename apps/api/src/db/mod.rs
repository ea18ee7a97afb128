//! Persistence sink for candidate records.
//!
//! The sink is an explicit seam: handlers and the assembler hold an
//! `Arc<dyn CandidateSink>`, so tests inject an in-memory fake and never
//! touch the network. The production implementation is `SupabaseClient`.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::PipelineError;
use crate::models::record::CandidateRecord;

pub mod supabase;

pub use supabase::SupabaseClient;

/// Insert/query contract against the candidate tables. The sink owns
/// identifier assignment: `insert_candidate` returns the response envelope's
/// row array, and callers read the assigned `candidate_id` out of the first
/// row. An empty array signals insert failure, not an `Err`.
#[async_trait]
pub trait CandidateSink: Send + Sync {
    async fn insert_candidate(
        &self,
        record: &CandidateRecord,
    ) -> Result<Vec<Value>, PipelineError>;

    async fn insert_skill(
        &self,
        candidate_id: i64,
        skill_name: &str,
    ) -> Result<(), PipelineError>;

    /// Stores the link username in the `link` column, per the existing
    /// schema.
    async fn insert_link(
        &self,
        candidate_id: i64,
        platform: &str,
        link: &str,
    ) -> Result<(), PipelineError>;

    async fn insert_experience(
        &self,
        candidate_id: i64,
        years_of_experience: usize,
        description: &str,
    ) -> Result<(), PipelineError>;

    async fn get_candidate_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Value>, PipelineError>;
}
