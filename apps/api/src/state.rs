use std::sync::Arc;

use crate::config::Config;
use crate::db::CandidateSink;
use crate::github::EvidenceSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Evidence source behind a trait object so tests swap in a fake.
    pub github: Arc<dyn EvidenceSource>,
    /// Persistence sink behind a trait object so tests swap in a fake.
    pub sink: Arc<dyn CandidateSink>,
    pub config: Config,
}
