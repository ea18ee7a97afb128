use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::pipeline::{run_pipeline, PipelinePaths, PipelineReport};
use crate::state::AppState;

/// POST /api/v1/candidates/process
///
/// Runs the full pipeline over the configured data directory, bounded by the
/// configured wall-clock timeout. On timeout the run is abandoned and
/// reported as such — never silently retried.
pub async fn handle_process(
    State(state): State<AppState>,
) -> Result<Json<PipelineReport>, AppError> {
    let paths = PipelinePaths::in_dir(&state.config.data_dir);
    let timeout_secs = state.config.pipeline_timeout_secs;

    let report = tokio::time::timeout(
        std::time::Duration::from_secs(timeout_secs),
        run_pipeline(state.github.as_ref(), state.sink.as_ref(), &paths),
    )
    .await
    .map_err(|_| AppError::Timeout(timeout_secs))??;

    Ok(Json(report))
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// GET /api/v1/candidates?email=...
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let candidate = state
        .sink
        .get_candidate_by_email(&params.email)
        .await
        .map_err(AppError::Pipeline)?
        .ok_or_else(|| AppError::NotFound(format!("No candidate with email {}", params.email)))?;
    Ok(Json(candidate))
}
