#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the verification pipeline stages.
///
/// Per-repository fetch failures and per-child-row insert failures are NOT
/// represented here — those are caught where they occur, logged, and folded
/// into a tally. Only whole-stage failures propagate as `PipelineError`.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Fetch failure: {0}")]
    Fetch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    /// Wraps a stage-internal error with the name of the failing stage, so
    /// the top-level caller can report which stage broke and why.
    pub fn in_stage(stage: &'static str, source: PipelineError) -> Self {
        PipelineError::Stage {
            stage,
            source: Box::new(source),
        }
    }

    /// Reads a file, mapping a missing path to `NotFound` instead of a bare
    /// I/O error.
    pub fn read_file(path: &std::path::Path) -> Result<String, PipelineError> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PipelineError::NotFound(path.display().to_string())
            } else {
                PipelineError::Io(e)
            }
        })
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Pipeline timed out after {0}s")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Pipeline(e) => {
                tracing::error!("Pipeline error: {e}");
                let status = match e {
                    PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
                    PipelineError::MalformedInput(_) | PipelineError::InvalidJson(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "PIPELINE_ERROR", e.to_string())
            }
            AppError::Timeout(secs) => {
                tracing::error!("Pipeline timed out after {secs}s");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "PIPELINE_TIMEOUT",
                    format!("Pipeline run exceeded {secs}s and was abandoned"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_wrapping_names_the_stage() {
        let inner = PipelineError::MalformedInput("no JSON object found".to_string());
        let wrapped = PipelineError::in_stage("normalize", inner);
        let msg = wrapped.to_string();
        assert!(msg.contains("normalize"));
        assert!(msg.contains("no JSON object found"));
    }

    #[test]
    fn test_read_file_missing_maps_to_not_found() {
        let err = PipelineError::read_file(std::path::Path::new("/nonexistent/resume.json"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }
}
