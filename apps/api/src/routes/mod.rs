pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/candidates/process",
            post(handlers::handle_process),
        )
        .route("/api/v1/candidates", get(handlers::handle_get_candidate))
        .with_state(state)
}
