mod assemble;
mod config;
mod db;
mod errors;
mod github;
mod models;
mod normalize;
mod pipeline;
mod routes;
mod skills;
mod state;
mod verify;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::SupabaseClient;
use crate::github::{EvidenceSource, GithubClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillproof API v{}", env!("CARGO_PKG_VERSION"));

    // GitHub evidence client (unauthenticated if no token configured)
    let github: Arc<dyn EvidenceSource> = Arc::new(GithubClient::new(config.github_token.clone()));
    info!(
        authenticated = config.github_token.is_some(),
        "GitHub client initialized"
    );

    // Persistence sink (Supabase PostgREST)
    let sink = Arc::new(SupabaseClient::new(
        config.supabase_url.clone(),
        config.supabase_key.clone(),
    ));
    info!("Supabase client initialized");

    std::fs::create_dir_all(&config.data_dir)?;
    info!("Data directory: {}", config.data_dir.display());

    let state = AppState {
        github,
        sink,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
