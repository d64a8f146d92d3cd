mod config;
mod models;
mod routes;
mod services;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::cinemeta::CinemetaClient;
use crate::services::moviebox::MovieboxClient;
use crate::services::pipeline::Pipeline;

/// Application state shared across handlers
pub struct AppState {
    pub pipeline: Pipeline,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviebox_addon=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("Starting Moviebox addon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Metadata service: {}", config.cinemeta_url);
    tracing::info!("Content index: {}", config.moviebox_url);

    // One client per collaborator for the process lifetime; handlers share
    // them read-only through the pipeline
    let metadata = Arc::new(CinemetaClient::new(&config.cinemeta_url, &config.user_agent));
    let index = Arc::new(MovieboxClient::new(
        &config.moviebox_url,
        config.index_timeout_secs,
        &config.user_agent,
    ));

    // Build application state
    let state = Arc::new(AppState {
        pipeline: Pipeline::new(metadata, index),
        start_time: Instant::now(),
    });

    // Build router
    let app = Router::new()
        .route("/", get(routes::manifest::manifest))
        .route("/manifest.json", get(routes::manifest::manifest))
        .route("/health", get(routes::health::health_check))
        .route("/stream/:media_type/:id", get(routes::stream::get_streams))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes on ctrl-c so in-flight requests drain and collaborator
/// connection pools close before the process exits
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
