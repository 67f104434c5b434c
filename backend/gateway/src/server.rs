//! Main HTTP Gateway Server.
//!
//! Builds the Axum router and runs the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::generate_api;
use pawtoon_pipeline::Generator;

/// Ceiling on request bodies. Slightly above the 10 MiB upload cap so the
/// ingestion layer, not the framework, produces the rejection message.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub generator: Arc<Generator>,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/generate", post(generate_api::generate_upload))
        .route("/api/generate/url", post(generate_api::generate_from_url))
        .route("/api/generate/base64", post(generate_api::generate_from_base64))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // The storefront embeds this API cross-origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);
    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler for `GET /` — liveness and service info.
async fn home() -> Json<Value> {
    Json(json!({
        "service": "pawtoon",
        "version": env!("CARGO_PKG_VERSION"),
        "generate": "/api/generate",
    }))
}

/// Handler for `GET /health`.
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
