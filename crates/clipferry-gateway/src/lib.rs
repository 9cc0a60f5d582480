// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liveness HTTP endpoint built on axum.
//!
//! Purely for external uptime monitors: `GET /` answers with a static
//! confirmation string and `GET /health` with a small JSON document. The
//! server runs as an isolated task with no business semantics and no
//! shared state with the relay pipeline.

use std::time::Instant;

use axum::{extract::State, routing::get, Json, Router};
use clipferry_config::model::GatewayConfig;
use clipferry_core::RelayError;
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Static confirmation string for uptime checks.
const LIVENESS_TEXT: &str = "✅ clipferry is up and relaying!";

/// State shared by the liveness handlers.
#[derive(Clone)]
pub struct LivenessState {
    /// Process start time for uptime calculation.
    start_time: Instant,
}

impl LivenessState {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for LivenessState {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// Builds the liveness router.
pub fn router(state: LivenessState) -> Router {
    Router::new()
        .route("/", get(get_liveness))
        .route("/health", get(get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / — the confirmation string uptime monitors poll for.
async fn get_liveness() -> &'static str {
    LIVENESS_TEXT
}

/// GET /health — machine-readable liveness.
async fn get_health(State(state): State<LivenessState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Binds the configured address and serves the liveness routes forever.
///
/// A bind failure is a startup error; once serving, this only returns if
/// the server itself fails.
pub async fn serve(config: &GatewayConfig) -> Result<(), RelayError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::Channel {
            message: format!("failed to bind liveness endpoint to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("liveness endpoint listening on {addr}");

    axum::serve(listener, router(LivenessState::new()))
        .await
        .map_err(|e| RelayError::Channel {
            message: format!("liveness endpoint error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
