//! Health check endpoints

use crate::metrics::BotMetrics;
use crate::shard::ShardState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub shards_total: usize,
    pub shards_ready: usize,
    pub guilds_total: u64,
    pub events_received: u64,
}

/// Application state for health endpoints
#[derive(Clone)]
pub struct AppState {
    pub shard_state: ShardState,
    pub metrics: Arc<BotMetrics>,
}

/// Create the health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health endpoint - always returns 200 if process is running
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness endpoint - returns 200 if at least one shard is ready
async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = ReadyResponse {
        ready: state.shard_state.is_ready(),
        shards_total: state.shard_state.shard_count(),
        shards_ready: state.shard_state.ready_shards(),
        guilds_total: state.shard_state.total_guilds(),
        events_received: state.shard_state.total_events_received(),
    };

    if response.ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Metrics endpoint - returns Prometheus format metrics
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state
        .metrics
        .set_shards_ready(state.shard_state.ready_shards());

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}
