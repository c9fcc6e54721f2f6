//! HTTP surface for the ring history.
//!
//! Two plain-text endpoints backed by the query engine:
//! `GET /raw?n=<int>` and `GET /metrics?baseline=<int>&n=<int>`.
//! Malformed or missing parameters fall back to defaults; out-of-range
//! values yield an empty body. Neither ever crashes the server. Any other
//! path gets the router's default 404.

use crate::constants::{DEFAULT_BASELINE, DEFAULT_SAMPLE_COUNT};
use crate::query::QueryEngine;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub query: Arc<QueryEngine>,
}

/// Parameters for `/raw`. Carried as strings so an unparsable value falls
/// back to the default instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct RawParams {
    pub n: Option<String>,
}

/// Parameters for `/metrics`.
#[derive(Debug, Deserialize)]
pub struct MetricsParams {
    pub baseline: Option<String>,
    pub n: Option<String>,
}

fn parse_or<T: std::str::FromStr>(param: Option<&str>, default: T) -> T {
    param.and_then(|s| s.parse().ok()).unwrap_or(default)
}

pub async fn raw_handler(
    State(state): State<AppState>,
    Query(params): Query<RawParams>,
) -> String {
    let n = parse_or(params.n.as_deref(), DEFAULT_SAMPLE_COUNT);
    debug!(n, "raw query");
    state.query.raw(n)
}

pub async fn metrics_handler(
    State(state): State<AppState>,
    Query(params): Query<MetricsParams>,
) -> String {
    let baseline = parse_or(params.baseline.as_deref(), DEFAULT_BASELINE);
    let n = parse_or(params.n.as_deref(), DEFAULT_SAMPLE_COUNT);
    debug!(baseline, n, "baseline query");
    state
        .query
        .baseline(baseline, n)
        .map(|summary| summary.render())
        .unwrap_or_default()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/raw", get(raw_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Serve until the token fires, then drain in-flight requests and return.
pub async fn run(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("stopping http server");
        })
        .await
}
