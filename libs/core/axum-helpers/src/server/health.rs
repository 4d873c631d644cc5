use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub services: BTreeMap<String, &'static str>,
}

/// Liveness check: `GET /health` answers a plain-text `OK`.
pub fn health_router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

/// Runs the named checks concurrently; 503 if any of them fails.
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> Response {
    let names: Vec<String> = checks.iter().map(|(name, _)| name.to_string()).collect();
    let results = join_all(checks.into_iter().map(|(_, check)| check)).await;

    let mut services = BTreeMap::new();
    let mut ready = true;
    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(()) => {
                services.insert(name, "connected");
            }
            Err(e) => {
                tracing::error!(service = %name, error = %e, "Readiness check failed");
                services.insert(name, "disconnected");
                ready = false;
            }
        }
    }

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadyResponse { ready, services })).into_response()
}
