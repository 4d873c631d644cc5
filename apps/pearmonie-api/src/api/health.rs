//! Readiness check backed by a database ping.

use crate::state::AppState;
use axum::{extract::State, response::Response};
use axum_helpers::{HealthCheckFuture, run_health_checks};

/// Reports `database` when Postgres is configured. In-memory storage has
/// nothing to check and is always ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = &state.db {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        ));
    }

    run_health_checks(checks).await
}
