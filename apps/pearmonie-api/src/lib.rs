//! Pearmonie retail API.
//!
//! Wires the users and products domains into one axum application:
//!
//! ```text
//! /health              liveness, plain "OK"
//! /ready               readiness, database ping when configured
//! /api/login, /signup, /forgot-password, /verify-otp, /home      public
//! /api/logout                                                     checks its own token
//! /api/dashboard, /products, /products/{id}                       token middleware
//! ```

pub mod api;
pub mod config;
pub mod state;

use axum::Router;
use axum_helpers::{create_router, health_router};
use domain_products::{InMemoryProductRepository, PostgresProductRepository};
use domain_users::{
    AuthService, InMemoryTokenRepository, InMemoryUserRepository, PostgresTokenRepository,
    PostgresUserRepository,
};

use state::AppState;

/// Builds the full router for `state`, picking Postgres or in-memory
/// repositories depending on whether a database is connected.
///
/// Trailing-slash normalization is applied when serving, see
/// [`axum_helpers::normalize_trailing_slash`].
pub fn build_app(state: &AppState) -> Router {
    let api_routes = match &state.db {
        Some(db) => api::routes(
            AuthService::new(
                PostgresUserRepository::new(db.clone()),
                PostgresTokenRepository::new(db.clone()),
            ),
            PostgresProductRepository::new(db.clone()),
        ),
        None => api::routes(
            AuthService::new(InMemoryUserRepository::new(), InMemoryTokenRepository::new()),
            InMemoryProductRepository::new(),
        ),
    };

    let health = health_router().merge(api::ready_router(state.clone()));
    create_router(api_routes, health)
}
