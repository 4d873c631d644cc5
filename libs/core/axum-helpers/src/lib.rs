//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`errors`]**: [`AppError`] and the `{"error"}` / `{"errors"}` response envelope
//! - **[`extractors`]**: [`JsonBody`] and [`IdPath`], which reject with [`AppError`]
//! - **[`auth`]**: `Authorization: Token <key>` middleware and the [`CurrentUser`] extractor
//! - **[`http`]**: security headers
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::{create_production_app, create_router, health_router};
//!
//! let app = create_router(api_routes, health_router());
//! create_production_app(app, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    CurrentUser, SharedTokenResolver, TokenResolver, parse_token_header, token_auth_middleware,
};
pub use errors::{AppError, ErrorCode, ErrorResponse, FieldErrors, ValidationErrorResponse};
pub use extractors::{IdPath, JsonBody};
pub use http::security_headers;
pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router, health_router,
    normalize_trailing_slash, run_health_checks, shutdown_signal,
};
