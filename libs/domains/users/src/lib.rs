//! Users Domain
//!
//! Accounts, password login and opaque bearer tokens.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /login, /signup, /logout, /home, password reset
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌────────────┐
//! │ AuthService │ ──▶ │ Validation │  ← signup rules, password strength
//! └──────┬──────┘     └────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← UserRepository + TokenRepository (in-memory, Postgres)
//! └─────────────┘
//! ```
//!
//! `AuthService` also implements [`axum_helpers::TokenResolver`], so the same
//! instance backs the token middleware for every protected route.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     AuthService, InMemoryTokenRepository, InMemoryUserRepository, handlers,
//! };
//! use std::sync::Arc;
//!
//! let service = Arc::new(AuthService::new(
//!     InMemoryUserRepository::new(),
//!     InMemoryTokenRepository::new(),
//! ));
//! let auth_routes = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod providers;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{UserError, UserResult};
pub use models::{Profile, Token, User, UserResponse};
pub use postgres::{PostgresTokenRepository, PostgresUserRepository, init_schema};
pub use providers::{
    AcceptAllOtpVerifier, LoggingPasswordResetMailer, OtpVerifier, PasswordResetMailer,
};
pub use repository::{
    InMemoryTokenRepository, InMemoryUserRepository, TokenRepository, UserRepository,
};
pub use service::AuthService;
pub use validation::validate_signup;
