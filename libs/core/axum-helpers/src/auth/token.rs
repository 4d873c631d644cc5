use crate::errors::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub const TOKEN_KEYWORD: &str = "Token";
pub const NO_CREDENTIALS: &str = "Authentication credentials were not provided.";
pub const INVALID_TOKEN: &str = "Invalid token.";

/// The caller behind a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Looks up token keys. Implemented by the users domain.
#[async_trait]
pub trait TokenResolver: Send + Sync + 'static {
    /// `Ok(None)` for keys that are not (or no longer) issued.
    async fn resolve(&self, key: &str) -> Result<Option<CurrentUser>, AppError>;
}

pub type SharedTokenResolver = Arc<dyn TokenResolver>;

/// Extracts `<key>` from a `Token <key>` header value.
///
/// Only the first space-separated word after the keyword is used.
pub fn parse_token_header(value: &str) -> Option<&str> {
    value
        .strip_prefix(TOKEN_KEYWORD)?
        .strip_prefix(' ')?
        .split(' ')
        .next()
        .filter(|key| !key.is_empty())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(NO_CREDENTIALS.to_string()))
    }
}
