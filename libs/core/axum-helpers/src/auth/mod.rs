//! Opaque token authentication.
//!
//! Clients send `Authorization: Token <key>`. A [`TokenResolver`] maps the key
//! to a [`CurrentUser`], which [`token_auth_middleware`] stores in the request
//! extensions for handlers to extract.

pub mod middleware;
pub mod token;

pub use middleware::token_auth_middleware;
pub use token::{
    CurrentUser, INVALID_TOKEN, NO_CREDENTIALS, SharedTokenResolver, TOKEN_KEYWORD,
    TokenResolver, parse_token_header,
};
