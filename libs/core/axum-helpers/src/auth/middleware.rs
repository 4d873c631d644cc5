use super::token::{INVALID_TOKEN, NO_CREDENTIALS, SharedTokenResolver, parse_token_header};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Rejects requests without a valid `Authorization: Token <key>` header.
///
/// On success the resolved [`super::CurrentUser`] is inserted into the request
/// extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/dashboard", get(summary))
///     .route_layer(middleware::from_fn_with_state(resolver, token_auth_middleware));
/// ```
pub async fn token_auth_middleware(
    State(resolver): State<SharedTokenResolver>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_token_header)
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized(NO_CREDENTIALS.to_string()))?;

    let user = resolver
        .resolve(&key)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.to_string()))?;

    tracing::debug!(user_id = %user.id, "Token authenticated");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
