use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::JsonBody;
use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{
    AuthResponse, ForgotPasswordRequest, HomeResponse, LoginRequest, MessageResponse,
    SignupRequest, VerifyOtpRequest,
};
use crate::repository::{TokenRepository, UserRepository};
use crate::service::AuthService;

type SharedAuth<U, T> = State<Arc<AuthService<U, T>>>;

/// Auth endpoints. None of them sit behind the token middleware: `/logout`
/// reads its own header so that a spent key reports `No token found`.
pub fn router<U, T>(service: Arc<AuthService<U, T>>) -> Router
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route("/verify-otp", post(verify_otp))
        .route("/home", get(home))
        .with_state(service)
}

async fn login<U: UserRepository, T: TokenRepository>(
    State(service): SharedAuth<U, T>,
    JsonBody(credentials): JsonBody<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let (token, user) = service.login(&credentials).await?;
    Ok(Json(AuthResponse {
        token: token.key,
        user: user.into(),
    }))
}

async fn signup<U: UserRepository, T: TokenRepository>(
    State(service): SharedAuth<U, T>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> UserResult<impl IntoResponse> {
    let (token, user) = service.signup(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: token.key,
            user: user.into(),
        }),
    ))
}

async fn logout<U: UserRepository, T: TokenRepository>(
    State(service): SharedAuth<U, T>,
    headers: HeaderMap,
) -> UserResult<Json<MessageResponse>> {
    service.logout(authorization(&headers)).await?;
    Ok(Json(MessageResponse::new("Successfully logged out")))
}

async fn forgot_password<U: UserRepository, T: TokenRepository>(
    State(service): SharedAuth<U, T>,
    JsonBody(request): JsonBody<ForgotPasswordRequest>,
) -> UserResult<Json<MessageResponse>> {
    service
        .request_password_reset(request.email.as_deref())
        .await?;
    Ok(Json(MessageResponse::new("Reset email sent")))
}

async fn verify_otp<U: UserRepository, T: TokenRepository>(
    State(service): SharedAuth<U, T>,
    JsonBody(request): JsonBody<VerifyOtpRequest>,
) -> UserResult<Json<MessageResponse>> {
    service.verify_otp(request.otp.as_deref()).await?;
    Ok(Json(MessageResponse::new("OTP verified")))
}

/// Reports who the caller is. Lookup failures degrade to anonymous.
async fn home<U: UserRepository, T: TokenRepository>(
    State(service): SharedAuth<U, T>,
    headers: HeaderMap,
) -> Json<HomeResponse> {
    match service.resolve_header(authorization(&headers)).await {
        Ok(Some((token, user))) => Json(HomeResponse::authenticated(token.key, user)),
        Ok(None) => Json(HomeResponse::anonymous()),
        Err(e) => {
            tracing::error!(error = %e, "Token lookup failed on /home");
            Json(HomeResponse::anonymous())
        }
    }
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}
