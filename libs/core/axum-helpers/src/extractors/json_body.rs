use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejection renders as `{"error": "..."}`.
///
/// Field rules are not checked here: services validate payloads themselves
/// because full and partial updates need different rules for the same type.
///
/// ```ignore
/// async fn login(JsonBody(credentials): JsonBody<LoginRequest>) -> UserResult<Json<AuthResponse>> {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Otp {
        otp: String,
    }

    fn app() -> Router {
        Router::new().route("/", post(|JsonBody(body): JsonBody<Otp>| async move { body.otp }))
    }

    #[tokio::test]
    async fn passes_through_valid_json() {
        let request = HttpRequest::post("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"otp":"123456"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"123456");
    }

    #[tokio::test]
    async fn malformed_json_uses_error_envelope() {
        let request = HttpRequest::post("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }
}
