//! End-to-end tests for the assembled application
//!
//! Runs the full router (in-memory storage) the way `main` serves it,
//! including trailing-slash normalization.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::normalize_trailing_slash;
use http_body_util::BodyExt;
use pearmonie_api::{build_app, config::Config, state::AppState};
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

struct TestApp {
    app: axum::Router,
}

impl TestApp {
    fn new() -> Self {
        let state = AppState::new(Config::in_memory(), None);
        Self {
            app: build_app(&state),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let service = normalize_trailing_slash(self.app.clone());
        let response = service.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Token {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn signup(&self, email: &str) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/api/signup/",
                None,
                Some(json!({"email": email, "password": "newpassword123"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn health_is_plain_ok() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn ready_carries_security_headers() {
    let app = TestApp::new();
    let service = normalize_trailing_slash(app.app.clone());
    let response = service
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn ready_without_database_reports_ready() {
    let app = TestApp::new();
    let (status, body) = app.json("GET", "/ready", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::new();
    let (status, body) = app.json("GET", "/api/nowhere", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found.");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new();

    for uri in ["/api/products", "/api/products/", "/api/dashboard/"] {
        let (status, body) = app.json("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Authentication credentials were not provided.");
    }

    let (status, body) = app
        .json("GET", "/api/products", Some(&"0".repeat(40)), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token.");
}

#[tokio::test]
async fn signup_then_manage_catalog_and_read_dashboard() {
    let app = TestApp::new();
    let token = app.signup("owner@example.com").await;

    let (status, created) = app
        .json(
            "POST",
            "/api/products/",
            Some(&token),
            Some(json!({
                "name": "Gaming Laptop",
                "model": "X1",
                "type": "electronics",
                "store": "Ikeja",
                "price": 1200.5,
                "image": "laptop.png",
                "stock": 3
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["price"], "1200.50");

    let (status, listed) = app
        .json("GET", "/api/products?search=gaming", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, dashboard) = app.json("GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        dashboard,
        json!([
            {"title": "Total Products", "description": "1"},
            {"title": "Low Stock Items", "description": "1"}
        ])
    );

    let uri = format!("/api/products/{}/", created["id"].as_str().unwrap());
    let (status, _) = app.json("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn home_and_logout_share_the_token() {
    let app = TestApp::new();
    let token = app.signup("user@example.com").await;

    let (status, home) = app.json("GET", "/api/home/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["authenticated"], true);
    assert_eq!(home["user"]["email"], "user@example.com");

    let (status, body) = app.json("POST", "/api/logout/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully logged out");

    let (status, body) = app.json("POST", "/api/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No token found");

    let (status, _) = app.json("POST", "/api/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, home) = app.json("GET", "/api/home", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["authenticated"], false);

    let (status, _) = app.json("GET", "/api/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
