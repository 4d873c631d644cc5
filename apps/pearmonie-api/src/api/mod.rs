use axum::{Router, middleware, routing::get};
use axum_helpers::{SharedTokenResolver, token_auth_middleware};
use domain_products::{DashboardService, ProductRepository, ProductService};
use domain_users::{AuthService, TokenRepository, UserRepository};
use std::sync::Arc;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `create_router`.
///
/// The auth service doubles as the token resolver, so the middleware and the
/// login endpoints always agree on which keys are live.
pub fn routes<U, T, P>(auth: AuthService<U, T>, products: P) -> Router
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: ProductRepository + Clone + 'static,
{
    let auth = Arc::new(auth);
    let resolver: SharedTokenResolver = auth.clone();

    let protected = Router::new()
        .merge(domain_products::handlers::router(ProductService::new(
            products.clone(),
        )))
        .merge(domain_products::handlers::dashboard_router(
            DashboardService::new(products),
        ))
        .route_layer(middleware::from_fn_with_state(
            resolver,
            token_auth_middleware,
        ));

    domain_users::handlers::router(auth).merge(protected)
}

/// `/ready`, backed by a real database ping when Postgres is configured.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
