use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{CurrentUser, IdPath, JsonBody};
use std::sync::Arc;

use crate::dashboard::{DashboardEntry, DashboardService};
use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Catalog CRUD. Every handler expects token authentication in front of it.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(replace_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// `GET /dashboard`. Also expects token authentication.
pub fn dashboard_router<R: ProductRepository + 'static>(service: DashboardService<R>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .with_state(Arc::new(service))
}

async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    current: CurrentUser,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input, current.id).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input, false).await?;
    Ok(Json(product))
}

async fn patch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input, true).await?;
    Ok(Json(product))
}

async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn dashboard<R: ProductRepository>(
    State(service): State<Arc<DashboardService<R>>>,
) -> ProductResult<Json<Vec<DashboardEntry>>> {
    let summary = service.summary().await?;
    Ok(Json(summary))
}
