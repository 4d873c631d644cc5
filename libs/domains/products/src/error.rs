use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, FieldErrors};
use thiserror::Error;
use uuid::Uuid;

pub const DUPLICATE_NAME_MESSAGE: &str = "products with this name already exists.";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    /// Deletion failures keep their message all the way to the client.
    #[error("{0}")]
    DeleteFailed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<FieldErrors> for ProductError {
    fn from(errors: FieldErrors) -> Self {
        ProductError::Validation(errors)
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => {
                AppError::NotFound(ErrorCode::NotFound.default_message().to_string())
            }
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::DuplicateName(_) => {
                AppError::Validation(FieldErrors::single("name", DUPLICATE_NAME_MESSAGE))
            }
            ProductError::DeleteFailed(msg) => AppError::StorageFailure(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
