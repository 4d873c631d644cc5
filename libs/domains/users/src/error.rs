use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors, auth::NO_CREDENTIALS};
use thiserror::Error;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "custom user with this email already exists.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Authentication credentials were not provided.")]
    MissingCredentials,

    #[error("No token found")]
    NoTokenFound,

    #[error("User with provided email does not exist")]
    UnknownEmail,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<FieldErrors> for UserError {
    fn from(errors: FieldErrors) -> Self {
        UserError::Validation(errors)
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UserNotFound | UserError::IncorrectPassword => {
                AppError::Unauthorized(err.to_string())
            }
            UserError::Validation(errors) => AppError::Validation(errors),
            UserError::DuplicateEmail(_) => {
                AppError::Validation(FieldErrors::single("email", DUPLICATE_EMAIL_MESSAGE))
            }
            UserError::MissingCredentials => AppError::Unauthorized(NO_CREDENTIALS.to_string()),
            UserError::NoTokenFound | UserError::InvalidOtp => AppError::BadRequest(err.to_string()),
            UserError::UnknownEmail => AppError::NotFound(err.to_string()),
            UserError::PasswordHash(_) | UserError::Database(_) | UserError::Internal(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
