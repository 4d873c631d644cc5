//! Error codes attached to structured log events.
//!
//! Response bodies stay in the `{"error": ...}` / `{"errors": {...}}` shape
//! clients expect; the code only travels in the `error_code` log field so
//! failures can be grouped in log aggregation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Client errors (1000s)
    BadRequest,
    ValidationError,
    InvalidJson,
    NotFound,
    Unauthorized,

    // Server errors (2000s)
    StorageFailure,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::StorageFailure => "STORAGE_FAILURE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::NotFound => 1004,
            Self::Unauthorized => 1005,
            Self::StorageFailure => 2001,
            Self::InternalError => 2002,
        }
    }

    /// Message used when no more specific text is available.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request.",
            Self::ValidationError => "Request validation failed.",
            Self::InvalidJson => "Malformed JSON body.",
            Self::NotFound => "Not found.",
            Self::Unauthorized => "Authentication credentials were not provided.",
            Self::StorageFailure => "Storage operation failed.",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_server_ranges_do_not_overlap() {
        let client = [
            ErrorCode::BadRequest,
            ErrorCode::ValidationError,
            ErrorCode::InvalidJson,
            ErrorCode::NotFound,
            ErrorCode::Unauthorized,
        ];
        assert!(client.iter().all(|c| (1000..2000).contains(&c.code())));
        assert!(ErrorCode::StorageFailure.code() >= 2000);
        assert!(ErrorCode::InternalError.code() >= 2000);
    }

    #[test]
    fn display_uses_identifier() {
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
    }
}
