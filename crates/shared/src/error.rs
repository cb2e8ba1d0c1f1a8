//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Raised by the plumbing around the ledger core (request decoding, routing,
/// dependency checks). Ledger rule violations have their own error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body could not be decoded.
    #[error("Error deserializing {0} from body")]
    Deserialize(String),

    /// Request parameter could not be parsed.
    #[error("Error validating parameters: {0}")]
    Validation(String),

    /// Resource or route not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A required dependency (database) is not healthy.
    #[error("Dependency unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Deserialize(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Unavailable(_) => 424,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Deserialize(_) => "DESERIALIZE_ERROR",
            Self::Validation(_) => "PARAM_VALIDATE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unavailable(_) => "FAILED_DEPENDENCY",
        }
    }
}
