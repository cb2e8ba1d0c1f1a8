//! JSON error envelope returned by every handler.
//!
//! Bodies look like `{"error": "<CODE>", "message": "<text>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use cashflow_core::ledger::LedgerError;
use cashflow_shared::AppError;

/// Name used for the ledger resource in client-facing messages.
pub const RESOURCE: &str = "CashLaunch";

/// An error ready to be rendered as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status, code and message.
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Maps a ledger failure raised while writing.
    #[must_use]
    pub fn persisting(err: LedgerError) -> Self {
        Self::from_ledger(err, format!("Error persisting {RESOURCE} in repository"))
    }

    /// Maps a ledger failure raised while reading.
    #[must_use]
    pub fn loading(err: LedgerError) -> Self {
        Self::from_ledger(err, format!("Error loading {RESOURCE} from repository"))
    }

    fn from_ledger(err: LedgerError, store_message: String) -> Self {
        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.error_code();

        let message = match &err {
            LedgerError::ParamValidate(message) => {
                format!("Error validating parameters: {message}")
            }
            LedgerError::ModelValidate(message) => format!("Error validating {RESOURCE}: {message}"),
            LedgerError::NotFound(_) => format!("{RESOURCE} not found"),
            LedgerError::DuplicateKey(detail) => {
                format!("Error persisting {RESOURCE} in repository: {detail}")
            }
            LedgerError::Store(_) => {
                error!(error = %err, "{}", store_message);
                store_message
            }
            LedgerError::BalanceOverflow(_) => {
                error!(error = %err, "Stored values exceed the decimal range");
                format!("Error calculating balance: {err}")
            }
        };

        Self::new(status, code, message)
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.error_code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}
