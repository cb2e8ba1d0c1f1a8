//! Ledger error types.
//!
//! Every ledger operation fails with exactly one [`LedgerError`]. Validation
//! kinds carry every violation found, joined with `;`.

use chrono::NaiveDate;
use thiserror::Error;
use cashflow_shared::types::LedgerEntryId;

use super::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Query parameters (dates, ranges) are missing or out of bounds.
    #[error("{0}")]
    ParamValidate(String),

    /// Cash launch fields failed validation on insert or update.
    #[error("{0}")]
    ModelValidate(String),

    /// The cash launch does not exist.
    #[error("cash launch {0} not found")]
    NotFound(LedgerEntryId),

    /// The store rejected a write because of a uniqueness violation.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Any other store failure, passed through as-is.
    #[error("repository error: {0}")]
    Store(String),

    /// The signed sum of a date's launches does not fit in a decimal.
    #[error("balance of {0} overflows")]
    BalanceOverflow(NaiveDate),
}

impl LedgerError {
    /// Builds a parameter validation error from collected violations.
    #[must_use]
    pub fn param_validate(messages: &[String]) -> Self {
        Self::ParamValidate(messages.join(";"))
    }

    /// Builds a model validation error from collected violations.
    #[must_use]
    pub fn model_validate(messages: &[String]) -> Self {
        Self::ModelValidate(messages.join(";"))
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ParamValidate(_) => "PARAM_VALIDATE_ERROR",
            Self::ModelValidate(_) => "MODEL_VALIDATE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::Store(_) => "REPOSITORY_ERROR",
            Self::BalanceOverflow(_) => "BALANCE_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ParamValidate(_) | Self::ModelValidate(_) => 400,
            Self::NotFound(_) => 404,
            Self::DuplicateKey(_) => 409,
            Self::Store(_) | Self::BalanceOverflow(_) => 500,
        }
    }

    /// Returns true for the validation kinds, which never reach the store.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ParamValidate(_) | Self::ModelValidate(_))
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::DuplicateKey(detail) => Self::DuplicateKey(detail),
            StoreError::Backend(message) => Self::Store(message),
        }
    }
}
