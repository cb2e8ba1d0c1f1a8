//! API route definitions.

use axum::{Router, response::IntoResponse};

use cashflow_core::ledger::LedgerStore;
use cashflow_shared::AppError;

use crate::{ApiError, AppState};

pub mod cash_balance;
pub mod cash_launch;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes<S: LedgerStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::routes())
        .merge(cash_launch::routes())
        .merge(cash_balance::routes())
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    ApiError::from(AppError::NotFound("URL".to_string()))
}
