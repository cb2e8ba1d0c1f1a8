//! Health check endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::error;

use cashflow_core::ledger::LedgerStore;
use cashflow_shared::AppError;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// `OK`, or the dependency failure when the database is unreachable.
    pub database: String,
}

/// Health check handler.
async fn health_check<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.ledger.check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                version: env!("CARGO_PKG_VERSION"),
                database: "OK".to_string(),
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed");
            let err = AppError::Unavailable(e.to_string());
            (
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::FAILED_DEPENDENCY),
                Json(HealthResponse {
                    status: "unhealthy",
                    version: env!("CARGO_PKG_VERSION"),
                    database: err.to_string(),
                }),
            )
        }
    }
}

/// Creates health check routes.
pub fn routes<S: LedgerStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health_check::<S>))
}
