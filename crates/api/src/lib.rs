//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for cash launches and daily balances
//! - The JSON error envelope
//! - Router assembly with tracing and CORS layers

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use cashflow_core::ledger::{LedgerService, LedgerStore};

pub use error::ApiError;

/// Application state shared across handlers.
pub struct AppState<S: LedgerStore> {
    /// Ledger service over the configured store.
    pub ledger: Arc<LedgerService<S>>,
}

impl<S: LedgerStore> AppState<S> {
    /// Wraps a ledger service.
    #[must_use]
    pub fn new(ledger: LedgerService<S>) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

impl<S: LedgerStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: LedgerStore + 'static>(state: AppState<S>, cors_origins: &[&str]) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Builds the CORS layer. `*` (or an empty list) allows any origin.
fn cors_layer(origins: &[&str]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.contains(&"*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
