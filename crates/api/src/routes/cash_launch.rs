//! Cash launch routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use cashflow_core::ledger::{LedgerEntryInput, LedgerStore};
use cashflow_shared::{AppError, types::LedgerEntryId};

use crate::{ApiError, AppState, error::RESOURCE};

/// Creates the cash launch routes.
pub fn routes<S: LedgerStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/cash/launch", get(list_launches::<S>).post(create_launch::<S>))
        .route(
            "/cash/launch/{id}",
            get(get_launch::<S>)
                .put(update_launch::<S>)
                .delete(delete_launch::<S>),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating or replacing a cash launch.
///
/// Missing fields decode to empty values so that validation can report them.
#[derive(Debug, Default, Deserialize)]
pub struct CashLaunchRequest {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default, deserialize_with = "reference_date::deserialize")]
    pub reference_date: Option<NaiveDate>,
    /// `C` or `D`, any case.
    #[serde(default, rename = "type")]
    pub entry_type: String,
    /// Free text, 3 to 100 characters once normalized.
    #[serde(default)]
    pub description: String,
    /// Positive amount.
    #[serde(default)]
    pub value: Decimal,
}

impl From<CashLaunchRequest> for LedgerEntryInput {
    fn from(request: CashLaunchRequest) -> Self {
        Self {
            reference_date: request.reference_date,
            entry_type: request.entry_type,
            description: request.description,
            value: request.value,
        }
    }
}

mod reference_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    /// Accepts a calendar date or a timestamp; timestamps are taken in UTC
    /// and their time of day dropped. `null` and `""` decode to `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }

        DateTime::parse_from_rfc3339(raw)
            .map(|timestamp| Some(timestamp.with_timezone(&Utc).date_naive()))
            .map_err(|_| D::Error::custom(format!("invalid reference_date {raw:?}")))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_id(raw: &str) -> Result<LedgerEntryId, ApiError> {
    raw.parse().map_err(|e| {
        warn!(id = %raw, error = %e, "Invalid cash launch id");
        ApiError::from(AppError::Validation("id invalid".to_string()))
    })
}

fn decode_body(
    payload: Result<Json<CashLaunchRequest>, JsonRejection>,
) -> Result<LedgerEntryInput, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request.into()),
        Err(rejection) => {
            warn!(error = %rejection, "Failed to decode cash launch body");
            Err(ApiError::from(AppError::Deserialize(RESOURCE.to_string())))
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/cash/launch`
async fn create_launch<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CashLaunchRequest>, JsonRejection>,
) -> Response {
    let mut input = match decode_body(payload) {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    match state.ledger.validate_and_insert(&mut input).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => ApiError::persisting(e).into_response(),
    }
}

/// GET `/cash/launch`
async fn list_launches<S: LedgerStore + 'static>(State(state): State<AppState<S>>) -> Response {
    match state.ledger.list().await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => ApiError::loading(e).into_response(),
    }
}

/// GET `/cash/launch/{id}`
async fn get_launch<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.ledger.get_by_id(id).await {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => ApiError::loading(e).into_response(),
    }
}

/// PUT `/cash/launch/{id}`
async fn update_launch<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<CashLaunchRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let mut input = match decode_body(payload) {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    match state.ledger.validate_and_update(id, &mut input).await {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => ApiError::persisting(e).into_response(),
    }
}

/// DELETE `/cash/launch/{id}`
async fn delete_launch<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.ledger.delete_by_id(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::persisting(e).into_response(),
    }
}
