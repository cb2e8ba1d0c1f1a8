//! Daily balance routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use cashflow_core::ledger::{DateRange, LedgerStore};
use cashflow_shared::AppError;

use crate::{ApiError, AppState};

/// Creates the daily balance routes.
pub fn routes<S: LedgerStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/cash/balance/daily", get(balance_by_range::<S>))
        .route("/cash/balance/daily/{date}", get(balance_by_date::<S>))
}

/// Query parameters for the range endpoint, kept raw so parse failures can be reported.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// First day, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    pub to: Option<String>,
}

/// Parses an optional `YYYY-MM-DD` parameter. Missing or blank yields `None`.
fn parse_param(name: &str, raw: Option<&str>, invalid: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            invalid.push(format!("{name} is invalid"));
            None
        }
    }
}

/// GET `/cash/balance/daily/{date}`
async fn balance_by_date<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(date): Path<String>,
) -> Response {
    let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        warn!(date = %date, "Invalid balance date");
        return ApiError::from(AppError::Validation("date invalid".to_string())).into_response();
    };

    match state.ledger.balance_by_date(Some(date)).await {
        Ok(balance) => Json(balance).into_response(),
        Err(e) => ApiError::loading(e).into_response(),
    }
}

/// GET `/cash/balance/daily?from=YYYY-MM-DD&to=YYYY-MM-DD`
async fn balance_by_range<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let mut invalid = Vec::new();
    let from = parse_param("from", query.from.as_deref(), &mut invalid);
    let to = parse_param("to", query.to.as_deref(), &mut invalid);

    if !invalid.is_empty() {
        let message = invalid.join(";");
        warn!(message = %message, "Invalid balance range parameters");
        return ApiError::from(AppError::Validation(message)).into_response();
    }

    match state.ledger.balance_by_range(&DateRange { from, to }).await {
        Ok(balances) => Json(balances).into_response(),
        Err(e) => ApiError::loading(e).into_response(),
    }
}
