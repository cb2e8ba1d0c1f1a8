//! Canonical forms for launch fields.
//!
//! Normalization always runs before validation, so every rule sees (and every
//! store persists) the canonical value.

use rust_decimal::{Decimal, RoundingStrategy};

use super::entry::LedgerEntryInput;

/// Decimal places kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value to [`MONEY_SCALE`] places, half away from zero.
///
/// The result carries two decimal places (`5` becomes `5.00`) whenever the
/// mantissa has room for them. Values beyond 26 integer digits keep a smaller
/// scale, so callers storing money must cap the value first.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Trims, collapses inner whitespace runs to one space and uppercases.
#[must_use]
pub fn format_title(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Removes all whitespace and uppercases.
#[must_use]
pub fn format_code(value: &str) -> String {
    value.split_whitespace().collect::<String>().to_uppercase()
}

/// Rewrites `description`, `entry_type` and `value` of `input` in place.
pub fn normalize_entry(input: &mut LedgerEntryInput) {
    input.description = format_title(&input.description);
    input.entry_type = format_code(&input.entry_type);
    input.value = round_money(input.value);
}
