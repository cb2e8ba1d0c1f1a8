//! Daily balance calculations.
//!
//! A daily balance is the signed sum of every launch attributed to one
//! reference date: credits add, debits subtract. Balances are derived on every
//! query and never persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::normalize::round_money;

/// Net cash balance of one reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    /// The reference date.
    pub reference_date: NaiveDate,
    /// Credits minus debits, rounded to 2 decimal places.
    pub value: Decimal,
}

impl DailyBalance {
    /// A balance with no launches.
    #[must_use]
    pub fn zero(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            value: round_money(Decimal::ZERO),
        }
    }
}

/// Sums the signed values of `entries` without rounding.
///
/// Returns `None` when the total does not fit in a `Decimal`.
pub fn signed_sum<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Option<Decimal> {
    entries
        .into_iter()
        .try_fold(Decimal::ZERO, |total, entry| total.checked_add(entry.signed_value()))
}

/// Computes the balance of `date` from the launches dated on it.
///
/// Launches on other dates are ignored. No launches yields a zero balance.
///
/// # Errors
///
/// Returns `BalanceOverflow` when the signed sum does not fit in a `Decimal`.
pub fn balance_for_date(date: NaiveDate, entries: &[LedgerEntry]) -> Result<DailyBalance, LedgerError> {
    let total = signed_sum(entries.iter().filter(|entry| entry.reference_date == date))
        .ok_or(LedgerError::BalanceOverflow(date))?;
    Ok(DailyBalance {
        reference_date: date,
        value: round_money(total),
    })
}

/// Groups launches by reference date and computes one balance per date.
///
/// Only dates with at least one launch appear. Output is ascending by date.
///
/// # Errors
///
/// Returns `BalanceOverflow` for the first date whose sum does not fit in a `Decimal`.
pub fn balances_by_date(entries: &[LedgerEntry]) -> Result<Vec<DailyBalance>, LedgerError> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for entry in entries {
        let total = totals.entry(entry.reference_date).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(entry.signed_value())
            .ok_or(LedgerError::BalanceOverflow(entry.reference_date))?;
    }

    Ok(totals
        .into_iter()
        .map(|(reference_date, total)| DailyBalance {
            reference_date,
            value: round_money(total),
        })
        .collect())
}
