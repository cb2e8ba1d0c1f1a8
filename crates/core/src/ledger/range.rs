//! Date range parameters for balance queries.

use chrono::NaiveDate;

use super::bounds::ReferenceDateBounds;
use super::error::LedgerError;
use super::validation::check_date;

/// Longest accepted span between `from` and `to`, in whole days.
pub const MAX_RANGE_DAYS: i64 = 31;

const TO_SMALLER_THAN_FROM: &str = "to is smaller than from";

/// A from/to pair as supplied by the caller. Either end may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the range.
    pub from: Option<NaiveDate>,
    /// Last day of the range.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range with both ends present.
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// A range that passed validation: both ends inside the bounds,
/// `from <= to` and at most [`MAX_RANGE_DAYS`] apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
}

impl BoundedRange {
    /// Returns true if `date` falls inside the range (both ends inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Validates a range in two phases.
///
/// Both ends are checked against the bounds first; the order and span of the
/// range are only checked once both ends are admissible.
///
/// # Errors
///
/// Returns `LedgerError::ParamValidate` listing the violations of the failing phase.
pub fn validate_range(
    range: &DateRange,
    bounds: &ReferenceDateBounds,
) -> Result<BoundedRange, LedgerError> {
    let from = check_date("from", range.from, bounds);
    let to = check_date("to", range.to, bounds);

    let (from, to) = match (from, to) {
        (Ok(from), Ok(to)) => (from, to),
        (from, to) => {
            let messages: Vec<String> = [from.err(), to.err()].into_iter().flatten().collect();
            return Err(LedgerError::param_validate(&messages));
        }
    };

    let days = (to - from).num_days();
    if days < 0 {
        return Err(LedgerError::ParamValidate(TO_SMALLER_THAN_FROM.to_string()));
    }
    if days > MAX_RANGE_DAYS {
        return Err(LedgerError::ParamValidate(format!(
            "range is greater than {MAX_RANGE_DAYS} days"
        )));
    }

    Ok(BoundedRange { from, to })
}
