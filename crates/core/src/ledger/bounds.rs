//! Admissible window for reference dates.

use chrono::{Months, NaiveDate, Utc};
use cashflow_shared::LedgerConfig;
use tracing::warn;

/// Inclusive `[min, max]` window accepted for reference dates and balance queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDateBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl ReferenceDateBounds {
    /// Creates bounds from explicit dates. The pair is swapped if given reversed.
    #[must_use]
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            warn!(%min, %max, "Reference date bounds given reversed, swapping");
            Self { min: max, max: min }
        }
    }

    /// Creates bounds whose maximum lies `years` after `today`.
    #[must_use]
    pub fn years_ahead(min: NaiveDate, today: NaiveDate, years: u32) -> Self {
        let max = today
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX);
        Self::new(min, max)
    }

    /// Creates bounds from configuration, anchored on `today`.
    #[must_use]
    pub fn from_config(config: &LedgerConfig, today: NaiveDate) -> Self {
        Self::years_ahead(config.min_reference_date, today, config.max_years_ahead)
    }

    /// Earliest accepted date.
    #[must_use]
    pub const fn min(&self) -> NaiveDate {
        self.min
    }

    /// Latest accepted date.
    #[must_use]
    pub const fn max(&self) -> NaiveDate {
        self.max
    }

    /// Returns true if `date` lies inside the window (both ends inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

impl Default for ReferenceDateBounds {
    /// 1900-01-01 up to ten years after today (UTC).
    fn default() -> Self {
        Self::from_config(&LedgerConfig::default(), Utc::now().date_naive())
    }
}
