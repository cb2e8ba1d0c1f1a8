//! Ledger service: the entry point used by the HTTP layer and tooling.
//!
//! Validation always runs before the store is touched. Store failures are
//! converted into [`LedgerError`] without retrying.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use cashflow_shared::types::LedgerEntryId;
use tracing::{debug, info};

use super::balance::{DailyBalance, balance_for_date, balances_by_date};
use super::bounds::ReferenceDateBounds;
use super::entry::{LedgerEntry, LedgerEntryInput};
use super::error::LedgerError;
use super::range::{DateRange, validate_range};
use super::store::LedgerStore;
use super::validation::{validate_entry, validate_reference_date};

/// Ledger service over a [`LedgerStore`].
pub struct LedgerService<S: LedgerStore> {
    store: Arc<S>,
    bounds: ReferenceDateBounds,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Create a new ledger service.
    #[must_use]
    pub fn new(store: Arc<S>, bounds: ReferenceDateBounds) -> Self {
        Self { store, bounds }
    }

    /// Reference date window enforced by this service.
    #[must_use]
    pub const fn bounds(&self) -> &ReferenceDateBounds {
        &self.bounds
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Normalizes and validates `input`, then inserts it.
    ///
    /// `input` holds the normalized form afterwards, whether or not validation passed.
    ///
    /// # Errors
    ///
    /// Returns `ModelValidate` without touching the store, or the store failure.
    pub async fn validate_and_insert(
        &self,
        input: &mut LedgerEntryInput,
    ) -> Result<LedgerEntry, LedgerError> {
        let validated = validate_entry(input, &self.bounds)?;

        let stored = self.store.insert(validated.into_new(Utc::now())).await?;
        info!(
            id = %stored.id,
            reference_date = %stored.reference_date,
            entry_type = %stored.entry_type,
            value = %stored.value,
            "Cash launch created"
        );
        Ok(stored)
    }

    /// Normalizes and validates `input`, then replaces launch `id` with it.
    ///
    /// # Errors
    ///
    /// Returns `ModelValidate` without touching the store, `NotFound` if `id`
    /// does not exist, or the store failure.
    pub async fn validate_and_update(
        &self,
        id: LedgerEntryId,
        input: &mut LedgerEntryInput,
    ) -> Result<LedgerEntry, LedgerError> {
        let validated = validate_entry(input, &self.bounds)?;

        let stored = self
            .store
            .update(validated.into_update(id, Utc::now()))
            .await?;
        info!(id = %stored.id, "Cash launch updated");
        Ok(stored)
    }

    /// Daily balance for one date. A date without launches yields a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `ParamValidate` without touching the store, the store failure,
    /// or `BalanceOverflow` when the stored values do not sum.
    pub async fn balance_by_date(&self, date: Option<NaiveDate>) -> Result<DailyBalance, LedgerError> {
        let date = validate_reference_date(date, &self.bounds)?;

        let entries = self.store.find_by_date(date).await?;
        debug!(reference_date = %date, entries = entries.len(), "Computing daily balance");
        balance_for_date(date, &entries)
    }

    /// Daily balances for every date in `range` that has at least one launch,
    /// in ascending date order.
    ///
    /// # Errors
    ///
    /// Returns `ParamValidate` without touching the store, the store failure,
    /// or `BalanceOverflow` when the stored values do not sum.
    pub async fn balance_by_range(&self, range: &DateRange) -> Result<Vec<DailyBalance>, LedgerError> {
        let range = validate_range(range, &self.bounds)?;

        let entries = self.store.find_by_date_range(range.from, range.to).await?;
        debug!(
            from = %range.from,
            to = %range.to,
            entries = entries.len(),
            "Computing daily balances for range"
        );
        balances_by_date(&entries)
    }

    /// Every launch, ordered by reference date, type and value.
    ///
    /// # Errors
    ///
    /// Returns the store failure.
    pub async fn list(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        Ok(self.store.list_all().await?)
    }

    /// Launch by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` does not exist, or the store failure.
    pub async fn get_by_id(&self, id: LedgerEntryId) -> Result<LedgerEntry, LedgerError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(LedgerError::NotFound(id))
    }

    /// Deletes launch `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` does not exist, or the store failure.
    pub async fn delete_by_id(&self, id: LedgerEntryId) -> Result<(), LedgerError> {
        self.store.delete_by_id(id).await?;
        info!(id = %id, "Cash launch deleted");
        Ok(())
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the store failure.
    pub async fn check(&self) -> Result<(), LedgerError> {
        Ok(self.store.ping().await?)
    }
}
