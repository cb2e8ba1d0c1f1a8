//! Ledger store abstraction.
//!
//! The core only consumes this trait; the db crate implements it on top of
//! PostgreSQL and [`super::memory::InMemoryLedgerStore`] implements it for tests.

use std::future::Future;

use chrono::NaiveDate;
use thiserror::Error;
use cashflow_shared::types::LedgerEntryId;

use super::entry::{LedgerEntry, LedgerEntryUpdate, NewLedgerEntry};

/// Errors reported by a ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No launch exists with the given id.
    #[error("cash launch {0} not found")]
    NotFound(LedgerEntryId),

    /// A uniqueness constraint was violated.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Any other backend failure (connectivity, query, decoding).
    #[error("{0}")]
    Backend(String),
}

/// Repository trait for cash launch persistence.
pub trait LedgerStore: Send + Sync {
    /// Inserts a launch and returns it with its assigned id.
    fn insert(
        &self,
        entry: NewLedgerEntry,
    ) -> impl Future<Output = Result<LedgerEntry, StoreError>> + Send;

    /// Replaces the fields of an existing launch, keeping its `created_at`.
    ///
    /// Fails with [`StoreError::NotFound`] when the id does not exist.
    fn update(
        &self,
        update: LedgerEntryUpdate,
    ) -> impl Future<Output = Result<LedgerEntry, StoreError>> + Send;

    /// Deletes a launch. Fails with [`StoreError::NotFound`] when the id does not exist.
    fn delete_by_id(
        &self,
        id: LedgerEntryId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Finds a launch by id.
    fn find_by_id(
        &self,
        id: LedgerEntryId,
    ) -> impl Future<Output = Result<Option<LedgerEntry>, StoreError>> + Send;

    /// Lists every launch, ordered by reference date, type and value.
    fn list_all(&self) -> impl Future<Output = Result<Vec<LedgerEntry>, StoreError>> + Send;

    /// Finds the launches dated exactly `date`. An empty result means none exist.
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<LedgerEntry>, StoreError>> + Send;

    /// Finds the launches dated within `[from, to]`, both ends inclusive.
    fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<LedgerEntry>, StoreError>> + Send;

    /// Checks that the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
