//! Cash ledger: launches, validation and daily balances.
//!
//! - `entry` - launch types and their write-path forms
//! - `normalize` - canonical formatting applied before validation
//! - `validation` / `range` - entry and query parameter rules
//! - `balance` - signed-sum aggregation per reference date
//! - `store` - persistence trait, with an in-memory implementation in `memory`
//! - `service` - the operations exposed to callers

pub mod balance;
pub mod bounds;
pub mod entry;
pub mod error;
pub mod memory;
pub mod normalize;
pub mod range;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use balance::{DailyBalance, balance_for_date, balances_by_date};
pub use bounds::ReferenceDateBounds;
pub use entry::{
    EntryType, LedgerEntry, LedgerEntryInput, LedgerEntryUpdate, NewLedgerEntry, ValidatedEntry,
};
pub use error::LedgerError;
pub use memory::InMemoryLedgerStore;
pub use normalize::{MONEY_SCALE, round_money};
pub use range::{BoundedRange, DateRange, MAX_RANGE_DAYS, validate_range};
pub use service::LedgerService;
pub use store::{LedgerStore, StoreError};
pub use validation::{validate_entry, validate_reference_date};
