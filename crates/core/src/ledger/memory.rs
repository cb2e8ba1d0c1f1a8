//! In-memory ledger store.
//!
//! Keeps launches in an ordered map keyed by sequential id. Used by tests and
//! local tooling; it can be switched into a failing mode to exercise store
//! error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::NaiveDate;
use tokio::sync::RwLock;
use cashflow_shared::types::LedgerEntryId;

use super::entry::{LedgerEntry, LedgerEntryUpdate, NewLedgerEntry};
use super::store::{LedgerStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<LedgerEntryId, LedgerEntry>,
    last_id: LedgerEntryId,
}

/// Ledger store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<MemoryState>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entries` as-is. New ids continue after the highest one.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        let entries: BTreeMap<LedgerEntryId, LedgerEntry> =
            entries.into_iter().map(|entry| (entry.id, entry)).collect();
        let last_id = entries.keys().next_back().copied().unwrap_or_default();

        Self {
            state: RwLock::new(MemoryState { entries, last_id }),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with a backend error (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of store calls made so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, operation: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!("in-memory store unavailable during {operation}")));
        }
        Ok(())
    }
}

fn listing_order(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| {
        (a.reference_date, a.entry_type.code(), a.value, a.id)
            .cmp(&(b.reference_date, b.entry_type.code(), b.value, b.id))
    });
}

impl LedgerStore for InMemoryLedgerStore {
    async fn insert(&self, entry: NewLedgerEntry) -> Result<LedgerEntry, StoreError> {
        self.enter("insert")?;
        let mut state = self.state.write().await;

        let id = state.last_id.next();
        if state.entries.contains_key(&id) {
            return Err(StoreError::DuplicateKey(format!("Key (id)=({id}) already exists.")));
        }

        let stored = entry.with_id(id);
        state.entries.insert(id, stored.clone());
        state.last_id = id;
        Ok(stored)
    }

    async fn update(&self, update: LedgerEntryUpdate) -> Result<LedgerEntry, StoreError> {
        self.enter("update")?;
        let mut state = self.state.write().await;

        let Some(stored) = state.entries.get_mut(&update.id) else {
            return Err(StoreError::NotFound(update.id));
        };

        *stored = update.apply_to(stored);
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: LedgerEntryId) -> Result<(), StoreError> {
        self.enter("delete")?;
        let mut state = self.state.write().await;

        state
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn find_by_id(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError> {
        self.enter("find_by_id")?;
        Ok(self.state.read().await.entries.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        self.enter("list_all")?;
        let mut entries: Vec<LedgerEntry> =
            self.state.read().await.entries.values().cloned().collect();
        listing_order(&mut entries);
        Ok(entries)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<LedgerEntry>, StoreError> {
        self.enter("find_by_date")?;
        Ok(self
            .state
            .read()
            .await
            .entries
            .values()
            .filter(|entry| entry.reference_date == date)
            .cloned()
            .collect())
    }

    async fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        self.enter("find_by_date_range")?;
        Ok(self
            .state
            .read()
            .await
            .entries
            .values()
            .filter(|entry| from <= entry.reference_date && entry.reference_date <= to)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter("ping")
    }
}
