//! Cash launch (ledger entry) domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use cashflow_shared::types::LedgerEntryId;

/// Polarity of a cash launch.
///
/// Serialized as the single-letter codes stored in the ledger (`C`/`D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Credit entry (adds to the daily balance).
    #[serde(rename = "C")]
    Credit,
    /// Debit entry (subtracts from the daily balance).
    #[serde(rename = "D")]
    Debit,
}

impl EntryType {
    /// Returns the stored single-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Credit => "C",
            Self::Debit => "D",
        }
    }

    /// Parses an already normalized code. Only `C` and `D` are accepted.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Credit),
            "D" => Some(Self::Debit),
            _ => None,
        }
    }

    /// Applies the polarity to an unsigned value.
    #[must_use]
    pub fn signed(self, value: Decimal) -> Decimal {
        match self {
            Self::Credit => value,
            Self::Debit => -value,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A stored cash launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Store-assigned identifier.
    pub id: LedgerEntryId,
    /// Calendar date the launch is attributed to.
    pub reference_date: NaiveDate,
    /// Credit or debit.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Normalized description.
    pub description: String,
    /// Unsigned amount, always positive with at most 2 decimal places.
    pub value: Decimal,
    /// Last insert/update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Returns the contribution of this launch to its daily balance.
    #[must_use]
    pub fn signed_value(&self) -> Decimal {
        self.entry_type.signed(self.value)
    }
}

/// Caller-supplied launch fields, as received before normalization.
///
/// `reference_date` is `None` when the caller left it out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerEntryInput {
    /// Calendar date the launch is attributed to.
    pub reference_date: Option<NaiveDate>,
    /// Raw type code (`c`, ` D `, ...).
    pub entry_type: String,
    /// Raw description.
    pub description: String,
    /// Raw amount.
    pub value: Decimal,
}

impl LedgerEntryInput {
    /// Creates an input with a reference date.
    #[must_use]
    pub fn new(
        reference_date: NaiveDate,
        entry_type: impl Into<String>,
        description: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self {
            reference_date: Some(reference_date),
            entry_type: entry_type.into(),
            description: description.into(),
            value,
        }
    }
}

/// Launch fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    /// Calendar date the launch is attributed to.
    pub reference_date: NaiveDate,
    /// Credit or debit.
    pub entry_type: EntryType,
    /// Normalized description.
    pub description: String,
    /// Rounded, positive amount.
    pub value: Decimal,
}

impl ValidatedEntry {
    /// Stamps the fields for an insert: both timestamps are `now`.
    #[must_use]
    pub fn into_new(self, now: DateTime<Utc>) -> NewLedgerEntry {
        NewLedgerEntry {
            reference_date: self.reference_date,
            entry_type: self.entry_type,
            description: self.description,
            value: self.value,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamps the fields for an update of `id`. `created_at` is left to the store.
    #[must_use]
    pub fn into_update(self, id: LedgerEntryId, now: DateTime<Utc>) -> LedgerEntryUpdate {
        LedgerEntryUpdate {
            id,
            reference_date: self.reference_date,
            entry_type: self.entry_type,
            description: self.description,
            value: self.value,
            updated_at: now,
        }
    }
}

/// A launch ready to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLedgerEntry {
    /// Calendar date the launch is attributed to.
    pub reference_date: NaiveDate,
    /// Credit or debit.
    pub entry_type: EntryType,
    /// Normalized description.
    pub description: String,
    /// Rounded, positive amount.
    pub value: Decimal,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
    /// Same as `created_at` on insert.
    pub updated_at: DateTime<Utc>,
}

impl NewLedgerEntry {
    /// Builds the stored entry once the store has assigned `id`.
    #[must_use]
    pub fn with_id(self, id: LedgerEntryId) -> LedgerEntry {
        LedgerEntry {
            id,
            reference_date: self.reference_date,
            entry_type: self.entry_type,
            description: self.description,
            value: self.value,
            updated_at: self.updated_at,
            created_at: self.created_at,
        }
    }
}

/// Replacement fields for an existing launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryUpdate {
    /// The launch to replace.
    pub id: LedgerEntryId,
    /// Calendar date the launch is attributed to.
    pub reference_date: NaiveDate,
    /// Credit or debit.
    pub entry_type: EntryType,
    /// Normalized description.
    pub description: String,
    /// Rounded, positive amount.
    pub value: Decimal,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntryUpdate {
    /// Applies the update on top of the stored entry, preserving `created_at`.
    #[must_use]
    pub fn apply_to(self, stored: &LedgerEntry) -> LedgerEntry {
        LedgerEntry {
            id: stored.id,
            reference_date: self.reference_date,
            entry_type: self.entry_type,
            description: self.description,
            value: self.value,
            updated_at: self.updated_at,
            created_at: stored.created_at,
        }
    }
}
