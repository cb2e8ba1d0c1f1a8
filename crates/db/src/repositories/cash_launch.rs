//! Cash launch repository for database operations.
//!
//! Implements the ledger store on top of the `cash_launches` table.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::warn;

use crate::entities::cash_launches;
use cashflow_core::ledger::{
    EntryType, LedgerEntry, LedgerEntryUpdate, LedgerStore, NewLedgerEntry, StoreError,
};
use cashflow_shared::types::LedgerEntryId;

/// Cash launch repository implementation.
#[derive(Debug)]
pub struct CashLaunchRepository {
    db: DatabaseConnection,
}

impl CashLaunchRepository {
    /// Create a new cash launch repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl LedgerStore for CashLaunchRepository {
    async fn insert(&self, entry: NewLedgerEntry) -> Result<LedgerEntry, StoreError> {
        let active_model = cash_launches::ActiveModel {
            id: NotSet,
            reference_date: Set(entry.reference_date),
            entry_type: Set(entry.entry_type.code().to_string()),
            description: Set(entry.description),
            value: Set(entry.value),
            created_at: Set(entry.created_at.into()),
            updated_at: Set(entry.updated_at.into()),
        };

        let model = active_model.insert(&self.db).await.map_err(to_store_error)?;

        to_domain(model)
    }

    async fn update(&self, update: LedgerEntryUpdate) -> Result<LedgerEntry, StoreError> {
        let id = update.id;
        let stored = cash_launches::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(to_store_error)?
            .ok_or(StoreError::NotFound(id))?;

        let mut active_model: cash_launches::ActiveModel = stored.into();
        active_model.reference_date = Set(update.reference_date);
        active_model.entry_type = Set(update.entry_type.code().to_string());
        active_model.description = Set(update.description);
        active_model.value = Set(update.value);
        active_model.updated_at = Set(update.updated_at.into());

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::NotFound(id),
            other => to_store_error(other),
        })?;

        to_domain(model)
    }

    async fn delete_by_id(&self, id: LedgerEntryId) -> Result<(), StoreError> {
        let result = cash_launches::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(to_store_error)?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError> {
        let model = cash_launches::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(to_store_error)?;

        model.map(to_domain).transpose()
    }

    async fn list_all(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let models = cash_launches::Entity::find()
            .order_by_asc(cash_launches::Column::ReferenceDate)
            .order_by_asc(cash_launches::Column::EntryType)
            .order_by_asc(cash_launches::Column::Value)
            .order_by_asc(cash_launches::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_store_error)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<LedgerEntry>, StoreError> {
        let models = cash_launches::Entity::find()
            .filter(cash_launches::Column::ReferenceDate.eq(date))
            .order_by_asc(cash_launches::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_store_error)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let models = cash_launches::Entity::find()
            .filter(cash_launches::Column::ReferenceDate.between(from, to))
            .order_by_asc(cash_launches::Column::ReferenceDate)
            .order_by_asc(cash_launches::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_store_error)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await.map_err(to_store_error)
    }
}

/// Classify a database error. Unique violations keep the driver's detail.
fn to_store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::DuplicateKey(detail),
        _ => {
            warn!(error = %err, "Cash launch query failed");
            StoreError::Backend(err.to_string())
        }
    }
}

/// Convert a database row to the domain launch.
fn to_domain(model: cash_launches::Model) -> Result<LedgerEntry, StoreError> {
    let entry_type = EntryType::from_code(model.entry_type.trim()).ok_or_else(|| {
        StoreError::Backend(format!(
            "cash launch {} has unknown type {:?}",
            model.id, model.entry_type
        ))
    })?;

    Ok(LedgerEntry {
        id: LedgerEntryId::new(model.id),
        reference_date: model.reference_date,
        entry_type,
        description: model.description,
        value: model.value,
        updated_at: model.updated_at.with_timezone(&Utc),
        created_at: model.created_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timestamp() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-01T12:00:00+00:00").unwrap()
    }

    fn row(id: i64, entry_type: &str, value: rust_decimal::Decimal) -> cash_launches::Model {
        cash_launches::Model {
            id,
            reference_date: date(2000, 11, 22),
            entry_type: entry_type.to_string(),
            description: "SALE OF GOODS".to_string(),
            value,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn repo(db: MockDatabase) -> CashLaunchRepository {
        CashLaunchRepository::new(db.into_connection())
    }

    #[tokio::test]
    async fn test_insert_maps_returned_row() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![row(1, "C", dec!(987.65))]]),
        );
        let entry = NewLedgerEntry {
            reference_date: date(2000, 11, 22),
            entry_type: EntryType::Credit,
            description: "SALE OF GOODS".to_string(),
            value: dec!(987.65),
            created_at: timestamp().with_timezone(&Utc),
            updated_at: timestamp().with_timezone(&Utc),
        };

        let stored = repo.insert(entry).await.unwrap();

        assert_eq!(stored.id, LedgerEntryId::new(1));
        assert_eq!(stored.entry_type, EntryType::Credit);
        assert_eq!(stored.value, dec!(987.65));
        assert_eq!(stored.created_at, timestamp().with_timezone(&Utc));
    }

    #[tokio::test]
    async fn test_find_by_date_maps_rows() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
                row(1, "C", dec!(987.65)),
                row(2, "D", dec!(12.34)),
            ]]),
        );

        let entries = repo.find_by_date(date(2000, 11, 22)).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].entry_type, EntryType::Debit);
        assert_eq!(entries[1].signed_value(), dec!(-12.34));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<cash_launches::Model>::new()]),
        );

        assert_eq!(repo.find_by_id(LedgerEntryId::new(5)).await, Ok(None));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<cash_launches::Model>::new()]),
        );
        let update = LedgerEntryUpdate {
            id: LedgerEntryId::new(3),
            reference_date: date(2000, 11, 22),
            entry_type: EntryType::Debit,
            description: "REFUND".to_string(),
            value: dec!(1.00),
            updated_at: Utc::now(),
        };

        assert_eq!(
            repo.update(update).await,
            Err(StoreError::NotFound(LedgerEntryId::new(3)))
        );
    }

    #[tokio::test]
    async fn test_delete_without_affected_rows_is_not_found() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }]),
        );

        assert_eq!(
            repo.delete_by_id(LedgerEntryId::new(9)).await,
            Err(StoreError::NotFound(LedgerEntryId::new(9)))
        );
    }

    #[tokio::test]
    async fn test_delete_existing_row() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]),
        );

        assert_eq!(repo.delete_by_id(LedgerEntryId::new(9)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_query_failure_is_backend_error() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())]),
        );

        let err = repo.list_all().await.unwrap_err();

        assert!(matches!(err, StoreError::Backend(message) if message.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_unknown_type_code_is_backend_error() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![row(4, "X", dec!(1.00))]]),
        );

        let err = repo.list_all().await.unwrap_err();

        assert!(matches!(err, StoreError::Backend(message) if message.contains("unknown type")));
    }
}
