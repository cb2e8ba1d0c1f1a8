//! Cash launches migration.
//!
//! Creates the ledger table. Balances are computed from it on read.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CASH_LAUNCHES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS cash_launches CASCADE;")
            .await?;
        Ok(())
    }
}

const CASH_LAUNCHES_SQL: &str = r"
-- One row per credit/debit launch
CREATE TABLE cash_launches (
    id BIGSERIAL PRIMARY KEY,
    reference_date DATE NOT NULL,
    type CHAR(1) NOT NULL,
    description VARCHAR(100) NOT NULL,
    value NUMERIC(15, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_cash_launches_type CHECK (type IN ('C', 'D')),
    CONSTRAINT chk_cash_launches_value_positive CHECK (value > 0)
);

-- Daily and range balance lookups
CREATE INDEX idx_cash_launches_reference_date ON cash_launches(reference_date);
";
