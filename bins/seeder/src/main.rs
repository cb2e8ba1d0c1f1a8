//! Database seeder for Cashflow development and testing.
//!
//! Seeds a month of sample credit and debit launches so the balance endpoints
//! have data to aggregate. Launches go through the ledger service, so they are
//! normalized and validated like API input, within the `[ledger]` bounds of
//! the loaded configuration.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use cashflow_core::ledger::{LedgerEntryInput, LedgerService, ReferenceDateBounds};
use cashflow_db::{CashLaunchRepository, connect_with};
use cashflow_shared::AppConfig;

/// Sample launches as (day offset, type, description, value).
const SAMPLE_LAUNCHES: &[(u64, &str, &str, &str)] = &[
    (0, "C", "opening balance", "1500.00"),
    (0, "D", "office rent", "850.00"),
    (1, "C", "sale of goods", "987.65"),
    (1, "D", "supplier invoice", "12.34"),
    (3, "c", "  consulting   fee ", "420.10"),
    (7, "d", "utilities", "133.333"),
    (14, "C", "sale of goods", "275.005"),
    (21, "D", "payroll", "1200.00"),
    (28, "C", "refund received", "64.99"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;

    let today = Utc::now().date_naive();
    let bounds = ReferenceDateBounds::from_config(&config.ledger, today);
    println!("  Reference dates between {} and {}", bounds.min(), bounds.max());
    let service = LedgerService::new(Arc::new(CashLaunchRepository::new(db)), bounds);

    if !service.list().await?.is_empty() {
        println!("  Cash launches already exist, skipping...");
        return Ok(());
    }

    println!("Seeding cash launches...");
    for mut input in sample_inputs(first_day_of_previous_month(today))? {
        let stored = service.validate_and_insert(&mut input).await?;
        println!(
            "  #{} {} {} {} {}",
            stored.id, stored.reference_date, stored.entry_type, stored.value, stored.description
        );
    }

    println!("Seeding complete!");
    Ok(())
}

fn sample_inputs(start: NaiveDate) -> anyhow::Result<Vec<LedgerEntryInput>> {
    SAMPLE_LAUNCHES
        .iter()
        .map(|(offset, kind, description, value)| {
            let value = Decimal::from_str(value).context("Invalid sample value")?;
            Ok(LedgerEntryInput::new(start + Days::new(*offset), *kind, *description, value))
        })
        .collect()
}

fn first_day_of_previous_month(today: NaiveDate) -> NaiveDate {
    let month_start = today.with_day(1).unwrap_or(today);
    month_start
        .checked_sub_months(Months::new(1))
        .unwrap_or(month_start)
}
