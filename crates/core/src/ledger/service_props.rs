//! Property-based tests for LedgerService balance queries.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::signed_sum;
use super::bounds::ReferenceDateBounds;
use super::entry::{EntryType, LedgerEntryInput};
use super::memory::InMemoryLedgerStore;
use super::range::DateRange;
use super::service::LedgerService;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 11, 1).unwrap()
}

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

/// Launches spread over the 31 days starting at [`base_date`].
fn launches() -> impl Strategy<Value = Vec<(u64, EntryType, Decimal)>> {
    prop::collection::vec((0u64..31, entry_type_strategy(), positive_amount()), 0..40)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

async fn seeded_service(
    launches: &[(u64, EntryType, Decimal)],
) -> LedgerService<InMemoryLedgerStore> {
    let service = LedgerService::new(
        Arc::new(InMemoryLedgerStore::new()),
        ReferenceDateBounds::new(
            NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2036, 10, 19).unwrap(),
        ),
    );

    for (offset, kind, value) in launches {
        let mut input = LedgerEntryInput::new(
            base_date() + Days::new(*offset),
            kind.code(),
            "generated launch",
            *value,
        );
        service.validate_and_insert(&mut input).await.expect("insert");
    }
    service
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// The balances of a range add up to the signed total of every stored launch.
    #[test]
    fn prop_range_balances_are_additive(launches in launches()) {
        let rt = runtime();
        let (balances, stored) = rt.block_on(async {
            let service = seeded_service(&launches).await;
            let range = DateRange::new(base_date(), base_date() + Days::new(30));
            (
                service.balance_by_range(&range).await.expect("balances"),
                service.list().await.expect("list"),
            )
        });

        let total: Decimal = balances.iter().map(|b| b.value).sum();
        prop_assert_eq!(Some(total), signed_sum(&stored));
    }

    /// Single-date queries agree with the matching row of a range query, and
    /// repeat queries return identical results.
    #[test]
    fn prop_single_date_matches_range(launches in launches(), offset in 0u64..31) {
        let rt = runtime();
        let day = base_date() + Days::new(offset);
        let (single, again, balances) = rt.block_on(async {
            let service = seeded_service(&launches).await;
            let range = DateRange::new(base_date(), base_date() + Days::new(30));
            (
                service.balance_by_date(Some(day)).await.expect("balance"),
                service.balance_by_date(Some(day)).await.expect("balance"),
                service.balance_by_range(&range).await.expect("balances"),
            )
        });

        prop_assert_eq!(&single, &again);
        match balances.iter().find(|b| b.reference_date == day) {
            Some(row) => prop_assert_eq!(row, &single),
            None => prop_assert_eq!(single.value, Decimal::ZERO),
        }
    }

    /// Rejected ranges never reach the store.
    #[test]
    fn prop_rejected_range_skips_store(
        launches in launches(),
        span in 32u64..200,
    ) {
        let rt = runtime();
        let (result, calls_before, calls_after) = rt.block_on(async {
            let service = seeded_service(&launches).await;
            let before = service.store().call_count();
            let range = DateRange::new(base_date(), base_date() + Days::new(span));
            let result = service.balance_by_range(&range).await;
            (result, before, service.store().call_count())
        });

        prop_assert!(result.is_err());
        prop_assert_eq!(calls_before, calls_after);
    }
}
