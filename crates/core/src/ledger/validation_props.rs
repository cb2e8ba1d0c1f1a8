//! Property-based tests for entry and range validation.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::bounds::ReferenceDateBounds;
use super::entry::{EntryType, LedgerEntryInput};
use super::error::LedgerError;
use super::range::{DateRange, MAX_RANGE_DAYS, validate_range};
use super::validation::validate_entry;

fn bounds() -> ReferenceDateBounds {
    ReferenceDateBounds::new(
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2036, 10, 19).unwrap(),
    )
}

/// Dates well inside the bounds (2000-01-01 plus up to ~27 years).
fn in_bounds_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..10_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Days::new(days)
    })
}

/// Amounts from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Zero and negative amounts down to -1,000,000.00.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn type_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("c".to_string()),
        Just("C".to_string()),
        Just(" d ".to_string()),
        Just("D".to_string()),
    ]
}

fn description() -> impl Strategy<Value = String> {
    "[a-z]{3,20}( +[a-z]{1,20}){0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any well-formed input validates, and the stored form is what the
    /// caller's input was normalized to.
    #[test]
    fn prop_valid_input_accepted(
        day in in_bounds_date(),
        code in type_code(),
        text in description(),
        value in positive_amount(),
    ) {
        let mut input = LedgerEntryInput::new(day, code, text, value);

        let validated = validate_entry(&mut input, &bounds());

        let validated = validated.expect("well-formed input must validate");
        prop_assert_eq!(validated.reference_date, day);
        prop_assert_eq!(validated.entry_type.code(), input.entry_type.as_str());
        prop_assert_eq!(&validated.description, &input.description);
        prop_assert_eq!(validated.value, value);
        prop_assert_eq!(validated.description.clone(), validated.description.to_uppercase());
    }

    /// Normalization is idempotent: validating the normalized input again
    /// leaves it unchanged.
    #[test]
    fn prop_normalization_idempotent(
        day in in_bounds_date(),
        code in type_code(),
        text in description(),
        value in positive_amount(),
    ) {
        let mut input = LedgerEntryInput::new(day, code, text, value);
        let first = validate_entry(&mut input, &bounds()).expect("valid");
        let normalized = input.clone();

        let second = validate_entry(&mut input, &bounds()).expect("valid");

        prop_assert_eq!(first, second);
        prop_assert_eq!(input, normalized);
    }

    /// A non-positive value is the only violation reported for otherwise valid input.
    #[test]
    fn prop_non_positive_value_rejected(
        day in in_bounds_date(),
        text in description(),
        value in non_positive_amount(),
    ) {
        let mut input = LedgerEntryInput::new(day, "C", text, value);

        let result = validate_entry(&mut input, &bounds());

        prop_assert_eq!(
            result,
            Err(LedgerError::ModelValidate("value is less or equal 0".to_string()))
        );
    }

    /// Spans up to and including the maximum are accepted.
    #[test]
    fn prop_range_within_span_accepted(
        from in in_bounds_date(),
        span in 0..=MAX_RANGE_DAYS,
    ) {
        let to = from + Days::new(span.unsigned_abs());

        let range = validate_range(&DateRange::new(from, to), &bounds());

        let range = range.expect("span within limit");
        prop_assert!(range.contains(from));
        prop_assert!(range.contains(to));
    }

    /// Spans beyond the maximum are rejected with the span message.
    #[test]
    fn prop_range_over_span_rejected(
        from in in_bounds_date(),
        span in (MAX_RANGE_DAYS + 1)..=400,
    ) {
        let to = from + Days::new(span.unsigned_abs());

        let result = validate_range(&DateRange::new(from, to), &bounds());

        prop_assert_eq!(
            result,
            Err(LedgerError::ParamValidate("range is greater than 31 days".to_string()))
        );
    }

    /// A reversed range is always rejected as such.
    #[test]
    fn prop_reversed_range_rejected(
        to in in_bounds_date(),
        gap in 1u64..400,
    ) {
        let from = to + Days::new(gap);

        let result = validate_range(&DateRange::new(from, to), &bounds());

        prop_assert_eq!(
            result,
            Err(LedgerError::ParamValidate("to is smaller than from".to_string()))
        );
    }

    /// The polarity of a validated entry matches its normalized code.
    #[test]
    fn prop_entry_type_polarity(
        code in type_code(),
        value in positive_amount(),
    ) {
        let kind = EntryType::from_code(code.trim().to_uppercase().as_str()).expect("code");
        let signed = kind.signed(value);

        match kind {
            EntryType::Credit => prop_assert_eq!(signed, value),
            EntryType::Debit => prop_assert_eq!(signed, -value),
        }
    }
}
