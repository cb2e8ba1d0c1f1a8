//! Business rule validation for cash launches.
//!
//! Every rule runs and every violation is collected; the joined messages form
//! a single error.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::bounds::ReferenceDateBounds;
use super::entry::{EntryType, LedgerEntryInput, ValidatedEntry};
use super::error::LedgerError;
use super::normalize::normalize_entry;

/// Minimum description length, in characters, after normalization.
pub const DESCRIPTION_MIN_LEN: usize = 3;
/// Maximum description length, in characters, after normalization.
pub const DESCRIPTION_MAX_LEN: usize = 100;
/// Largest storable value, the limit of a `NUMERIC(15, 2)` column.
// 999_999_999_999_999 with scale 2; `Decimal::new` is not `const`.
pub const VALUE_MAX: Decimal = Decimal::from_parts(0xA4C6_7FFF, 0x0003_8D7E, 0, false, 2);

const TYPE_EMPTY: &str = "type is empty";
const TYPE_INVALID: &str = "type not in [C, D]";
const DESCRIPTION_EMPTY: &str = "description is empty";
const VALUE_NOT_POSITIVE: &str = "value is less or equal 0";

/// Checks a date against the bounds, describing the violation under `label`.
pub(crate) fn check_date(
    label: &str,
    date: Option<NaiveDate>,
    bounds: &ReferenceDateBounds,
) -> Result<NaiveDate, String> {
    match date {
        None => Err(format!("{label} is empty")),
        Some(date) if !bounds.contains(date) => Err(format!(
            "{label} is not between {} and {}",
            bounds.min(),
            bounds.max()
        )),
        Some(date) => Ok(date),
    }
}

/// Validates a single reference date used as a query parameter.
///
/// # Errors
///
/// Returns `LedgerError::ParamValidate` if the date is missing or out of bounds.
pub fn validate_reference_date(
    date: Option<NaiveDate>,
    bounds: &ReferenceDateBounds,
) -> Result<NaiveDate, LedgerError> {
    check_date("reference date", date, bounds).map_err(LedgerError::ParamValidate)
}

/// Normalizes `input` in place, then validates it.
///
/// Checks run in field order (reference date, type, description, value).
///
/// # Errors
///
/// Returns `LedgerError::ModelValidate` listing every violation found.
pub fn validate_entry(
    input: &mut LedgerEntryInput,
    bounds: &ReferenceDateBounds,
) -> Result<ValidatedEntry, LedgerError> {
    normalize_entry(input);

    let mut messages = Vec::new();

    let reference_date = match check_date("reference date", input.reference_date, bounds) {
        Ok(date) => Some(date),
        Err(violation) => {
            messages.push(violation);
            None
        }
    };

    let entry_type = if input.entry_type.is_empty() {
        messages.push(TYPE_EMPTY.to_string());
        None
    } else {
        let parsed = EntryType::from_code(&input.entry_type);
        if parsed.is_none() {
            messages.push(TYPE_INVALID.to_string());
        }
        parsed
    };

    let description_len = input.description.chars().count();
    if description_len == 0 {
        messages.push(DESCRIPTION_EMPTY.to_string());
    } else if !(DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&description_len) {
        messages.push(format!(
            "description size is not between {DESCRIPTION_MIN_LEN} and {DESCRIPTION_MAX_LEN}"
        ));
    }

    if input.value <= Decimal::ZERO {
        messages.push(VALUE_NOT_POSITIVE.to_string());
    } else if input.value > VALUE_MAX {
        messages.push(format!("value is greater than {VALUE_MAX}"));
    }

    match (reference_date, entry_type) {
        (Some(reference_date), Some(entry_type)) if messages.is_empty() => Ok(ValidatedEntry {
            reference_date,
            entry_type,
            description: input.description.clone(),
            value: input.value,
        }),
        _ => Err(LedgerError::model_validate(&messages)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounds() -> ReferenceDateBounds {
        ReferenceDateBounds::new(date(1900, 1, 1), date(2036, 10, 19))
    }

    fn valid_input() -> LedgerEntryInput {
        LedgerEntryInput::new(date(2000, 11, 22), "c", "  sale   of goods ", dec!(987.654))
    }

    #[test]
    fn test_valid_entry_is_normalized() {
        let mut input = valid_input();

        let validated = validate_entry(&mut input, &bounds()).unwrap();

        assert_eq!(validated.entry_type, EntryType::Credit);
        assert_eq!(validated.description, "SALE OF GOODS");
        assert_eq!(validated.value, dec!(987.65));
        // caller observes the canonical form too
        assert_eq!(input.entry_type, "C");
        assert_eq!(input.description, "SALE OF GOODS");
        assert_eq!(input.value, dec!(987.65));
    }

    #[test]
    fn test_empty_entry_lists_all_violations_in_field_order() {
        let mut input = LedgerEntryInput::default();

        let err = validate_entry(&mut input, &bounds()).unwrap_err();

        assert_eq!(
            err,
            LedgerError::ModelValidate(
                "reference date is empty;type is empty;description is empty;value is less or equal 0"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_negative_cent_is_single_violation() {
        let mut input = valid_input();
        input.value = dec!(-0.01);

        let err = validate_entry(&mut input, &bounds()).unwrap_err();

        assert_eq!(err, LedgerError::ModelValidate("value is less or equal 0".to_string()));
    }

    #[test]
    fn test_value_rounding_to_zero_is_rejected() {
        let mut input = valid_input();
        input.value = dec!(0.004);

        let err = validate_entry(&mut input, &bounds()).unwrap_err();

        assert_eq!(err.to_string(), "value is less or equal 0");
    }

    #[rstest]
    #[case(dec!(9999999999999.99), true)]
    #[case(dec!(9999999999999.994), true)]
    #[case(dec!(9999999999999.995), false)]
    #[case(dec!(10000000000000), false)]
    #[case(dec!(50000000000000000000000000000), false)]
    fn test_value_upper_limit(#[case] value: Decimal, #[case] accepted: bool) {
        let mut input = valid_input();
        input.value = value;

        let result = validate_entry(&mut input, &bounds());

        if accepted {
            assert_eq!(result.unwrap().value, dec!(9999999999999.99));
        } else {
            assert_eq!(
                result.unwrap_err(),
                LedgerError::ModelValidate("value is greater than 9999999999999.99".to_string())
            );
        }
    }

    #[rstest]
    #[case(date(1899, 12, 31))]
    #[case(date(2036, 10, 20))]
    fn test_reference_date_out_of_bounds(#[case] reference_date: NaiveDate) {
        let mut input = valid_input();
        input.reference_date = Some(reference_date);

        let err = validate_entry(&mut input, &bounds()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "reference date is not between 1900-01-01 and 2036-10-19"
        );
    }

    #[rstest]
    #[case("x", "type not in [C, D]")]
    #[case("credit", "type not in [C, D]")]
    #[case("c d", "type not in [C, D]")]
    #[case("   ", "type is empty")]
    fn test_type_violations(#[case] entry_type: &str, #[case] expected: &str) {
        let mut input = valid_input();
        input.entry_type = entry_type.to_string();

        let err = validate_entry(&mut input, &bounds()).unwrap_err();

        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    #[case("ab", false)]
    #[case(" a   b ", false)]
    #[case("abc", true)]
    #[case(&"x".repeat(100), true)]
    #[case(&"x".repeat(101), false)]
    #[case("café", true)]
    fn test_description_size(#[case] description: &str, #[case] accepted: bool) {
        let mut input = valid_input();
        input.description = description.to_string();

        let result = validate_entry(&mut input, &bounds());

        if accepted {
            assert!(result.is_ok());
        } else {
            assert_eq!(
                result.unwrap_err().to_string(),
                "description size is not between 3 and 100"
            );
        }
    }

    #[test]
    fn test_blank_description_is_empty() {
        let mut input = valid_input();
        input.description = " \t ".to_string();

        let err = validate_entry(&mut input, &bounds()).unwrap_err();

        assert_eq!(err.to_string(), "description is empty");
    }

    #[test]
    fn test_validate_reference_date() {
        assert_eq!(
            validate_reference_date(Some(date(2000, 11, 22)), &bounds()),
            Ok(date(2000, 11, 22))
        );
        assert_eq!(
            validate_reference_date(None, &bounds()),
            Err(LedgerError::ParamValidate("reference date is empty".to_string()))
        );
        assert!(matches!(
            validate_reference_date(Some(date(1800, 1, 1)), &bounds()),
            Err(LedgerError::ParamValidate(_))
        ));
    }
}
