//! Tests for strict calendar date handling

use chrono::NaiveDate;
use core_kernel::{
    add_years, format_date, parse_date, DateError, DateProvider, FixedDateProvider,
    SystemDateProvider,
};
use proptest::prelude::*;

#[test]
fn test_format_pads_components() {
    let date = NaiveDate::from_ymd_opt(987, 3, 4).unwrap();
    assert_eq!(format_date(date), "0987-03-04");
}

#[test]
fn test_parse_rejects_whitespace() {
    assert!(matches!(parse_date(" 2000-01-01"), Err(DateError::InvalidFormat(_))));
    assert!(matches!(parse_date("2000-01-01 "), Err(DateError::InvalidFormat(_))));
}

#[test]
fn test_parse_rejects_month_thirteen() {
    assert!(matches!(parse_date("2000-13-01"), Err(DateError::OutOfRange(_))));
}

#[test]
fn test_parse_rejects_year_zero() {
    assert!(matches!(parse_date("0000-01-01"), Err(DateError::OutOfRange(_))));
    assert_eq!(parse_date("0001-01-01"), Ok(NaiveDate::from_ymd_opt(1, 1, 1).unwrap()));
}

#[test]
fn test_fixed_provider() {
    let today = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
    assert_eq!(FixedDateProvider(today).today(), today);
}

#[test]
fn test_system_provider_is_plausible() {
    let today = SystemDateProvider.today();
    assert!(today > NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
}

#[test]
fn test_add_years_regular_day() {
    let date = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
    assert_eq!(add_years(date, 18), NaiveDate::from_ymd_opt(2018, 6, 15));
}

proptest! {
    #[test]
    fn prop_format_then_parse_is_identity(days in 0i64..3_000_000) {
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap() + chrono::Duration::days(days);
        let text = format_date(date);
        prop_assert_eq!(parse_date(&text), Ok(date));
    }
}
