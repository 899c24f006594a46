//! Calendar date handling
//!
//! Crew records carry plain calendar dates (no time, no zone). At every
//! boundary they travel as text in the literal `yyyy-MM-dd` layout and
//! nothing else is accepted: `2000-1-1`, `+2000-01-01` or `2000/01/01`
//! are all rejected.

use chrono::{Datelike, Local, Months, NaiveDate};
use thiserror::Error;

/// The one textual layout accepted for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors related to calendar dates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Date '{0}' is not in yyyy-MM-dd format")]
    InvalidFormat(String),

    #[error("Date '{0}' does not exist in the calendar")]
    OutOfRange(String),
}

/// Parses a date in strict `yyyy-MM-dd` form
///
/// # Errors
///
/// Returns `DateError::InvalidFormat` if the text does not have four year
/// digits, two month digits and two day digits separated by hyphens, and
/// `DateError::OutOfRange` if it names a day that does not exist. Years
/// start at `0001`.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(DateError::InvalidFormat(text.to_string()));
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
        .ok_or_else(|| DateError::OutOfRange(text.to_string()))
}

/// Formats a date as `yyyy-MM-dd`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Adds whole years, clamping 29 February to 28 February in common years
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// Supplies the current calendar date
pub trait DateProvider: Send + Sync {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Date provider backed by the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Date provider pinned to a single day, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedDateProvider(pub NaiveDate);

impl DateProvider for FixedDateProvider {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
