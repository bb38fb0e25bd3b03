//! Age resolution
//!
//! Whole completed years between a birth date and a reference date.

use chrono::{Datelike, Local, NaiveDate};

use super::error::FormatError;

/// ISO 8601 calendar date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO 8601 calendar date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Result<NaiveDate, FormatError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        FormatError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Age in completed years on `today`.
///
/// One year is subtracted while this year's birthday is still ahead, so a
/// 29 February birthday is only reached on 1 March in common years. Birth
/// dates after `today` give a negative age.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}
