//! Month-name resolution and the date ranges that scope queries to a month.

use time::{Date, Duration, Month, OffsetDateTime, Time};

use crate::Error;

/// An inclusive range of instants.
///
/// Both ends are part of the range. For month ranges the end is the last
/// millisecond of the month, one millisecond before the next month starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first instant in the range.
    pub start: OffsetDateTime,
    /// The last instant in the range.
    pub end: OffsetDateTime,
}

/// Parses one of the twelve English month names, ignoring case.
///
/// # Errors
/// Returns [Error::InvalidMonth] when `name` is not a full English month name.
pub fn parse_month_name(name: &str) -> Result<Month, Error> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" => Month::January,
        "february" => Month::February,
        "march" => Month::March,
        "april" => Month::April,
        "may" => Month::May,
        "june" => Month::June,
        "july" => Month::July,
        "august" => Month::August,
        "september" => Month::September,
        "october" => Month::October,
        "november" => Month::November,
        "december" => Month::December,
        _ => return Err(Error::InvalidMonth(name.to_owned())),
    };

    Ok(month)
}

/// Computes the inclusive range covering `month` of `reference_year`.
///
/// The end of the range is derived from the start of the following month, so
/// 28/29/30/31 day months all fall out of the same calculation.
pub fn month_date_range(month: Month, reference_year: i32) -> DateRange {
    let start = month_start(reference_year, month);
    let next_start = match month {
        Month::December => month_start(reference_year + 1, Month::January),
        month => month_start(reference_year, month.next()),
    };

    DateRange {
        start,
        end: next_start - Duration::milliseconds(1),
    }
}

fn month_start(year: i32, month: Month) -> OffsetDateTime {
    let date = Date::from_calendar_date(year, month, 1).expect("invalid month start date");

    OffsetDateTime::new_utc(date, Time::MIDNIGHT)
}
