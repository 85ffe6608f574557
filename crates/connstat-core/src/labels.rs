//! Bucket label derivation
//!
//! Labels are what the chart shows on its x-axis and also the keys the
//! aggregator groups on. Formatting follows en-US conventions regardless of
//! the host locale:
//!
//! | Granularity | Label                  | Example              |
//! |-------------|------------------------|----------------------|
//! | daily       | `M/D/YYYY`             | `1/5/2024`           |
//! | weekly      | `<Month> - Week <n>`   | `January - Week 1`   |
//! | monthly     | `<Month>`              | `January`            |
//!
//! The weekly number is a week-of-month, anchored to the first of the month:
//! `n = ceil((day_of_month - day_of_week + 1) / 7)`. It is *not* an ISO week,
//! and a week straddling two months appears under both month names. Monthly
//! labels carry no year, so January 2023 and January 2024 share a bucket.

use chrono::{Datelike, Month, NaiveDate};

use crate::types::{Granularity, WeekStart};

/// Label used for records whose day could not be parsed
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Full English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or(INVALID_DATE_LABEL)
}

/// Short en-US date, without zero padding
pub fn daily_label(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Week-of-month number
///
/// Can be 0 when the 1st falls late in the week: before the first week start
/// of the month, the formula has not reached week 1 yet.
pub fn week_of_month(date: NaiveDate, week_start: WeekStart) -> i32 {
    let day_of_month = date.day() as i32;
    let day_of_week = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    } as i32;

    // ceil(n / 7) for the whole range of n, including non-positive values
    (day_of_month - day_of_week + 1 + 6).div_euclid(7)
}

pub fn weekly_label(date: NaiveDate, week_start: WeekStart) -> String {
    format!(
        "{} - Week {}",
        month_name(date.month()),
        week_of_month(date, week_start)
    )
}

pub fn monthly_label(date: NaiveDate) -> String {
    month_name(date.month()).to_string()
}

/// Derive the bucket label for a record date under a granularity
///
/// Returns `None` for [`Granularity::All`], which does not bucket. An
/// unparseable date maps to [`INVALID_DATE_LABEL`] for every other
/// granularity.
pub fn bucket_label(
    date: Option<NaiveDate>,
    granularity: Granularity,
    week_start: WeekStart,
) -> Option<String> {
    let label = match (granularity, date) {
        (Granularity::All, _) => return None,
        (_, None) => INVALID_DATE_LABEL.to_string(),
        (Granularity::Daily, Some(date)) => daily_label(date),
        (Granularity::Weekly, Some(date)) => weekly_label(date, week_start),
        (Granularity::Monthly, Some(date)) => monthly_label(date),
    };
    Some(label)
}
