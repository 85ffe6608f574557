//! Core domain types for connstat
//!
//! This module contains the record shape delivered by the connections
//! endpoint, plus the small enums and value types that parameterise
//! filtering and aggregation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConnstatError;

/// One day's observed activity as reported by the record source
///
/// Unknown fields in the upstream payload are ignored. Numeric fields that are
/// missing, `null`, or not a number count as zero. Records are not validated.
///
/// # Examples
/// ```
/// use connstat_core::types::RawRecord;
///
/// let record: RawRecord =
///     serde_json::from_str(r#"{"day":"2024-01-01","hour":3,"connections":10}"#).unwrap();
/// assert_eq!(record.day, "2024-01-01");
/// assert_eq!(record.connections, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Calendar day in serialized form, kept exactly as received
    pub day: String,
    /// Hour measure, summed like any other numeric field
    #[serde(default, deserialize_with = "number_or_zero")]
    pub hour: f64,
    /// Number of connections observed
    #[serde(default, deserialize_with = "number_or_zero")]
    pub connections: f64,
}

impl RawRecord {
    /// Create a new record
    pub fn new(day: impl Into<String>, hour: f64, connections: f64) -> Self {
        Self {
            day: day.into(),
            hour,
            connections,
        }
    }

    /// Resolve the record's calendar date in the given timezone
    ///
    /// Returns `None` when `day` cannot be parsed.
    pub fn calendar_date(&self, tz: &Tz) -> Option<NaiveDate> {
        parse_calendar_date(&self.day, tz)
    }
}

/// Numeric numbers and numeric strings pass through, anything else is 0
fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Parse a serialized day into a local calendar date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted into `tz` before the
/// date is taken), and naive `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS`
/// datetimes, which are already local.
///
/// # Examples
/// ```
/// use connstat_core::types::parse_calendar_date;
/// use chrono::NaiveDate;
/// use chrono_tz::Tz;
///
/// let date = parse_calendar_date("2024-01-05", &Tz::UTC);
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5));
///
/// // 23:30 UTC is already the next day in Paris
/// let date = parse_calendar_date("2024-01-05T23:30:00Z", &Tz::Europe__Paris);
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 6));
///
/// assert_eq!(parse_calendar_date("yesterday", &Tz::UTC), None);
/// ```
pub fn parse_calendar_date(day: &str, tz: &Tz) -> Option<NaiveDate> {
    let day = day.trim();

    if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(day) {
        return Some(instant.with_timezone(tz).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(day, fmt) {
            return Some(local.date());
        }
    }

    None
}

/// Temporal bucket width applied by the aggregator
///
/// # Examples
/// ```
/// use connstat_core::types::Granularity;
/// use std::str::FromStr;
///
/// assert_eq!(Granularity::from_str("weekly").unwrap(), Granularity::Weekly);
/// assert_eq!(Granularity::from_str("Month").unwrap(), Granularity::Monthly);
/// assert_eq!(Granularity::Daily.to_string(), "daily");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// No bucketing, one point per record
    #[default]
    All,
    /// One bucket per calendar date
    Daily,
    /// One bucket per month-anchored week
    Weekly,
    /// One bucket per month name
    Monthly,
}

impl Granularity {
    /// Every granularity, in the order offered to users
    pub const VARIANTS: [Granularity; 4] = [
        Granularity::All,
        Granularity::Monthly,
        Granularity::Weekly,
        Granularity::Daily,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Whether records are grouped into buckets at all
    pub fn is_bucketed(&self) -> bool {
        !matches!(self, Self::All)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ConnstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(ConnstatError::InvalidGranularity(format!(
                "'{s}'. Expected one of: all, daily, weekly, monthly"
            ))),
        }
    }
}

/// First day of the week used by the week-of-month label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks begin on Sunday (day 0)
    #[default]
    Sunday,
    /// Weeks begin on Monday (day 0)
    Monday,
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ConnstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            _ => Err(ConnstatError::InvalidArgument(format!(
                "Invalid week start '{s}'. Expected 'sunday' or 'monday'"
            ))),
        }
    }
}

/// Inclusive calendar-date window
///
/// The window only restricts anything when both bounds are present.
///
/// # Examples
/// ```
/// use connstat_core::types::DateRange;
/// use chrono::NaiveDate;
///
/// let jan = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1),
///     NaiveDate::from_ymd_opt(2024, 1, 31),
/// );
/// assert!(jan.is_active());
/// assert!(jan.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
///
/// let open = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None);
/// assert!(!open.is_active());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start bound (inclusive)
    pub start: Option<NaiveDate>,
    /// End bound (inclusive)
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from two optional bounds
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range that passes everything
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Both bounds, if both are set
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// Whether the range restricts anything
    pub fn is_active(&self) -> bool {
        self.bounds().is_some()
    }

    /// Check whether a date falls inside the window
    ///
    /// Always true for an inactive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_ignores_extra_fields() {
        let json = r#"{"day":"2024-03-01","hour":14,"connections":220,"school":"north"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, RawRecord::new("2024-03-01", 14.0, 220.0));
    }

    #[test]
    fn test_record_missing_numbers_default_to_zero() {
        let record: RawRecord = serde_json::from_str(r#"{"day":"2024-03-01"}"#).unwrap();
        assert_eq!(record.hour, 0.0);
        assert_eq!(record.connections, 0.0);
    }

    #[test]
    fn test_record_non_numeric_fields_count_as_zero() {
        let json = r#"[
            {"day":"2024-01-06","hour":null,"connections":7},
            {"day":"2024-01-07","hour":"3","connections":true},
            {"day":"2024-01-08","hour":[1],"connections":{"n":2}}
        ]"#;
        let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(
            records,
            vec![
                RawRecord::new("2024-01-06", 0.0, 7.0),
                RawRecord::new("2024-01-07", 3.0, 0.0),
                RawRecord::new("2024-01-08", 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_parse_calendar_date_forms() {
        let tz = Tz::UTC;
        assert_eq!(parse_calendar_date("2024-02-29", &tz), Some(date(2024, 2, 29)));
        assert_eq!(
            parse_calendar_date("2024-02-29T08:15:00", &tz),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            parse_calendar_date("2024-02-29 08:15:00.250", &tz),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            parse_calendar_date("2024-02-29T08:15:00+01:00", &tz),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn test_parse_calendar_date_uses_timezone_for_instants() {
        let instant = "2024-06-30T22:00:00Z";
        assert_eq!(parse_calendar_date(instant, &Tz::UTC), Some(date(2024, 6, 30)));
        assert_eq!(
            parse_calendar_date(instant, &Tz::Asia__Tokyo),
            Some(date(2024, 7, 1))
        );
        assert_eq!(
            parse_calendar_date(instant, &Tz::America__New_York),
            Some(date(2024, 6, 30))
        );
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        let tz = Tz::UTC;
        assert_eq!(parse_calendar_date("", &tz), None);
        assert_eq!(parse_calendar_date("2024-13-01", &tz), None);
        assert_eq!(parse_calendar_date("2023-02-29", &tz), None);
        assert_eq!(parse_calendar_date("not a date", &tz), None);
    }

    #[test]
    fn test_granularity_parsing() {
        assert_eq!("all".parse::<Granularity>().unwrap(), Granularity::All);
        assert_eq!("DAILY".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("week".parse::<Granularity>().unwrap(), Granularity::Weekly);
        assert_eq!(" monthly ".parse::<Granularity>().unwrap(), Granularity::Monthly);
        assert!(matches!(
            "hourly".parse::<Granularity>(),
            Err(ConnstatError::InvalidGranularity(_))
        ));
    }

    #[test]
    fn test_only_all_skips_bucketing() {
        assert!(!Granularity::All.is_bucketed());
        assert!(Granularity::Daily.is_bucketed());
        assert!(Granularity::Weekly.is_bucketed());
        assert!(Granularity::Monthly.is_bucketed());
    }

    #[test]
    fn test_granularity_serde_names() {
        assert_eq!(
            serde_json::to_string(&Granularity::Weekly).unwrap(),
            "\"weekly\""
        );
        let parsed: Granularity = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(parsed, Granularity::Monthly);
        assert_eq!(Granularity::default(), Granularity::All);
    }

    #[test]
    fn test_week_start_parsing() {
        assert_eq!("Monday".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert_eq!("sun".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert!("friday".parse::<WeekStart>().is_err());
    }

    #[test]
    fn test_date_range_needs_both_bounds() {
        let half_open = DateRange::new(None, Some(date(2024, 1, 31)));
        assert!(!half_open.is_active());
        assert!(half_open.contains(date(1999, 1, 1)));

        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_inverted_date_range_matches_nothing() {
        let range = DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
        assert!(range.is_active());
        assert!(!range.contains(date(2024, 1, 15)));
    }
}
