//! Date-range filtering for raw records
//!
//! The filter narrows a record list to an inclusive calendar-date window.
//! It is a no-op unless *both* bounds are set, and it never reorders records.
//! Records whose day cannot be parsed are dropped whenever the window is
//! active. They are never silently kept.
//!
//! # Examples
//!
//! ```
//! use connstat_core::filters::RangeFilter;
//! use connstat_core::types::RawRecord;
//! use chrono::NaiveDate;
//!
//! let filter = RangeFilter::new()
//!     .with_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_until(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
//!
//! let records = vec![
//!     RawRecord::new("2024-01-15", 9.0, 40.0),
//!     RawRecord::new("2024-03-01", 11.0, 55.0),
//! ];
//! let kept = filter.apply(&records);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].day, "2024-01-15");
//! ```

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::trace;

use crate::types::{DateRange, RawRecord};

/// Filter configuration for raw records
#[derive(Debug, Clone)]
pub struct RangeFilter {
    /// Inclusive window to keep
    pub range: DateRange,
    /// Timezone used to resolve timestamp-form days
    pub tz: Tz,
}

impl Default for RangeFilter {
    fn default() -> Self {
        Self {
            range: DateRange::unbounded(),
            tz: Tz::UTC,
        }
    }
}

impl RangeFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from an existing range
    pub fn from_range(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    /// Set the start date (inclusive)
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.range.start = Some(date);
        self
    }

    /// Set the end date (inclusive)
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.range.end = Some(date);
        self
    }

    /// Set the timezone used to resolve timestamps
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// Check if a record passes the filter
    pub fn matches(&self, record: &RawRecord) -> bool {
        if !self.range.is_active() {
            return true;
        }

        match record.calendar_date(&self.tz) {
            Some(date) => self.range.contains(date),
            None => {
                trace!("Excluding record with unparseable day '{}'", record.day);
                false
            }
        }
    }

    /// Keep the matching subsequence of `records`, preserving order
    pub fn apply(&self, records: &[RawRecord]) -> Vec<RawRecord> {
        if !self.range.is_active() {
            return records.to_vec();
        }

        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Narrow `records` to the inclusive window described by `range`
///
/// Returns `records` unchanged when either bound is missing.
pub fn filter_by_range(records: &[RawRecord], range: &DateRange, tz: &Tz) -> Vec<RawRecord> {
    RangeFilter::from_range(*range)
        .with_timezone(*tz)
        .apply(records)
}
