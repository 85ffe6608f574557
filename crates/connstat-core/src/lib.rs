//! Core types, filtering, and aggregation for connstat
//!
//! This crate provides the record model, error handling, timezone
//! configuration, the inclusive date-range filter, and the temporal
//! aggregator that turns raw daily records into chart-ready series.
//! Nothing in here performs I/O.

pub mod aggregation;
pub mod aggregation_types;
pub mod error;
pub mod filters;
pub mod labels;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use aggregation::Aggregator;
pub use aggregation_types::{ChartSeries, Series, Totals};
pub use error::{ConnstatError, Result};
pub use filters::{RangeFilter, filter_by_range};
pub use timezone::TimezoneConfig;
pub use types::{DateRange, Granularity, RawRecord, WeekStart};
