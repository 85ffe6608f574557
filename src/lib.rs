//! connstat - Chart student connection activity from the terminal
//!
//! This library provides functionality to:
//! - Fetch the raw daily connection records from the HTTP endpoint or a file
//! - Filter them to an inclusive calendar-date range
//! - Bucket them by day, week-of-month, or month
//! - Render the result as a bar chart, a table, or JSON
//! - Remember the chosen granularity and range between runs
//!
//! # Examples
//!
//! ```no_run
//! use connstat::{
//!     aggregation::Aggregator,
//!     dashboard::Dashboard,
//!     preferences::Preferences,
//!     source::HttpRecordSource,
//!     timezone::TimezoneConfig,
//!     types::Granularity,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = HttpRecordSource::default();
//!     let aggregator = Aggregator::new(TimezoneConfig::default());
//!     let mut dashboard = Dashboard::load(&source, Preferences::default(), aggregator).await;
//!
//!     dashboard.set_granularity(Granularity::Monthly);
//!     let chart = dashboard.chart_series();
//!     println!("{} months", chart.len());
//! }
//! ```

// Re-export core modules
pub use connstat_core::{
    aggregation, aggregation_types, error, filters, labels, timezone, types,
};

/// Record sources
pub use connstat_source as source;

/// Output formatters
pub use connstat_terminal::output;

pub mod cli;
pub mod dashboard;
pub mod preferences;

// Re-export commonly used types
pub use error::{ConnstatError, Result};
pub use types::{DateRange, Granularity, RawRecord, WeekStart};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
