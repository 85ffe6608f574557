//! Terminal output formatting for connstat
//!
//! This crate renders aggregated chart series as tables, JSON, or a
//! horizontal bar chart.

pub mod chart;
pub mod output;

pub use chart::BarChartFormatter;
pub use output::{ChartFormatter, JsonFormatter, OutputFormat, TableFormatter, get_formatter};
