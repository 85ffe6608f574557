//! Output formatting module for connstat
//!
//! This module provides formatters for displaying aggregated connection data:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//! - Bar chart format (see [`crate::chart`]) for a quick visual
//!
//! # Examples
//!
//! ```
//! use connstat_core::{ChartSeries, Granularity, Totals};
//! use connstat_terminal::output::{OutputFormat, get_formatter};
//!
//! let mut chart = ChartSeries::with_capacity(1);
//! chart.push("January".to_string(), 12.0, 3.0);
//! let totals = Totals::from_series(&chart);
//!
//! let formatter = get_formatter(OutputFormat::Table);
//! let rendered = formatter.format_series(&chart, &totals, Granularity::Monthly);
//! assert!(rendered.contains("January"));
//! ```

use connstat_core::{ChartSeries, ConnstatError, Granularity, Totals};
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::chart::BarChartFormatter;

/// Message shown instead of an empty table or chart
pub const EMPTY_MESSAGE: &str = "No connection data to display";

/// Trait for output formatters
///
/// # Example Implementation
///
/// ```
/// use connstat_core::{ChartSeries, Granularity, Totals};
/// use connstat_terminal::output::ChartFormatter;
///
/// struct CountFormatter;
///
/// impl ChartFormatter for CountFormatter {
///     fn format_series(&self, chart: &ChartSeries, _totals: &Totals, _g: Granularity) -> String {
///         format!("{} points", chart.len())
///     }
/// }
/// ```
pub trait ChartFormatter {
    /// Render a chart series and its totals
    fn format_series(&self, chart: &ChartSeries, totals: &Totals, granularity: Granularity)
    -> String;
}

/// Selects which formatter renders the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bar chart
    #[default]
    Chart,
    /// ASCII table with a totals row
    Table,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart => write!(f, "chart"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConnstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chart" => Ok(Self::Chart),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(ConnstatError::InvalidArgument(format!(
                "Invalid output format '{s}'. Expected chart, table, or json"
            ))),
        }
    }
}

/// Column heading for the label column
pub(crate) fn label_heading(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::All => "Day",
        Granularity::Daily => "Date",
        Granularity::Weekly => "Week",
        Granularity::Monthly => "Month",
    }
}

/// Format a value, using thousands separators for whole numbers
pub(crate) fn format_value(value: f64) -> String {
    if value.fract() != 0.0 || !value.is_finite() || value.abs() >= 1e15 {
        return format!("{value:.2}");
    }

    let whole = value.abs() as u64;
    let digits = whole.to_string();
    let mut result = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if value < 0.0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Format an hour measure the way the dashboard tooltip does (`H:00`)
pub(crate) fn format_hour(hour: f64) -> String {
    if hour.fract() == 0.0 {
        format!("{hour:.0}:00")
    } else {
        format!("{hour:.2}:00")
    }
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl ChartFormatter for TableFormatter {
    fn format_series(
        &self,
        chart: &ChartSeries,
        totals: &Totals,
        granularity: Granularity,
    ) -> String {
        if chart.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> label_heading(granularity),
            b -> "Connections",
            b -> "Hour"
        ]);

        for (label, connections, hour) in chart.points() {
            table.add_row(row![
                label,
                r -> format_value(connections),
                r -> format_hour(hour)
            ]);
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 3]));

        table.add_row(row![
            b -> "TOTAL",
            b -> format_value(totals.connections),
            b -> format_hour(totals.hour)
        ]);

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl ChartFormatter for JsonFormatter {
    fn format_series(
        &self,
        chart: &ChartSeries,
        totals: &Totals,
        granularity: Granularity,
    ) -> String {
        let output = json!({
            "granularity": granularity.as_str(),
            "labels": chart.labels,
            "series": chart.series,
            "totals": totals,
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Get a formatter for the requested output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn ChartFormatter> {
    match format {
        OutputFormat::Chart => Box::new(BarChartFormatter::new()),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
