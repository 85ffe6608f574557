//! Horizontal bar chart rendering
//!
//! One bar per label, scaled so that the axis starts at zero and the longest
//! bar reaches `max(SUGGESTED_MAX, largest connections value)`. Colors are
//! disabled when `NO_COLOR` is set.

use colored::*;
use connstat_core::{ChartSeries, Granularity, Totals};
use tracing::debug;

use crate::output::{ChartFormatter, EMPTY_MESSAGE, format_hour, format_value, label_heading};

/// Axis maximum used until the data exceeds it
pub const SUGGESTED_MAX: f64 = 400.0;

const BAR_FULL: &str = "#";
const BAR_EMPTY: &str = ".";
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 80;

/// Bar chart formatter for connection series
pub struct BarChartFormatter {
    width: usize,
    colored_output: bool,
}

impl Default for BarChartFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BarChartFormatter {
    /// Create a formatter sized to the current terminal
    pub fn new() -> Self {
        let width = terminal_width().unwrap_or_else(|| {
            debug!("Terminal width unavailable, using 100 columns");
            100
        });
        Self {
            width: width.clamp(40, 160),
            colored_output: std::env::var("NO_COLOR").is_err(),
        }
    }

    /// Create a formatter with a fixed width and no colors
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            colored_output: false,
        }
    }

    fn bar(&self, value: f64, ceiling: f64, width: usize) -> String {
        let ratio = if ceiling > 0.0 {
            (value / ceiling).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = ((ratio * width as f64).round() as usize).min(width);
        let empty = width - filled;

        let full = BAR_FULL.repeat(filled);
        let full = if self.colored_output {
            full.blue().to_string()
        } else {
            full
        };
        format!("|{}{}|", full, BAR_EMPTY.repeat(empty))
    }
}

impl ChartFormatter for BarChartFormatter {
    fn format_series(
        &self,
        chart: &ChartSeries,
        totals: &Totals,
        granularity: Granularity,
    ) -> String {
        if chart.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let ceiling = chart
            .connections()
            .iter()
            .copied()
            .fold(SUGGESTED_MAX, f64::max);

        let rows: Vec<(&str, f64, String, String)> = chart
            .points()
            .map(|(label, connections, hour)| {
                (
                    label,
                    connections,
                    format_value(connections),
                    format_hour(hour),
                )
            })
            .collect();

        let label_width = rows
            .iter()
            .map(|(label, ..)| label.chars().count())
            .chain(std::iter::once(label_heading(granularity).len()))
            .max()
            .unwrap_or(0);
        let value_width = rows.iter().map(|(_, _, v, _)| v.len()).max().unwrap_or(0);
        let hour_width = rows.iter().map(|(_, _, _, h)| h.len()).max().unwrap_or(0);

        // label, space, |bar|, two spaces, value, two spaces, (hour)
        let fixed = label_width + 1 + 2 + 2 + value_width + 2 + hour_width + 2;
        let bar_width = self
            .width
            .saturating_sub(fixed)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

        let title = format!("Student Connections ({granularity})");
        let mut output = String::new();
        if self.colored_output {
            output.push_str(&title.bold().to_string());
        } else {
            output.push_str(&title);
        }
        output.push_str("\n\n");

        for (label, connections, value, hour) in &rows {
            output.push_str(&format!(
                "{label:<label_width$} {}  {value:>value_width$}  ({hour:>hour_width$})\n",
                self.bar(*connections, ceiling, bar_width),
            ));
        }

        output.push_str(&format!(
            "\nTotal: {} connections over {} {}, axis max {}\n",
            format_value(totals.connections),
            totals.points,
            if totals.points == 1 { "point" } else { "points" },
            format_value(ceiling)
        ));

        output
    }
}

/// Get terminal width using the cross-platform terminal_size crate
fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(width, _)| width.0 as usize)
}
