//! Aggregation data types for connstat
//!
//! Pure data structures produced by the aggregator and consumed by the
//! presentation layer. These types perform no I/O.

use serde::{Deserialize, Serialize};

use crate::types::RawRecord;

/// Name of the connections series in a [`ChartSeries`]
pub const CONNECTIONS_SERIES: &str = "Connections";
/// Name of the hour series in a [`ChartSeries`]
pub const HOUR_SERIES: &str = "Hour";

/// Running sums for every record that maps to one label
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Sum of `hour` over the bucket's records
    pub hour: f64,
    /// Sum of `connections` over the bucket's records
    pub connections: f64,
}

impl Bucket {
    /// Accumulate one record into the bucket
    pub fn add(&mut self, record: &RawRecord) {
        self.hour += record.hour;
        self.connections += record.connections;
    }
}

/// One named numeric series, index-aligned with [`ChartSeries::labels`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    fn with_capacity(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            values: Vec::with_capacity(capacity),
        }
    }
}

/// Chart-ready output of one aggregation call
///
/// Always carries a `Connections` and an `Hour` series, both the same length
/// as `labels`.
///
/// # Examples
/// ```
/// use connstat_core::aggregation_types::ChartSeries;
///
/// let mut chart = ChartSeries::with_capacity(1);
/// chart.push("January".to_string(), 12.0, 3.0);
///
/// assert_eq!(chart.labels, vec!["January"]);
/// assert_eq!(chart.connections(), &[12.0]);
/// assert_eq!(chart.hour(), &[3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Bucket labels in first-seen order
    pub labels: Vec<String>,
    /// Numeric series aligned by index to `labels`
    pub series: Vec<Series>,
}

impl Default for ChartSeries {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl ChartSeries {
    /// Create an empty chart with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            series: vec![
                Series::with_capacity(CONNECTIONS_SERIES, capacity),
                Series::with_capacity(HOUR_SERIES, capacity),
            ],
        }
    }

    /// Append one point to every series
    pub fn push(&mut self, label: String, connections: f64, hour: f64) {
        self.labels.push(label);
        for series in &mut self.series {
            match series.name.as_str() {
                CONNECTIONS_SERIES => series.values.push(connections),
                HOUR_SERIES => series.values.push(hour),
                _ => {}
            }
        }
    }

    /// Values of a series by name, empty if absent
    pub fn series_named(&self, name: &str) -> &[f64] {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn connections(&self) -> &[f64] {
        self.series_named(CONNECTIONS_SERIES)
    }

    pub fn hour(&self) -> &[f64] {
        self.series_named(HOUR_SERIES)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, connections, hour)` triples
    pub fn points(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.labels
            .iter()
            .zip(self.connections().iter().zip(self.hour()))
            .map(|(label, (connections, hour))| (label.as_str(), *connections, *hour))
    }
}

/// Totals over a chart's points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub connections: f64,
    pub hour: f64,
    /// Number of points summed
    pub points: usize,
}

impl Totals {
    pub fn from_series(chart: &ChartSeries) -> Self {
        let mut totals = Self::default();
        for (_, connections, hour) in chart.points() {
            totals.connections += connections;
            totals.hour += hour;
            totals.points += 1;
        }
        totals
    }
}
