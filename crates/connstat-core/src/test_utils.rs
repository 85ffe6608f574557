//! Shared test utilities for unit tests
//!
//! Integration tests cannot see this module because it is `#[cfg(test)]`.
//! They keep their own builder in `tests/common/mod.rs`.

use chrono::NaiveDate;

use crate::types::RawRecord;

/// Shorthand for a known-valid calendar date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builder for creating test RawRecord instances
pub struct RecordBuilder {
    day: String,
    hour: f64,
    connections: f64,
}

impl RecordBuilder {
    /// Start a record on the given serialized day
    pub fn on(day: &str) -> Self {
        Self {
            day: day.to_string(),
            hour: 0.0,
            connections: 1.0,
        }
    }

    pub fn hour(mut self, hour: f64) -> Self {
        self.hour = hour;
        self
    }

    pub fn connections(mut self, connections: f64) -> Self {
        self.connections = connections;
        self
    }

    pub fn build(self) -> RawRecord {
        RawRecord::new(self.day, self.hour, self.connections)
    }
}

/// Build records from `(day, hour, connections)` tuples
pub fn records(rows: &[(&str, f64, f64)]) -> Vec<RawRecord> {
    rows.iter()
        .map(|(day, hour, connections)| RawRecord::new(*day, *hour, *connections))
        .collect()
}
