//! Common test utilities and helpers for connstat tests
//!
//! Record builders and fixture files shared by the integration tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use connstat::RawRecord;
use std::path::PathBuf;
use tempfile::TempDir;

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
    pub fn on(day: &str) -> Self {
        Self {
            day: day.to_string(),
            hour: 0.0,
            connections: 1.0,
        }
    }

    pub fn on_date(date: NaiveDate) -> Self {
        Self::on(&date.format("%Y-%m-%d").to_string())
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

/// One record per day from `start`, `days` days long
///
/// Connections count up from 1 and the hour cycles through 0..24.
pub fn daily_series(start: NaiveDate, days: i64) -> Vec<RawRecord> {
    (0..days)
        .map(|offset| {
            RecordBuilder::on_date(start + Duration::days(offset))
                .hour((offset % 24) as f64)
                .connections((offset + 1) as f64)
                .build()
        })
        .collect()
}

/// Fixture mirroring what the endpoint returns, including an unparseable day
pub const SAMPLE_RESPONSE: &str = r#"[
  {"day": "2024-01-05", "hour": 1, "connections": 5},
  {"day": "2024-01-20", "hour": 2, "connections": 7},
  {"day": "2024-02-03T09:30:00Z", "hour": 4, "connections": 11},
  {"day": "not a date", "hour": 3, "connections": 2},
  {"day": "2025-01-10", "hour": 6, "connections": 9, "campus": "north"}
]"#;

/// Write `contents` to a fresh temp directory and return both
pub fn write_fixture(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connections.json");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
