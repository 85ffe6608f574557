//! Record source trait
//!
//! Every source yields the complete, already materialised record list in
//! one call. The dashboard fetches once at startup, with no pagination or
//! streaming.

use async_trait::async_trait;
use connstat_core::{RawRecord, Result};
use tracing::{debug, info, warn};

/// Trait for anything that can supply raw connection records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record, in the order the upstream provides them
    async fn fetch(&self) -> Result<Vec<RawRecord>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Decode a JSON array of records one element at a time
///
/// Elements that are not record-shaped (not an object, or without a string
/// `day`) are skipped with a warning so one bad row cannot blank the chart.
/// The payload itself must still be an array.
pub fn decode_records(payload: serde_json::Value) -> Result<Vec<RawRecord>> {
    let items: Vec<serde_json::Value> = serde_json::from_value(payload)?;
    let total = items.len();

    let records: Vec<RawRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!("Kept {} of {} records", records.len(), total);
    }
    Ok(records)
}

/// Fetch once from `source`, degrading to an empty list on failure
///
/// Nothing is retried. A failing source logs a warning and yields no
/// records, so the caller always leaves its loading state.
pub async fn load_or_empty(source: &dyn RecordSource) -> Vec<RawRecord> {
    match source.fetch().await {
        Ok(records) => {
            info!(
                "Loaded {} records from {}",
                records.len(),
                source.describe()
            );
            records
        }
        Err(e) => {
            warn!(
                "Failed to load records from {}: {}, showing no data",
                source.describe(),
                e
            );
            Vec::new()
        }
    }
}
