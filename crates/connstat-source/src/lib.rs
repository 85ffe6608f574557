//! Record sources for connstat
//!
//! This crate fetches the raw connection records the dashboard charts,
//! either from the remote HTTP endpoint or from a local JSON export.

pub mod file;
pub mod http;
pub mod record_source;

pub use file::FileRecordSource;
pub use http::{DEFAULT_ENDPOINT, HttpRecordSource};
pub use record_source::{RecordSource, decode_records, load_or_empty};
