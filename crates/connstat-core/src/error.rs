//! Error types for connstat
//!
//! This module defines the error types used throughout the connstat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! The filter and aggregator never return these: malformed records degrade
//! into best-effort output instead. Errors only come from the edges, such as
//! argument parsing, fetching records, and reading preferences.
//!
//! # Example
//!
//! ```
//! use connstat_core::error::{ConnstatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to ConnstatError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for connstat operations
#[derive(Error, Debug)]
pub enum ConnstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The record endpoint answered with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// The endpoint that was queried
        url: String,
        /// The HTTP status code received
        status: u16,
    },

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Unknown granularity name
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in connstat
///
/// # Example
///
/// ```
/// use connstat_core::Result;
///
/// fn process_data() -> Result<usize> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConnstatError>;
