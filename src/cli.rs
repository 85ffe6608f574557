//! CLI interface for connstat
//!
//! A single flat command: every flag adjusts one dashboard setting. Values
//! given here override the saved preferences, and the merged settings are
//! written back unless `--no-save` is passed.
//!
//! # Example
//!
//! ```bash
//! # Weekly view of January 2024
//! connstat -g weekly --since 2024-01-01 --until 2024-01-31
//!
//! # Replay a saved export as JSON without touching preferences
//! connstat --file export.json --json --no-save
//!
//! # Forget saved filters and show every record
//! connstat --clear
//! ```

use clap::Parser;
use connstat_core::error::{ConnstatError, Result};
use connstat_core::{DateRange, Granularity, WeekStart};
use connstat_source::DEFAULT_ENDPOINT;
use connstat_terminal::OutputFormat;
use std::path::PathBuf;

/// Chart student connection activity from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "connstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Bucket width: all, daily, weekly, or monthly
    #[arg(long, short = 'g')]
    pub granularity: Option<Granularity>,

    /// Filter by start date (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub since: Option<String>,

    /// Filter by end date (YYYY-MM-DD or YYYY-MM, a month means its last day)
    #[arg(long)]
    pub until: Option<String>,

    /// Reset saved granularity and date range before applying other flags
    #[arg(long)]
    pub clear: bool,

    /// Do not write the resulting settings back to the preference file
    #[arg(long)]
    pub no_save: bool,

    /// Endpoint returning the JSON array of connection records
    #[arg(long, env = "CONNSTAT_URL", default_value = DEFAULT_ENDPOINT)]
    pub url: String,

    /// Read records from a local JSON file instead of the endpoint (wins over --url)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// First day of the week for weekly labels (sunday or monday)
    #[arg(long, default_value = "sunday")]
    pub week_start: WeekStart,

    /// Output format: chart, table, or json
    #[arg(long, default_value = "chart")]
    pub format: OutputFormat,

    /// Output as JSON (shorthand for --format json)
    #[arg(long)]
    pub json: bool,

    /// Timezone for resolving timestamps to calendar days (e.g. "Europe/Paris")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z')]
    pub timezone: Option<String>,

    /// Use UTC for calendar days (overrides --timezone)
    #[arg(long)]
    pub utc: bool,

    /// Preference file location
    #[arg(long, env = "CONNSTAT_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Show debug output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors, ignoring RUST_LOG
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// The output format after applying `--json`
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// Date bounds given on the command line, each still optional
    pub fn date_overrides(&self) -> Result<DateRange> {
        let start = self.since.as_deref().map(parse_date_filter).transpose()?;
        let end = self.until.as_deref().map(parse_end_date).transpose()?;
        Ok(DateRange::new(start, end))
    }
}

/// Parse a date filter argument
///
/// Supports both YYYY-MM-DD and YYYY-MM formats. A bare month resolves to
/// its first day.
///
/// # Examples
///
/// ```
/// use connstat::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-01-15").unwrap();
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-02").unwrap();
/// assert_eq!(date.month(), 2);
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let (year, month) = parse_year_month(date_str)?;
    chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ConnstatError::InvalidDate(format!("Invalid date: {date_str}")))
}

/// Parse an end-of-range argument
///
/// Same formats as [`parse_date_filter`], except that a bare month resolves
/// to its last day so `--until 2024-02` covers all of February.
pub fn parse_end_date(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let (year, month) = parse_year_month(date_str)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    chrono::NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .ok_or_else(|| ConnstatError::InvalidDate(format!("Invalid date: {date_str}")))
}

fn parse_year_month(date_str: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 2 {
        return Err(ConnstatError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )));
    }

    let year = parts[0]
        .parse::<i32>()
        .map_err(|_| ConnstatError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
    let month = parts[1]
        .parse::<u32>()
        .map_err(|_| ConnstatError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

    if !(1..=12).contains(&month) {
        return Err(ConnstatError::InvalidDate(format!(
            "Month must be between 1-12, got {month}"
        )));
    }

    Ok((year, month))
}
