//! Timezone used to turn record days into calendar dates
//!
//! Most upstream records carry a bare `YYYY-MM-DD` day, which is already a
//! calendar date and never touched by the timezone. Some carry a full
//! RFC 3339 instant instead. Such an instant has no calendar day of its
//! own: `2024-02-03T09:30:00Z` is February 3rd in Paris but February 2nd in
//! Honolulu. [`TimezoneConfig`] is the one place that decides which zone
//! that conversion uses, and both the range filter and the aggregator read
//! it so a record always lands on the same day in both.
//!
//! Resolution order: `--utc`, then `--timezone <IANA name>`, then the
//! system zone (`TZ`, then the OS), and finally UTC.

use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ConnstatError, Result};

/// Zone in which timestamp-form days are read
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// Zone instants are converted into before their date is taken
    pub tz: Tz,
    /// Set when the effective zone is UTC, however it was chosen
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    /// The system zone
    fn default() -> Self {
        Self::from_tz(get_local_timezone())
    }
}

impl TimezoneConfig {
    /// Fixed UTC; calendar days then match the instant's own date
    pub fn utc() -> Self {
        Self::from_tz(Tz::UTC)
    }

    fn from_tz(tz: Tz) -> Self {
        Self {
            is_utc: tz == Tz::UTC,
            tz,
        }
    }

    /// Resolve the zone from `--timezone` and `--utc`
    ///
    /// `use_utc` wins over any name. Without either, the system zone is
    /// used. An unknown IANA name is an error rather than a silent UTC.
    pub fn from_cli(timezone_str: Option<&str>, use_utc: bool) -> Result<Self> {
        match (use_utc, timezone_str) {
            (true, _) => Ok(Self::utc()),
            (false, Some(name)) => Tz::from_str(name).map(Self::from_tz).map_err(|_| {
                ConnstatError::InvalidTimezone(format!(
                    "'{name}'. Use an IANA name like 'Europe/Paris', 'Pacific/Honolulu', or 'UTC'"
                ))
            }),
            (false, None) => Ok(Self::default()),
        }
    }

    /// Name for log lines
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }
}

/// The zone of the machine connstat runs on
///
/// A valid `TZ` variable takes precedence over what the OS reports through
/// `iana-time-zone`. Anything unrecognised degrades to UTC.
pub fn get_local_timezone() -> Tz {
    let from_env = std::env::var("TZ")
        .ok()
        .and_then(|name| Tz::from_str(&name).ok());
    if let Some(tz) = from_env {
        debug!("Calendar days resolved in {} (from TZ)", tz.name());
        return tz;
    }

    let detected = iana_time_zone::get_timezone()
        .map_err(|e| format!("{e:?}"))
        .and_then(|name| Tz::from_str(&name).map_err(|_| format!("unknown zone '{name}'")));
    match detected {
        Ok(tz) => {
            debug!("Calendar days resolved in {} (system zone)", tz.name());
            tz
        }
        Err(reason) => {
            debug!("System zone unavailable ({}), using UTC", reason);
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_calendar_date;
    use chrono::NaiveDate;

    #[test]
    fn test_utc_flag_wins_over_name() {
        let config = TimezoneConfig::from_cli(Some("Europe/Paris"), true).unwrap();
        assert!(config.is_utc);
        assert_eq!(config.tz, Tz::UTC);
        assert_eq!(config.display_name(), "UTC");
    }

    #[test]
    fn test_explicit_zone() {
        let config = TimezoneConfig::from_cli(Some("Africa/Casablanca"), false).unwrap();
        assert!(!config.is_utc);
        assert_eq!(config.display_name(), "Africa/Casablanca");
    }

    #[test]
    fn test_unknown_zone_is_error() {
        let result = TimezoneConfig::from_cli(Some("Mars/Olympus"), false);
        assert!(matches!(result, Err(ConnstatError::InvalidTimezone(_))));
    }

    #[test]
    fn test_utc_by_name_sets_flag() {
        let config = TimezoneConfig::from_cli(Some("UTC"), false).unwrap();
        assert!(config.is_utc);
    }

    #[test]
    fn test_zone_decides_calendar_day_of_instant() {
        let instant = "2024-02-03T09:30:00Z";
        let paris = TimezoneConfig::from_cli(Some("Europe/Paris"), false).unwrap();
        let honolulu = TimezoneConfig::from_cli(Some("Pacific/Honolulu"), false).unwrap();

        assert_eq!(
            parse_calendar_date(instant, &paris.tz),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
        assert_eq!(
            parse_calendar_date(instant, &honolulu.tz),
            NaiveDate::from_ymd_opt(2024, 2, 2)
        );
        // Bare days ignore the zone
        assert_eq!(
            parse_calendar_date("2024-02-03", &honolulu.tz),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
    }
}
