//! Persisted dashboard preferences
//!
//! The granularity and date range survive between runs in a small JSON file
//! under the user's config directory. A missing or unreadable file is never
//! fatal: the dashboard falls back to showing every record.

use chrono::NaiveDate;
use connstat_core::error::{ConnstatError, Result};
use connstat_core::{DateRange, Granularity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "connstat";
const FILE_NAME: &str = "preferences.json";

/// User-selected dashboard settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub granularity: Granularity,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Preferences {
    /// The saved bounds as a filter window
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Replace both bounds, keeping the granularity
    pub fn set_date_range(&mut self, range: DateRange) {
        self.start_date = range.start;
        self.end_date = range.end;
    }

    /// Overlay the bounds that are present in `range`
    pub fn merge_date_range(&mut self, range: DateRange) {
        if range.start.is_some() {
            self.start_date = range.start;
        }
        if range.end.is_some() {
            self.end_date = range.end;
        }
    }

    /// Back to granularity `all` with no date bounds
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Reads and writes [`Preferences`] as JSON at a fixed path
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/connstat/preferences.json`
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConnstatError::Config("Could not determine the user config directory".to_string())
        })?;
        Ok(Self::new(config_dir.join(APP_DIR).join(FILE_NAME)))
    }

    /// Use `explicit` when given, otherwise the default location
    ///
    /// Returns `None` when no location can be determined, in which case
    /// preferences are neither loaded nor saved.
    pub fn locate(explicit: Option<&Path>) -> Option<Self> {
        if let Some(path) = explicit {
            return Some(Self::new(path));
        }
        match Self::default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("{}, preferences will not be saved", e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved preferences, or the defaults if there are none
    ///
    /// A corrupt file is logged and ignored; it will be overwritten on the
    /// next save.
    pub async fn load(&self) -> Preferences {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", self.path.display());
                return Preferences::default();
            }
            Err(e) => {
                warn!(
                    "Failed to read preferences from {}: {}",
                    self.path.display(),
                    e
                );
                return Preferences::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(prefs) => {
                debug!("Loaded preferences from {}", self.path.display());
                prefs
            }
            Err(e) => {
                warn!(
                    "Ignoring corrupt preferences at {}: {}",
                    self.path.display(),
                    e
                );
                Preferences::default()
            }
        }
    }

    /// Write preferences, creating the parent directory if needed
    pub async fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

/// Save `prefs`, logging instead of failing
///
/// Returns whether the file was written. A read-only or missing config
/// directory must not keep the chart from rendering.
pub async fn save_or_warn(store: Option<&PreferenceStore>, prefs: &Preferences) -> bool {
    let Some(store) = store else {
        return false;
    };
    match store.save(prefs).await {
        Ok(()) => true,
        Err(e) => {
            warn!(
                "Failed to save preferences to {}: {}",
                store.path().display(),
                e
            );
            false
        }
    }
}
