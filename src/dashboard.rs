//! Dashboard state
//!
//! Owns the fetched records and the current settings. Every read of the
//! chart re-runs filter and aggregation from the full record list, so
//! changing a setting never needs invalidation.

use connstat_core::{Aggregator, ChartSeries, DateRange, Granularity, RawRecord, Totals};
use connstat_source::{RecordSource, load_or_empty};
use tracing::{debug, info};

use crate::preferences::Preferences;

/// Records plus the settings applied to them
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<RawRecord>,
    preferences: Preferences,
    aggregator: Aggregator,
    loading: bool,
}

impl Dashboard {
    /// Create a dashboard that has not loaded anything yet
    pub fn new(preferences: Preferences, aggregator: Aggregator) -> Self {
        Self {
            records: Vec::new(),
            preferences,
            aggregator,
            loading: true,
        }
    }

    /// Create a dashboard over records that are already in memory
    pub fn with_records(
        records: Vec<RawRecord>,
        preferences: Preferences,
        aggregator: Aggregator,
    ) -> Self {
        Self {
            records,
            preferences,
            aggregator,
            loading: false,
        }
    }

    /// Fetch once from `source` and build the dashboard
    ///
    /// A failed fetch yields an empty dashboard. Either way the result is
    /// no longer loading.
    pub async fn load(
        source: &dyn RecordSource,
        preferences: Preferences,
        aggregator: Aggregator,
    ) -> Self {
        let mut dashboard = Self::new(preferences, aggregator);
        dashboard.refresh(source).await;
        dashboard
    }

    /// Replace the records with a fresh fetch from `source`
    pub async fn refresh(&mut self, source: &dyn RecordSource) {
        self.loading = true;
        info!("Fetching connection records from {}", source.describe());
        self.records = load_or_empty(source).await;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn granularity(&self) -> Granularity {
        self.preferences.granularity
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        debug!("Granularity set to {}", granularity);
        self.preferences.granularity = granularity;
    }

    /// Set both bounds; a half-open range shows every record
    pub fn set_date_range(&mut self, range: DateRange) {
        debug!("Date range set to {:?}..{:?}", range.start, range.end);
        self.preferences.set_date_range(range);
    }

    /// Reset granularity and date range
    pub fn clear_filters(&mut self) {
        debug!("Clearing dashboard filters");
        self.preferences.clear();
    }

    /// The series for the current settings
    pub fn chart_series(&self) -> ChartSeries {
        self.aggregator.aggregate_range(
            &self.records,
            self.preferences.granularity,
            &self.preferences.date_range(),
        )
    }

    /// Totals for the current settings
    ///
    /// Recomputes the series; callers already holding one should use
    /// [`Totals::from_series`] on it.
    pub fn totals(&self) -> Totals {
        Totals::from_series(&self.chart_series())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use connstat_core::{ConnstatError, TimezoneConfig};

    struct StaticSource(Vec<RawRecord>);

    #[async_trait]
    impl RecordSource for StaticSource {
        async fn fetch(&self) -> connstat_core::Result<Vec<RawRecord>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl RecordSource for BrokenSource {
        async fn fetch(&self) -> connstat_core::Result<Vec<RawRecord>> {
            Err(ConnstatError::UnexpectedStatus {
                url: "http://localhost/".to_string(),
                status: 500,
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january_source() -> StaticSource {
        StaticSource(vec![
            RawRecord::new("2024-01-05", 1.0, 5.0),
            RawRecord::new("2024-01-20", 2.0, 7.0),
            RawRecord::new("2024-02-03", 4.0, 11.0),
        ])
    }

    fn utc_aggregator() -> Aggregator {
        Aggregator::new(TimezoneConfig::utc())
    }

    #[tokio::test]
    async fn test_load_ends_loading() {
        let dashboard =
            Dashboard::load(&january_source(), Preferences::default(), utc_aggregator()).await;
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.records().len(), 3);
        assert_eq!(dashboard.chart_series().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_is_empty_and_not_loading() {
        let dashboard =
            Dashboard::load(&BrokenSource, Preferences::default(), utc_aggregator()).await;
        assert!(!dashboard.is_loading());
        assert!(dashboard.chart_series().is_empty());
        assert_eq!(dashboard.totals(), Totals::default());
    }

    #[test]
    fn test_in_memory_records_are_ready() {
        let prefs = Preferences {
            granularity: Granularity::Daily,
            ..Preferences::default()
        };
        let dashboard = Dashboard::with_records(january_source().0, prefs, utc_aggregator());
        assert!(!dashboard.is_loading());
        assert_eq!(
            dashboard.chart_series().labels,
            vec!["1/5/2024", "1/20/2024", "2/3/2024"]
        );
        assert_eq!(dashboard.totals().connections, 23.0);
    }

    #[test]
    fn test_new_dashboard_is_loading() {
        let dashboard = Dashboard::new(Preferences::default(), utc_aggregator());
        assert!(dashboard.is_loading());
    }

    #[tokio::test]
    async fn test_settings_recompute_series() {
        let mut dashboard =
            Dashboard::load(&january_source(), Preferences::default(), utc_aggregator()).await;

        dashboard.set_granularity(Granularity::Monthly);
        let chart = dashboard.chart_series();
        assert_eq!(chart.labels, vec!["January", "February"]);
        assert_eq!(chart.connections(), &[12.0, 11.0]);
        assert_eq!(chart.hour(), &[3.0, 4.0]);

        dashboard.set_date_range(DateRange::new(
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 31)),
        ));
        let chart = dashboard.chart_series();
        assert_eq!(chart.labels, vec!["January"]);
        assert_eq!(dashboard.totals().connections, 12.0);

        dashboard.clear_filters();
        assert_eq!(dashboard.granularity(), Granularity::All);
        assert_eq!(dashboard.chart_series().len(), 3);
    }

    #[tokio::test]
    async fn test_half_open_range_shows_everything() {
        let mut dashboard =
            Dashboard::load(&january_source(), Preferences::default(), utc_aggregator()).await;
        dashboard.set_date_range(DateRange::new(Some(date(2024, 1, 15)), None));
        assert_eq!(dashboard.chart_series().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_replaces_records() {
        let mut dashboard =
            Dashboard::load(&january_source(), Preferences::default(), utc_aggregator()).await;
        dashboard.refresh(&BrokenSource).await;
        assert!(dashboard.records().is_empty());
        assert!(!dashboard.is_loading());
    }
}
