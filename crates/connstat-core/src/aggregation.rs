//! Aggregation module for turning raw records into chart series
//!
//! The aggregator groups records into day, week, or month buckets and sums
//! `hour` and `connections` per bucket. With [`Granularity::All`] it skips
//! bucketing and emits one point per record, labelled by the raw `day`.
//!
//! Bucket order is the order in which each label is first seen while
//! scanning the input front to back. It is neither alphabetical nor
//! chronological unless the input already is. Buckets live in an
//! [`IndexMap`], so that ordering falls out of the map's iteration order.
//!
//! Every call is independent. The aggregator keeps no state between calls,
//! so identical inputs always give identical output.
//!
//! # Examples
//!
//! ```
//! use connstat_core::{Aggregator, Granularity, RawRecord, TimezoneConfig};
//!
//! let aggregator = Aggregator::new(TimezoneConfig::utc());
//! let records = vec![
//!     RawRecord::new("2024-01-05", 1.0, 5.0),
//!     RawRecord::new("2024-01-20", 2.0, 7.0),
//! ];
//!
//! let chart = aggregator.aggregate(&records, Granularity::Monthly);
//! assert_eq!(chart.labels, vec!["January"]);
//! assert_eq!(chart.connections(), &[12.0]);
//! assert_eq!(chart.hour(), &[3.0]);
//! ```

use indexmap::IndexMap;
use tracing::debug;

use crate::aggregation_types::{Bucket, ChartSeries};
use crate::filters::RangeFilter;
use crate::labels::bucket_label;
use crate::timezone::TimezoneConfig;
use crate::types::{DateRange, Granularity, RawRecord, WeekStart};

/// Main aggregation engine
#[derive(Debug, Clone)]
pub struct Aggregator {
    timezone_config: TimezoneConfig,
    week_start: WeekStart,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(TimezoneConfig::default())
    }
}

impl Aggregator {
    /// Create a new Aggregator
    pub fn new(timezone_config: TimezoneConfig) -> Self {
        Self {
            timezone_config,
            week_start: WeekStart::default(),
        }
    }

    /// Choose which weekday counts as day 0 for weekly labels
    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Get the timezone configuration
    pub fn timezone_config(&self) -> &TimezoneConfig {
        &self.timezone_config
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Build a range filter that resolves dates the same way this aggregator does
    pub fn range_filter(&self, range: &DateRange) -> RangeFilter {
        RangeFilter::from_range(*range).with_timezone(self.timezone_config.tz)
    }

    /// Filter records to `range`, then aggregate them
    ///
    /// This is the whole pipeline the dashboard runs on every interaction.
    pub fn aggregate_range(
        &self,
        records: &[RawRecord],
        granularity: Granularity,
        range: &DateRange,
    ) -> ChartSeries {
        if !range.is_active() {
            return self.aggregate(records, granularity);
        }

        let filtered = self.range_filter(range).apply(records);
        debug!(
            "Range filter kept {} of {} records",
            filtered.len(),
            records.len()
        );
        self.aggregate(&filtered, granularity)
    }

    /// Aggregate records by granularity
    pub fn aggregate(&self, records: &[RawRecord], granularity: Granularity) -> ChartSeries {
        if granularity.is_bucketed() {
            self.aggregate_buckets(records, granularity)
        } else {
            Self::aggregate_all(records)
        }
    }

    /// One point per record, values verbatim, labels as received
    fn aggregate_all(records: &[RawRecord]) -> ChartSeries {
        let mut chart = ChartSeries::with_capacity(records.len());
        for record in records {
            chart.push(record.day.clone(), record.connections, record.hour);
        }
        chart
    }

    fn aggregate_buckets(&self, records: &[RawRecord], granularity: Granularity) -> ChartSeries {
        let mut buckets: IndexMap<String, Bucket> = IndexMap::new();
        let tz = &self.timezone_config.tz;

        for record in records {
            let Some(label) = bucket_label(record.calendar_date(tz), granularity, self.week_start)
            else {
                continue;
            };

            buckets.entry(label).or_default().add(record);
        }

        debug!(
            "Aggregated {} records into {} {} buckets",
            records.len(),
            buckets.len(),
            granularity
        );

        let mut chart = ChartSeries::with_capacity(buckets.len());
        for (label, bucket) in buckets {
            chart.push(label, bucket.connections, bucket.hour);
        }
        chart
    }
}
