// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The analytics pipeline.
//!
//! Filters resolve to a date range, the range to a granularity, the pair to
//! buckets; the aggregator fills the buckets and the axis calculator
//! derives chart scales from the filled buckets.

use crate::config::EngineConfig;
use crate::error::CoreError;
use chrono::NaiveDateTime;
use classbook_domain::{
    AggregationInput, AggregationSummary, DateRange, Granularity, IntervalOverride, RangeWindow,
    TimeBucket, aggregate, axis_ticks, generate_buckets, resolve_date_range, select_granularity,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The operator's analytics filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticsFilters {
    /// The reporting window.
    pub window: RangeWindow,
    /// The interval choice.
    pub interval: IntervalOverride,
    /// Custom start date (`YYYY-MM-DD`), used by the custom window.
    pub custom_start: Option<String>,
    /// Custom end date (`YYYY-MM-DD`), used by the custom window.
    pub custom_end: Option<String>,
}

impl AnalyticsFilters {
    /// Resolves the filters to a concrete range.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom bound cannot be parsed.
    pub fn resolve(&self, now: NaiveDateTime) -> Result<DateRange, CoreError> {
        Ok(resolve_date_range(
            self.window,
            self.custom_start.as_deref(),
            self.custom_end.as_deref(),
            now,
        )?)
    }
}

/// Chart-ready analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// The window the report covers.
    pub window: RangeWindow,
    /// The resolved range.
    pub range: DateRange,
    /// The bucket size.
    pub granularity: Granularity,
    /// Filled buckets in chronological order.
    pub buckets: Vec<TimeBucket>,
    /// How many events were placed or skipped.
    pub summary: AggregationSummary,
    /// Ticks for counts and booked seats.
    pub activity_ticks: Vec<f64>,
    /// Ticks for revenue.
    pub revenue_ticks: Vec<f64>,
}

/// Runs the full analytics pipeline.
///
/// # Arguments
///
/// * `filters` - The filter panel state
/// * `input` - Raw event collections for the venue
/// * `now` - The current venue-local time
/// * `config` - Venue settings
///
/// # Errors
///
/// Returns an error if the filters cannot be resolved.
pub fn build_analytics(
    filters: &AnalyticsFilters,
    input: &AggregationInput<'_>,
    now: NaiveDateTime,
    config: &EngineConfig,
) -> Result<AnalyticsReport, CoreError> {
    let range: DateRange = filters.resolve(now)?;
    let granularity: Granularity = select_granularity(filters.window, filters.interval, &range);
    let mut buckets: Vec<TimeBucket> = generate_buckets(&range, granularity, config.week_start);

    let summary: AggregationSummary =
        aggregate(&mut buckets, input, &config.aggregation_settings());
    if summary.unparseable > 0 {
        warn!(
            skipped = summary.unparseable,
            "Skipped analytics events with unreadable timestamps"
        );
    }

    let activity_max: u32 = buckets
        .iter()
        .map(|b| {
            b.metrics
                .occurrence_count
                .max(b.metrics.package_sale_count)
                .max(b.metrics.cancellation_count)
                .max(b.metrics.booked_seats)
        })
        .max()
        .unwrap_or(0);
    let revenue_max: f64 = buckets
        .iter()
        .map(|b| b.metrics.revenue)
        .fold(0.0, f64::max);

    debug!(
        window = %filters.window,
        granularity = %granularity,
        buckets = buckets.len(),
        assigned = summary.assigned,
        "Built analytics report"
    );

    Ok(AnalyticsReport {
        window: filters.window,
        range,
        granularity,
        activity_ticks: axis_ticks(f64::from(activity_max), config.axis_tick_count),
        revenue_ticks: axis_ticks(revenue_max, config.axis_tick_count),
        buckets,
        summary,
    })
}
