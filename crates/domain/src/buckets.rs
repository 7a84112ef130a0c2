// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time bucket generation.
//!
//! Buckets tile a resolved range without gaps or overlaps. Bounds are
//! inclusive at millisecond resolution, so each bucket starts one
//! millisecond after the previous one ends. Interior boundaries fall on the
//! start of a day, week or month; the first bucket starts at the range start
//! and the last one is clipped to the range end.

use crate::calendar_grid::{first_of_month, start_of_week};
use crate::date_range::{DateRange, start_of_day};
use crate::granularity::Granularity;
use crate::types::WeekStart;
use chrono::{Days, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Metrics accumulated into a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BucketMetrics {
    /// Scheduled classes starting in the bucket.
    pub occurrence_count: u32,
    /// Packages sold in the bucket.
    pub package_sale_count: u32,
    /// Cancelled bookings created in the bucket.
    pub cancellation_count: u32,
    /// Seats booked on classes starting in the bucket.
    pub booked_seats: u32,
    /// Seats offered on classes starting in the bucket.
    pub capacity: u32,
    /// Sum of payments made in the bucket.
    pub revenue: f64,
    /// Booked seats as a share of capacity, 0-100.
    pub occupancy_percent: f64,
}

/// One reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// The aligned period start date (`YYYY-MM-DD`).
    pub key: String,
    /// Chart label.
    pub label: String,
    /// First instant in the bucket.
    pub start: NaiveDateTime,
    /// Last instant in the bucket.
    pub end: NaiveDateTime,
    /// Accumulated metrics.
    pub metrics: BucketMetrics,
}

impl TimeBucket {
    /// Whether `instant` falls within the bucket, bounds included.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Returns the date that opens the period containing `date`.
#[must_use]
pub fn align_to_period(date: NaiveDate, granularity: Granularity, week_start: WeekStart) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => start_of_week(date, week_start),
        Granularity::Month => first_of_month(date),
    }
}

fn next_period(aligned: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day => aligned.checked_add_days(Days::new(1)),
        Granularity::Week => aligned.checked_add_days(Days::new(7)),
        Granularity::Month => aligned.checked_add_months(Months::new(1)),
    }
}

fn bucket_label(aligned: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => aligned.format("%b %-d").to_string(),
        Granularity::Week => format!("Week of {}", aligned.format("%b %-d")),
        Granularity::Month => aligned.format("%b %Y").to_string(),
    }
}

/// Enumerates the buckets covering `range` at `granularity`.
///
/// # Example
///
/// ```text
/// range = [2025-03-12 00:00, 2025-03-18 23:59:59.999], granularity = week
/// buckets:
///   2025-03-10  Week of Mar 10  [2025-03-12 00:00, 2025-03-16 23:59:59.999]
///   2025-03-17  Week of Mar 17  [2025-03-17 00:00, 2025-03-18 23:59:59.999]
/// ```
#[must_use]
pub fn generate_buckets(
    range: &DateRange,
    granularity: Granularity,
    week_start: WeekStart,
) -> Vec<TimeBucket> {
    let mut buckets: Vec<TimeBucket> = Vec::new();
    if range.end < range.start {
        return buckets;
    }

    let one_ms: Duration = Duration::milliseconds(1);
    let mut cursor: NaiveDateTime = range.start;

    loop {
        let aligned: NaiveDate = align_to_period(cursor.date(), granularity, week_start);
        let end: NaiveDateTime = next_period(aligned, granularity)
            .map(start_of_day)
            .and_then(|boundary| boundary.checked_sub_signed(one_ms))
            .map_or(range.end, |period_end| period_end.min(range.end));

        buckets.push(TimeBucket {
            key: aligned.format("%Y-%m-%d").to_string(),
            label: bucket_label(aligned, granularity),
            start: cursor,
            end,
            metrics: BucketMetrics::default(),
        });

        if end >= range.end {
            break;
        }
        match end.checked_add_signed(one_ms) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    buckets
}
