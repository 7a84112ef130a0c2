// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-series aggregation of raw venue events into buckets.
//!
//! Raw records arrive from the store with textual timestamps and amounts.
//! Each event is assigned to the first bucket that contains its timestamp,
//! read at millisecond resolution to match the bucket bounds.
//! Events whose timestamp cannot be read are skipped and counted, never
//! fatal. Unreadable amounts count as zero.

use crate::buckets::{BucketMetrics, TimeBucket};
use crate::types::Occurrence;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Per-class capacity assumed when sessions carry no capacity data.
pub const DEFAULT_ASSUMED_CLASS_CAPACITY: u32 = 20;

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// The lifecycle state of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Seat held.
    Confirmed,
    /// Waiting for a seat.
    Waitlisted,
    /// Consumer attended.
    Attended,
    /// Consumer did not show up.
    NoShow,
    /// Cancelled by the consumer in time.
    Cancelled,
    /// Cancelled by the consumer after the cutoff.
    LateCancelled,
    /// Cancelled by the venue.
    VenueCancelled,
    /// Any status this engine does not interpret.
    Other(String),
}

impl BookingStatus {
    /// Whether this status is one of the cancellation variants.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::LateCancelled | Self::VenueCancelled
        )
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Waitlisted => "waitlisted",
            Self::Attended => "attended",
            Self::NoShow => "no_show",
            Self::Cancelled => "cancelled",
            Self::LateCancelled => "late_cancelled",
            Self::VenueCancelled => "venue_cancelled",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Ok(match normalized.as_str() {
            "confirmed" | "booked" => Self::Confirmed,
            "waitlisted" | "waitlist" => Self::Waitlisted,
            "attended" | "checked_in" => Self::Attended,
            "no_show" | "noshow" => Self::NoShow,
            "cancelled" | "canceled" => Self::Cancelled,
            "late_cancelled" | "late_canceled" | "late_cancel" => Self::LateCancelled,
            "venue_cancelled" | "venue_canceled" | "cancelled_by_venue" => Self::VenueCancelled,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booking as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Raw status text.
    pub status: String,
    /// Raw creation timestamp.
    pub created_at: String,
}

impl BookingRecord {
    /// The interpreted status.
    #[must_use]
    pub fn status(&self) -> BookingStatus {
        match self.status.parse::<BookingStatus>() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

/// A payment as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Raw amount text.
    pub amount: String,
    /// Raw payment timestamp.
    pub paid_at: String,
}

/// A package ownership as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSaleRecord {
    /// Raw purchase timestamp.
    pub purchased_at: String,
}

/// Borrowed event collections for one aggregation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationInput<'a> {
    /// Scheduled class sessions.
    pub occurrences: &'a [Occurrence],
    /// Package ownerships.
    pub package_sales: &'a [PackageSaleRecord],
    /// Bookings.
    pub bookings: &'a [BookingRecord],
    /// Payments.
    pub payments: &'a [PaymentRecord],
}

/// Venue settings the aggregator depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    /// Timezone offset-bearing timestamps are converted into.
    pub timezone: Tz,
    /// Capacity assumed per class when no capacity is known.
    pub assumed_class_capacity: u32,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            assumed_class_capacity: DEFAULT_ASSUMED_CLASS_CAPACITY,
        }
    }
}

/// Counts of events that did not land in any bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationSummary {
    /// Events placed into a bucket.
    pub assigned: usize,
    /// Events skipped for an unusable timestamp.
    pub unparseable: usize,
    /// Events whose timestamp is outside every bucket.
    pub out_of_range: usize,
}

/// Reads a store timestamp as venue-local time.
///
/// Offset-bearing RFC 3339 values are converted into `timezone`; naive
/// values are taken as already venue-local; bare dates mean midnight.
#[must_use]
pub fn parse_event_timestamp(raw: &str, timezone: Tz) -> Option<NaiveDateTime> {
    let raw: &str = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&timezone).naive_local());
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Reads a store amount, treating anything unusable as zero.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

/// Occupancy for a bucket's metrics, 0-100.
///
/// Falls back to `occurrence_count * assumed_class_capacity` when the
/// bucket has no capacity, and to zero when that is also zero.
#[must_use]
pub fn occupancy_percent(metrics: &BucketMetrics, assumed_class_capacity: u32) -> f64 {
    let denominator: u32 = if metrics.capacity > 0 {
        metrics.capacity
    } else {
        metrics
            .occurrence_count
            .saturating_mul(assumed_class_capacity)
    };
    if denominator == 0 {
        return 0.0;
    }
    (f64::from(metrics.booked_seats) / f64::from(denominator) * 100.0).min(100.0)
}

/// Folds the event collections into `buckets`.
///
/// Each event lands in the first bucket whose inclusive bounds contain its
/// timestamp truncated to whole milliseconds: the session start, the purchase time, the booking creation
/// time (cancellations only), or the payment time. Occupancy is derived
/// once all events are placed.
pub fn aggregate(
    buckets: &mut [TimeBucket],
    input: &AggregationInput<'_>,
    settings: &AggregationSettings,
) -> AggregationSummary {
    let mut summary: AggregationSummary = AggregationSummary::default();

    for occurrence in input.occurrences {
        place(buckets, Some(occurrence.start), &mut summary, |metrics| {
            metrics.occurrence_count = metrics.occurrence_count.saturating_add(1);
            metrics.booked_seats = metrics.booked_seats.saturating_add(occurrence.booked_count);
            metrics.capacity = metrics.capacity.saturating_add(occurrence.capacity);
        });
    }

    for sale in input.package_sales {
        let instant: Option<NaiveDateTime> =
            parse_event_timestamp(&sale.purchased_at, settings.timezone);
        place(buckets, instant, &mut summary, |metrics| {
            metrics.package_sale_count = metrics.package_sale_count.saturating_add(1);
        });
    }

    for booking in input.bookings.iter().filter(|b| b.status().is_cancellation()) {
        let instant: Option<NaiveDateTime> =
            parse_event_timestamp(&booking.created_at, settings.timezone);
        place(buckets, instant, &mut summary, |metrics| {
            metrics.cancellation_count = metrics.cancellation_count.saturating_add(1);
        });
    }

    for payment in input.payments {
        let instant: Option<NaiveDateTime> =
            parse_event_timestamp(&payment.paid_at, settings.timezone);
        let amount: f64 = parse_amount(&payment.amount);
        place(buckets, instant, &mut summary, |metrics| {
            metrics.revenue += amount;
        });
    }

    for bucket in buckets.iter_mut() {
        bucket.metrics.occupancy_percent =
            occupancy_percent(&bucket.metrics, settings.assumed_class_capacity);
    }

    summary
}

fn place<F>(
    buckets: &mut [TimeBucket],
    instant: Option<NaiveDateTime>,
    summary: &mut AggregationSummary,
    apply: F,
) where
    F: FnOnce(&mut BucketMetrics),
{
    let Some(instant) = instant else {
        summary.unparseable += 1;
        return;
    };
    let instant: NaiveDateTime = instant.trunc_subsecs(3);

    match buckets.iter_mut().find(|bucket| bucket.contains(instant)) {
        Some(bucket) => {
            apply(&mut bucket.metrics);
            summary.assigned += 1;
        }
        None => summary.out_of_range += 1,
    }
}
