// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregation;
mod axis;
mod buckets;
mod calendar_grid;
mod conflict;
mod date_range;
mod error;
mod granularity;
mod overlap;
mod recurrence;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use aggregation::{
    AggregationInput, AggregationSettings, AggregationSummary, BookingRecord, BookingStatus,
    DEFAULT_ASSUMED_CLASS_CAPACITY, PackageSaleRecord, PaymentRecord, aggregate,
    occupancy_percent, parse_amount, parse_event_timestamp,
};
pub use axis::{DEFAULT_TICK_COUNT, axis_ticks, nice_number};
pub use buckets::{BucketMetrics, TimeBucket, align_to_period, generate_buckets};
pub use calendar_grid::{
    GRID_DAYS, GRID_WEEKS, MonthGrid, build_month_grid, first_of_month, start_of_week,
};
pub use conflict::{ConflictFinding, ConflictQuery, ResourceKind, detect_conflicts, has_blocking};
pub use date_range::{
    CUSTOM_BOUND_FORMAT, DateRange, RangeWindow, end_of_day, parse_custom_bound,
    resolve_date_range, start_of_day,
};
pub use error::DomainError;
pub use granularity::{Granularity, IntervalOverride, select_granularity};
pub use overlap::{Interval, intervals_overlap};
pub use recurrence::{
    Frequency, MAX_RECURRENCE_COUNT, RecurrenceRule, expand_recurrence, parse_weekday_marker,
    weekday_marker,
};
pub use types::{
    ClassTypeId, InstructorId, NewOccurrence, Occurrence, ResourceDirectory, RoomId, VenueId,
    WeekStart,
};
pub use validation::{
    ClassForm, FieldError, MAX_CAPACITY, MAX_DURATION_MINUTES, MAX_WAITLIST_CAPACITY,
    MIN_CAPACITY, MIN_DURATION_MINUTES, validate_class_form,
};
