// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine-wide settings: venue timezone, assumed capacity, tick count
//! and week start.

use classbook_domain::{
    AggregationSettings, DEFAULT_ASSUMED_CLASS_CAPACITY, DEFAULT_TICK_COUNT, DomainError,
    WeekStart,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Venue-level settings shared by every engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The venue timezone. All engine times are wall-clock times in it.
    pub timezone: Tz,
    /// First day of the week for calendars and week buckets.
    pub week_start: WeekStart,
    /// Capacity assumed per class when sessions carry none.
    pub assumed_class_capacity: u32,
    /// Desired number of axis intervals.
    pub axis_tick_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            week_start: WeekStart::Monday,
            assumed_class_capacity: DEFAULT_ASSUMED_CLASS_CAPACITY,
            axis_tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

impl EngineConfig {
    /// Parses an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known zone.
    pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Converts a clock reading into venue-local time.
    #[must_use]
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.timezone).naive_local()
    }

    /// Settings handed to the aggregator.
    #[must_use]
    pub const fn aggregation_settings(&self) -> AggregationSettings {
        AggregationSettings {
            timezone: self.timezone,
            assumed_class_capacity: self.assumed_class_capacity,
        }
    }
}
