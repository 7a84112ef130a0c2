// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open time intervals and the overlap predicate.
//!
//! Every conflict check and bucket assignment in the engine reduces to
//! [`intervals_overlap`]. Intervals are `[start, end)`: an interval that
//! ends exactly when another begins does not overlap it.

use crate::error::DomainError;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A half-open span of venue-local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl Interval {
    /// Creates an interval, rejecting empty or inverted spans.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not strictly after `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval from bounds that are already known to be ordered.
    ///
    /// Used for snapshots loaded from the store. An empty or inverted
    /// snapshot never overlaps anything.
    #[must_use]
    pub const fn from_bounds(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Creates an interval starting at `start` lasting `minutes`.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero or the end overflows.
    pub fn starting_at(start: NaiveDateTime, minutes: u32) -> Result<Self, DomainError> {
        let end: NaiveDateTime = start
            .checked_add_signed(Duration::minutes(i64::from(minutes)))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {minutes} minutes to {start}"),
            })?;
        Self::new(start, end)
    }

    /// Whether the interval covers no time at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length of the interval.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether this interval overlaps `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        intervals_overlap(self, other)
    }
}

/// Returns true iff `[a.start, a.end)` and `[b.start, b.end)` intersect.
///
/// Empty or inverted intervals contain no instants and never overlap.
#[must_use]
pub fn intervals_overlap(a: &Interval, b: &Interval) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.start < b.end && b.start < a.end
}
