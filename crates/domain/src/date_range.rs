// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting window resolution.
//!
//! A named window is mapped to a concrete `[start, end]` pair of venue-local
//! instants. Both bounds are inclusive. "Now" is always passed in by the
//! caller so that resolution is deterministic.

use crate::calendar_grid::first_of_month;
use crate::error::DomainError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Format accepted for custom range bounds.
pub const CUSTOM_BOUND_FORMAT: &str = "%Y-%m-%d";

/// A named reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RangeWindow {
    /// Today and the six days before it.
    Last7Days,
    /// Today and the 29 days before it.
    #[default]
    Last30Days,
    /// From the first of the month five months back through today.
    Last6Months,
    /// From January 1 through today.
    YearToDate,
    /// Operator-supplied bounds.
    Custom,
}

impl RangeWindow {
    /// Converts this window to its key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "last_7_days",
            Self::Last30Days => "last_30_days",
            Self::Last6Months => "last_6_months",
            Self::YearToDate => "year_to_date",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for RangeWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "last_7_days" | "7d" => Ok(Self::Last7Days),
            "last_30_days" | "30d" => Ok(Self::Last30Days),
            "last_6_months" | "6m" => Ok(Self::Last6Months),
            "year_to_date" | "ytd" => Ok(Self::YearToDate),
            "custom" => Ok(Self::Custom),
            _ => Err(DomainError::UnknownRangeWindow(s.to_string())),
        }
    }
}

impl std::fmt::Display for RangeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved reporting range. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant in the range.
    pub start: NaiveDateTime,
    /// Last instant in the range.
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Whether `instant` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Number of calendar days touched by the range, counting both ends.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }
}

/// Midnight at the start of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last millisecond of `date` (23:59:59.999).
#[must_use]
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Parses a custom bound in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the value is not a valid calendar date.
pub fn parse_custom_bound(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), CUSTOM_BOUND_FORMAT).map_err(|e| {
        DomainError::DateParseError {
            date_string: raw.to_string(),
            error: e.to_string(),
        }
    })
}

/// Resolves a reporting window against `now`.
///
/// For [`RangeWindow::Custom`] a missing bound defaults to today. When the
/// custom start is after the custom end the range collapses to the single
/// instant at the end of the end date; this is not an error.
///
/// # Arguments
///
/// * `window` - The named window
/// * `custom_start` - The custom start date, ignored for named windows
/// * `custom_end` - The custom end date, ignored for named windows
/// * `now` - The current venue-local time
///
/// # Errors
///
/// Returns an error if a custom bound cannot be parsed or the window
/// start cannot be computed.
///
/// # Example
///
/// ```text
/// window = custom, start = "2025-03-10", end = "2025-03-05"
/// range  = [2025-03-05 23:59:59.999, 2025-03-05 23:59:59.999]
/// ```
pub fn resolve_date_range(
    window: RangeWindow,
    custom_start: Option<&str>,
    custom_end: Option<&str>,
    now: NaiveDateTime,
) -> Result<DateRange, DomainError> {
    let today: NaiveDate = now.date();

    match window {
        RangeWindow::Last7Days => trailing_days(today, 7),
        RangeWindow::Last30Days => trailing_days(today, 30),
        RangeWindow::Last6Months => {
            let start: NaiveDate = first_of_month(today)
                .checked_sub_months(Months::new(5))
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("stepping five months back from {today}"),
                })?;
            Ok(DateRange {
                start: start_of_day(start),
                end: end_of_day(today),
            })
        }
        RangeWindow::YearToDate => {
            let start: NaiveDate = today.with_ordinal(1).unwrap_or(today);
            Ok(DateRange {
                start: start_of_day(start),
                end: end_of_day(today),
            })
        }
        RangeWindow::Custom => {
            let start: NaiveDate = custom_start.map_or(Ok(today), parse_custom_bound)?;
            let end: NaiveDate = custom_end.map_or(Ok(today), parse_custom_bound)?;

            if start > end {
                let instant: NaiveDateTime = end_of_day(end);
                return Ok(DateRange {
                    start: instant,
                    end: instant,
                });
            }

            Ok(DateRange {
                start: start_of_day(start),
                end: end_of_day(end),
            })
        }
    }
}

fn trailing_days(today: NaiveDate, days: u64) -> Result<DateRange, DomainError> {
    let start: NaiveDate = today.checked_sub_days(Days::new(days - 1)).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("stepping {days} days back from {today}"),
        }
    })?;
    Ok(DateRange {
        start: start_of_day(start),
        end: end_of_day(today),
    })
}
