// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;

/// Errors that can occur in the scheduling and analytics rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An interval whose end does not come after its start.
    InvalidInterval {
        /// The interval start.
        start: NaiveDateTime,
        /// The interval end.
        end: NaiveDateTime,
    },
    /// Failed to parse a date or timestamp from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// An identifier could not be normalized to its canonical form.
    InvalidIdentifier {
        /// The kind of identifier (instructor, room, ...).
        kind: &'static str,
        /// The raw value that was rejected.
        value: String,
    },
    /// Recurrence frequency key is not one of DAILY, WEEKLY, MONTHLY.
    UnknownFrequency(String),
    /// Weekday marker is not recognized.
    UnknownWeekday(String),
    /// Reporting window key is not recognized.
    UnknownRangeWindow(String),
    /// Interval override key is not recognized.
    UnknownInterval(String),
    /// Week start convention is not recognized.
    UnknownWeekStart(String),
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInterval { start, end } => {
                write!(f, "Interval end {end} must be after its start {start}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: '{value}'")
            }
            Self::UnknownFrequency(value) => {
                write!(
                    f,
                    "Unknown recurrence frequency '{value}'. Must be DAILY, WEEKLY or MONTHLY"
                )
            }
            Self::UnknownWeekday(value) => write!(f, "Unknown weekday marker '{value}'"),
            Self::UnknownRangeWindow(value) => write!(f, "Unknown date range '{value}'"),
            Self::UnknownInterval(value) => {
                write!(
                    f,
                    "Unknown interval '{value}'. Must be auto, day, week or month"
                )
            }
            Self::UnknownWeekStart(value) => {
                write!(f, "Unknown week start '{value}'. Must be monday or sunday")
            }
            Self::InvalidTimezone(value) => write!(f, "Invalid timezone: {value}"),
        }
    }
}

impl std::error::Error for DomainError {}
