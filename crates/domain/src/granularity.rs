// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::{DateRange, RangeWindow};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longest custom span, in days, reported per day.
pub const DAILY_SPAN_LIMIT: i64 = 31;

/// Longest custom span, in days, reported per week.
pub const WEEKLY_SPAN_LIMIT: i64 = 120;

/// Bucket size for analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// One bucket per calendar day.
    Day,
    /// One bucket per week.
    Week,
    /// One bucket per calendar month.
    Month,
}

impl Granularity {
    /// Converts this granularity to its key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operator's interval choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IntervalOverride {
    /// Derive the granularity from the window.
    #[default]
    Auto,
    /// Use the given granularity.
    Fixed(Granularity),
}

impl FromStr for IntervalOverride {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "day" => Ok(Self::Fixed(Granularity::Day)),
            "week" => Ok(Self::Fixed(Granularity::Week)),
            "month" => Ok(Self::Fixed(Granularity::Month)),
            _ => Err(DomainError::UnknownInterval(s.to_string())),
        }
    }
}

/// Chooses the bucket granularity for a resolved range.
///
/// An explicit override always wins. Otherwise the window decides; custom
/// ranges are sized by their inclusive day span.
#[must_use]
pub fn select_granularity(
    window: RangeWindow,
    interval: IntervalOverride,
    range: &DateRange,
) -> Granularity {
    if let IntervalOverride::Fixed(granularity) = interval {
        return granularity;
    }

    match window {
        RangeWindow::Last7Days | RangeWindow::Last30Days => Granularity::Day,
        RangeWindow::Last6Months => Granularity::Week,
        RangeWindow::YearToDate => Granularity::Month,
        RangeWindow::Custom => {
            let span: i64 = range.span_days();
            if span <= DAILY_SPAN_LIMIT {
                Granularity::Day
            } else if span <= WEEKLY_SPAN_LIMIT {
                Granularity::Week
            } else {
                Granularity::Month
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::date_range::{end_of_day, start_of_day};
    use chrono::{Days, NaiveDate};

    fn custom_span(days: u64) -> DateRange {
        let start: NaiveDate = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end: NaiveDate = start.checked_add_days(Days::new(days - 1)).unwrap();
        DateRange {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    #[test]
    fn test_named_windows() {
        let range: DateRange = custom_span(7);
        assert_eq!(
            select_granularity(RangeWindow::Last7Days, IntervalOverride::Auto, &range),
            Granularity::Day
        );
        assert_eq!(
            select_granularity(RangeWindow::Last30Days, IntervalOverride::Auto, &range),
            Granularity::Day
        );
        assert_eq!(
            select_granularity(RangeWindow::Last6Months, IntervalOverride::Auto, &range),
            Granularity::Week
        );
        assert_eq!(
            select_granularity(RangeWindow::YearToDate, IntervalOverride::Auto, &range),
            Granularity::Month
        );
    }

    #[test]
    fn test_custom_span_thresholds() {
        let cases: [(u64, Granularity); 6] = [
            (1, Granularity::Day),
            (31, Granularity::Day),
            (32, Granularity::Week),
            (120, Granularity::Week),
            (121, Granularity::Month),
            (400, Granularity::Month),
        ];
        for (days, expected) in cases {
            assert_eq!(
                select_granularity(RangeWindow::Custom, IntervalOverride::Auto, &custom_span(days)),
                expected,
                "span of {days} days"
            );
        }
    }

    #[test]
    fn test_override_wins() {
        let range: DateRange = custom_span(400);
        assert_eq!(
            select_granularity(
                RangeWindow::YearToDate,
                IntervalOverride::Fixed(Granularity::Day),
                &range
            ),
            Granularity::Day
        );
    }

    #[test]
    fn test_parse_override() {
        assert_eq!("auto".parse::<IntervalOverride>().unwrap(), IntervalOverride::Auto);
        assert_eq!(
            "Week".parse::<IntervalOverride>().unwrap(),
            IntervalOverride::Fixed(Granularity::Week)
        );
        assert!(matches!(
            "hourly".parse::<IntervalOverride>(),
            Err(DomainError::UnknownInterval(_))
        ));
    }
}
