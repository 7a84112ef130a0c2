// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence expansion for class series.
//!
//! A series is one base occurrence plus up to [`MAX_RECURRENCE_COUNT`]
//! follow-up occurrences generated from a [`RecurrenceRule`].
//!
//! ## Invariants
//!
//! - Generated occurrences are strictly after the base occurrence
//! - Never more than the (clamped) count cap is emitted
//! - When `until` is set, no occurrence starts on a later date
//! - The base date is never mutated; every candidate is a fresh value

use crate::error::DomainError;
use crate::overlap::Interval;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// The largest number of follow-up occurrences a rule may generate.
pub const MAX_RECURRENCE_COUNT: u8 = 6;

/// How far a weekly scan looks ahead before giving up.
const WEEKLY_SCAN_DAYS: u64 = 366;

/// How often a series repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Every day.
    Daily,
    /// On selected weekdays.
    #[default]
    Weekly,
    /// Same day of month.
    Monthly,
}

impl Frequency {
    /// Converts this frequency to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            _ => Err(DomainError::UnknownFrequency(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a weekday marker (`MO`, `TU`, ... or an English day name).
///
/// # Errors
///
/// Returns an error if the marker is not recognized.
pub fn parse_weekday_marker(marker: &str) -> Result<Weekday, DomainError> {
    let normalized: String = marker.trim().to_ascii_uppercase();
    let weekday: Weekday = match normalized.as_str() {
        "MO" => Weekday::Mon,
        "TU" => Weekday::Tue,
        "WE" => Weekday::Wed,
        "TH" => Weekday::Thu,
        "FR" => Weekday::Fri,
        "SA" => Weekday::Sat,
        "SU" => Weekday::Sun,
        _ => normalized
            .parse::<Weekday>()
            .map_err(|_| DomainError::UnknownWeekday(marker.to_string()))?,
    };
    Ok(weekday)
}

/// Two-letter marker for a weekday.
#[must_use]
pub const fn weekday_marker(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Describes how a base occurrence repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Whether the series repeats at all.
    pub enabled: bool,
    /// Repeat frequency.
    pub frequency: Frequency,
    /// Weekdays to repeat on (weekly only). Empty means the base weekday.
    pub weekdays: HashSet<Weekday>,
    /// Number of follow-up occurrences (1-6).
    pub count: u8,
    /// Last date (inclusive) an occurrence may start on.
    pub until: Option<NaiveDate>,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RecurrenceRule {
    /// A rule that generates nothing beyond the base occurrence.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            frequency: Frequency::Weekly,
            weekdays: HashSet::new(),
            count: 0,
            until: None,
        }
    }

    /// An enabled rule with the given frequency and count.
    #[must_use]
    pub fn repeating(frequency: Frequency, count: u8) -> Self {
        Self {
            enabled: true,
            frequency,
            weekdays: HashSet::new(),
            count,
            until: None,
        }
    }

    /// Restricts weekly repetition to the given weekdays.
    #[must_use]
    pub fn on_weekdays<I: IntoIterator<Item = Weekday>>(mut self, weekdays: I) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Stops the series after the given date.
    #[must_use]
    pub fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// The effective count cap, clamped to [`MAX_RECURRENCE_COUNT`].
    #[must_use]
    pub fn effective_count(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        usize::from(self.count.min(MAX_RECURRENCE_COUNT))
    }

    fn allows(&self, date: NaiveDate) -> bool {
        self.until.is_none_or(|until| date <= until)
    }
}

/// Expands a base occurrence into its follow-up occurrences.
///
/// The base occurrence itself is not part of the result.
///
/// # Arguments
///
/// * `base_date` - Date of the base occurrence
/// * `start_time` - Time of day every occurrence starts at
/// * `duration_minutes` - Length of every occurrence
/// * `rule` - The recurrence rule
///
/// # Errors
///
/// Returns an error if the duration is zero or date arithmetic overflows.
///
/// # Example
///
/// ```text
/// base = 2025-01-06 (Monday) 09:00, 45 minutes
/// rule = WEEKLY on {MO, WE}, count 4
///
/// -> 2025-01-08 09:00-09:45
///    2025-01-13 09:00-09:45
///    2025-01-15 09:00-09:45
///    2025-01-20 09:00-09:45
/// ```
pub fn expand_recurrence(
    base_date: NaiveDate,
    start_time: NaiveTime,
    duration_minutes: u32,
    rule: &RecurrenceRule,
) -> Result<Vec<Interval>, DomainError> {
    let cap: usize = rule.effective_count();
    if cap == 0 {
        return Ok(Vec::new());
    }

    let dates: Vec<NaiveDate> = match rule.frequency {
        Frequency::Daily => daily_dates(base_date, cap, rule)?,
        Frequency::Weekly => weekly_dates(base_date, cap, rule)?,
        Frequency::Monthly => monthly_dates(base_date, cap, rule)?,
    };

    dates
        .into_iter()
        .map(|date| Interval::starting_at(date.and_time(start_time), duration_minutes))
        .collect()
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("stepping past {date}"),
        })
}

fn daily_dates(
    base_date: NaiveDate,
    cap: usize,
    rule: &RecurrenceRule,
) -> Result<Vec<NaiveDate>, DomainError> {
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(cap);
    let mut cursor: NaiveDate = base_date;

    while dates.len() < cap {
        cursor = next_day(cursor)?;
        if !rule.allows(cursor) {
            break;
        }
        dates.push(cursor);
    }

    Ok(dates)
}

fn weekly_dates(
    base_date: NaiveDate,
    cap: usize,
    rule: &RecurrenceRule,
) -> Result<Vec<NaiveDate>, DomainError> {
    let base_weekday: Weekday = base_date.weekday();
    let matches = |day: Weekday| -> bool {
        if rule.weekdays.is_empty() {
            day == base_weekday
        } else {
            rule.weekdays.contains(&day)
        }
    };

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(cap);
    let mut cursor: NaiveDate = base_date;

    for _ in 0..WEEKLY_SCAN_DAYS {
        if dates.len() >= cap {
            break;
        }
        cursor = next_day(cursor)?;
        if !rule.allows(cursor) {
            break;
        }
        if matches(cursor.weekday()) {
            dates.push(cursor);
        }
    }

    Ok(dates)
}

fn monthly_dates(
    base_date: NaiveDate,
    cap: usize,
    rule: &RecurrenceRule,
) -> Result<Vec<NaiveDate>, DomainError> {
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(cap);

    // Offsets are taken from the base date so a clamped month end
    // (Jan 31 -> Feb 28) does not drag later months down with it.
    for offset in 1..=cap {
        let months: u32 = u32::try_from(offset).map_err(|_| DomainError::DateArithmeticOverflow {
            operation: format!("converting month offset {offset}"),
        })?;
        let date: NaiveDate = base_date
            .checked_add_months(Months::new(months))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {months} months to {base_date}"),
            })?;
        if !rule.allows(date) {
            break;
        }
        dates.push(date);
    }

    Ok(dates)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn nine_am() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    fn start_dates(intervals: &[Interval]) -> Vec<NaiveDate> {
        intervals.iter().map(|i| i.start.date()).collect()
    }

    #[test]
    fn test_weekly_on_monday_and_wednesday() {
        let rule: RecurrenceRule = RecurrenceRule::repeating(Frequency::Weekly, 4)
            .on_weekdays([Weekday::Mon, Weekday::Wed]);
        let result: Vec<Interval> =
            expand_recurrence(date(2025, 1, 6), nine_am(), 45, &rule).unwrap();

        assert_eq!(
            start_dates(&result),
            vec![
                date(2025, 1, 8),
                date(2025, 1, 13),
                date(2025, 1, 15),
                date(2025, 1, 20)
            ]
        );
        let first_end: NaiveDateTime = date(2025, 1, 8).and_hms_opt(9, 45, 0).unwrap();
        assert_eq!(result[0].end, first_end);
    }

    #[test]
    fn test_weekly_empty_weekdays_uses_base_weekday() {
        let rule: RecurrenceRule = RecurrenceRule::repeating(Frequency::Weekly, 3);
        let base: NaiveDate = date(2025, 1, 9); // Thursday
        let result: Vec<Interval> = expand_recurrence(base, nine_am(), 60, &rule).unwrap();

        assert_eq!(result.len(), 3);
        for interval in &result {
            assert_eq!(interval.start.weekday(), Weekday::Thu);
            assert!(interval.start.date() > base);
        }
        assert_eq!(result[2].start.date(), date(2025, 1, 30));
    }

    #[test]
    fn test_daily_steps_one_day() {
        let rule: RecurrenceRule = RecurrenceRule::repeating(Frequency::Daily, 3);
        let result: Vec<Interval> =
            expand_recurrence(date(2025, 2, 27), nine_am(), 30, &rule).unwrap();
        assert_eq!(
            start_dates(&result),
            vec![date(2025, 2, 28), date(2025, 3, 1), date(2025, 3, 2)]
        );
    }

    #[test]
    fn test_monthly_preserves_day_of_month() {
        let rule: RecurrenceRule = RecurrenceRule::repeating(Frequency::Monthly, 3);
        let result: Vec<Interval> =
            expand_recurrence(date(2025, 1, 31), nine_am(), 30, &rule).unwrap();
        assert_eq!(
            start_dates(&result),
            vec![date(2025, 2, 28), date(2025, 3, 31), date(2025, 4, 30)]
        );
    }

    #[test]
    fn test_until_is_inclusive_and_stops_series() {
        let rule: RecurrenceRule =
            RecurrenceRule::repeating(Frequency::Daily, 6).until(date(2025, 1, 8));
        let result: Vec<Interval> =
            expand_recurrence(date(2025, 1, 6), nine_am(), 30, &rule).unwrap();
        assert_eq!(start_dates(&result), vec![date(2025, 1, 7), date(2025, 1, 8)]);
    }

    #[test]
    fn test_until_before_first_step_yields_nothing() {
        let rule: RecurrenceRule =
            RecurrenceRule::repeating(Frequency::Monthly, 6).until(date(2025, 1, 20));
        let result: Vec<Interval> =
            expand_recurrence(date(2025, 1, 6), nine_am(), 30, &rule).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_disabled_or_zero_count_is_empty() {
        let disabled: RecurrenceRule = RecurrenceRule::disabled();
        assert!(
            expand_recurrence(date(2025, 1, 6), nine_am(), 30, &disabled)
                .unwrap()
                .is_empty()
        );

        let zero: RecurrenceRule = RecurrenceRule::repeating(Frequency::Daily, 0);
        assert!(
            expand_recurrence(date(2025, 1, 6), nine_am(), 30, &zero)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_count_is_clamped_to_maximum() {
        let rule: RecurrenceRule = RecurrenceRule::repeating(Frequency::Daily, 40);
        let result: Vec<Interval> =
            expand_recurrence(date(2025, 1, 6), nine_am(), 30, &rule).unwrap();
        assert_eq!(result.len(), usize::from(MAX_RECURRENCE_COUNT));
    }

    #[test]
    fn test_never_exceeds_cap_or_until_for_any_frequency() {
        let base: NaiveDate = date(2025, 5, 14);
        for frequency in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            for count in 0..=8u8 {
                for until_offset in [None, Some(3u64), Some(15), Some(70)] {
                    let mut rule: RecurrenceRule = RecurrenceRule::repeating(frequency, count)
                        .on_weekdays([Weekday::Tue, Weekday::Sat]);
                    if let Some(offset) = until_offset {
                        rule = rule.until(base + Days::new(offset));
                    }
                    let result: Vec<Interval> =
                        expand_recurrence(base, nine_am(), 50, &rule).unwrap();

                    assert!(result.len() <= usize::from(count.min(MAX_RECURRENCE_COUNT)));
                    for interval in &result {
                        assert!(interval.start.date() > base);
                        if let Some(until) = rule.until {
                            assert!(interval.start.date() <= until);
                        }
                    }
                    for pair in result.windows(2) {
                        assert!(pair[0].start < pair[1].start);
                    }
                }
            }
        }
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" DAILY ".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert!(matches!(
            "YEARLY".parse::<Frequency>(),
            Err(DomainError::UnknownFrequency(_))
        ));
    }

    #[test]
    fn test_weekday_markers() {
        assert_eq!(parse_weekday_marker("mo").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday_marker("Wednesday").unwrap(), Weekday::Wed);
        assert!(parse_weekday_marker("XX").is_err());
        assert_eq!(weekday_marker(Weekday::Sun), "SU");
    }
}
