// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Month calendar view over a venue's scheduled occurrences.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use classbook_domain::{
    GRID_DAYS, GRID_WEEKS, Interval, MonthGrid, Occurrence, WeekStart, build_month_grid,
    first_of_month, start_of_day,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cell of the month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// The calendar date.
    pub date: NaiveDate,
    /// Whether the date belongs to the displayed month.
    pub in_month: bool,
    /// Whether the date is today.
    pub is_today: bool,
    /// Sessions starting on this date.
    pub occurrence_count: usize,
}

/// A 6x7 month view with per-day session badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    /// Displayed year.
    pub year: i32,
    /// Displayed month (1-12).
    pub month: u32,
    /// Six rows of seven days.
    pub weeks: Vec<Vec<DayCell>>,
}

/// The span of time a month view displays, for fetching sessions.
#[must_use]
pub fn month_view_window(reference: NaiveDate, week_start: WeekStart) -> Interval {
    let grid: MonthGrid = build_month_grid(reference, week_start);
    let first: NaiveDate = grid[0][0];
    let last: NaiveDate = grid[GRID_WEEKS - 1][GRID_DAYS - 1];
    let end: NaiveDateTime = last
        .checked_add_days(Days::new(1))
        .map_or_else(|| start_of_day(last), start_of_day);
    Interval::from_bounds(start_of_day(first), end)
}

/// Builds the month view for the month containing `reference`.
///
/// # Arguments
///
/// * `reference` - Any date in the displayed month
/// * `today` - The current venue-local date
/// * `week_start` - First day of each row
/// * `occurrences` - Sessions to badge; those outside the grid are ignored
#[must_use]
pub fn build_month_view(
    reference: NaiveDate,
    today: NaiveDate,
    week_start: WeekStart,
    occurrences: &[Occurrence],
) -> MonthView {
    let first: NaiveDate = first_of_month(reference);

    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for occurrence in occurrences {
        *counts.entry(occurrence.start.date()).or_insert(0) += 1;
    }

    let weeks: Vec<Vec<DayCell>> = build_month_grid(reference, week_start)
        .iter()
        .map(|week| {
            week.iter()
                .map(|&date| DayCell {
                    date,
                    in_month: date.month() == first.month() && date.year() == first.year(),
                    is_today: date == today,
                    occurrence_count: counts.get(&date).copied().unwrap_or(0),
                })
                .collect()
        })
        .collect();

    MonthView {
        year: first.year(),
        month: first.month(),
        weeks,
    }
}
