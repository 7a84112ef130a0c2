// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Month view matrix.
//!
//! The grid is always six weeks of seven days, starting at the configured
//! week start on or before the first of the month. Leading and trailing
//! days from adjacent months fill the remaining cells, so every month is
//! fully covered regardless of length or starting weekday.

use crate::types::WeekStart;
use chrono::{Datelike, Days, NaiveDate};

/// Weeks in a month view.
pub const GRID_WEEKS: usize = 6;

/// Days per week row.
pub const GRID_DAYS: usize = 7;

/// A fixed 6x7 matrix of calendar dates.
pub type MonthGrid = [[NaiveDate; GRID_DAYS]; GRID_WEEKS];

/// Returns the first day of the month containing `reference`.
#[must_use]
pub fn first_of_month(reference: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    reference
        .with_day(1)
        .unwrap_or_else(|| reference - Days::new(u64::from(reference.day0())))
}

/// Returns the week start on or before `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date - Days::new(u64::from(week_start.days_into_week(date.weekday())))
}

/// Builds the month view matrix for the month containing `reference`.
///
/// # Example
///
/// ```text
/// reference  = 2025-03-18, week_start = Monday
/// first      = 2025-03-01 (Saturday)
/// grid[0][0] = 2025-02-24 (Monday)
/// grid[5][6] = 2025-04-06 (Sunday)
/// ```
#[must_use]
pub fn build_month_grid(reference: NaiveDate, week_start: WeekStart) -> MonthGrid {
    let origin: NaiveDate = start_of_week(first_of_month(reference), week_start);
    let mut grid: MonthGrid = [[origin; GRID_DAYS]; GRID_WEEKS];

    let mut cursor: NaiveDate = origin;
    for week in &mut grid {
        for cell in week.iter_mut() {
            *cell = cursor;
            cursor = cursor + Days::new(1);
        }
    }

    grid
}
