// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, FieldError};
use chrono::NaiveDate;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::DateParseError {
        date_string: String::from("March"),
        error: String::from("input contains invalid characters"),
    };
    assert_eq!(
        format!("{err}"),
        "Failed to parse date 'March': input contains invalid characters"
    );

    let err: DomainError = DomainError::InvalidIdentifier {
        kind: "room",
        value: String::from("abc"),
    };
    assert_eq!(format!("{err}"), "Invalid room identifier: 'abc'");

    let err: DomainError = DomainError::UnknownFrequency(String::from("HOURLY"));
    assert_eq!(
        format!("{err}"),
        "Unknown recurrence frequency 'HOURLY'. Must be DAILY, WEEKLY or MONTHLY"
    );

    let err: DomainError = DomainError::UnknownRangeWindow(String::from("fortnight"));
    assert_eq!(format!("{err}"), "Unknown date range 'fortnight'");

    let err: DomainError = DomainError::UnknownWeekStart(String::from("friday"));
    assert_eq!(
        format!("{err}"),
        "Unknown week start 'friday'. Must be monday or sunday"
    );

    let err: DomainError = DomainError::InvalidTimezone(String::from("Mars/Olympus"));
    assert_eq!(format!("{err}"), "Invalid timezone: Mars/Olympus");
}

#[test]
fn test_field_error_display_and_field() {
    let err: FieldError = FieldError::CapacityOutOfRange(0);
    assert_eq!(format!("{err}"), "Capacity must be between 1 and 100, got 0");
    assert_eq!(err.field(), "capacity");

    let err: FieldError = FieldError::DurationOutOfRange(200);
    assert_eq!(
        format!("{err}"),
        "Duration must be between 15 and 180 minutes, got 200"
    );
    assert_eq!(err.field(), "duration_minutes");

    let err: FieldError = FieldError::UntilBeforeStart {
        until: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    };
    assert_eq!(
        format!("{err}"),
        "Repeat end date 2025-01-01 is before the first class on 2025-01-06"
    );
    assert_eq!(err.field(), "recurrence.until");

    assert_eq!(FieldError::MissingName.field(), "name");
    assert_eq!(format!("{}", FieldError::MissingName), "Class name is required");
}
