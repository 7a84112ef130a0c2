// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::recurrence::{MAX_RECURRENCE_COUNT, RecurrenceRule};
use crate::types::{ClassTypeId, InstructorId, RoomId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest class capacity accepted.
pub const MIN_CAPACITY: u32 = 1;
/// Largest class capacity accepted.
pub const MAX_CAPACITY: u32 = 100;
/// Shortest class accepted, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 15;
/// Longest class accepted, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 180;
/// Largest waitlist accepted.
pub const MAX_WAITLIST_CAPACITY: u32 = 100;

/// The operator's "new class" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassForm {
    /// Display name.
    pub name: String,
    /// Selected class type.
    pub class_type_id: Option<ClassTypeId>,
    /// Selected instructor.
    pub instructor_id: Option<InstructorId>,
    /// Selected room. Optional.
    pub room_id: Option<RoomId>,
    /// Date of the first session.
    pub date: Option<NaiveDate>,
    /// Start time of every session.
    pub start_time: Option<NaiveTime>,
    /// Length of every session.
    pub duration_minutes: u32,
    /// Seats per session.
    pub capacity: u32,
    /// Waitlist length per session.
    pub waitlist_capacity: u32,
    /// Whether late cancellation is allowed.
    pub late_cancel_allowed: bool,
    /// Whether consumers can see the sessions.
    pub visible: bool,
    /// How the first session repeats.
    pub recurrence: RecurrenceRule,
}

/// A per-field problem with a class form.
///
/// Field errors are collected and shown next to their inputs; they are
/// never raised as failures of the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FieldError {
    /// The class name is blank.
    #[error("Class name is required")]
    MissingName,
    /// No class type was selected.
    #[error("Class type is required")]
    MissingClassType,
    /// No instructor was selected.
    #[error("Instructor is required")]
    MissingInstructor,
    /// No date was chosen.
    #[error("Date is required")]
    MissingDate,
    /// No start time was chosen.
    #[error("Start time is required")]
    MissingStartTime,
    /// Capacity is outside the accepted range.
    #[error("Capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}, got {0}")]
    CapacityOutOfRange(u32),
    /// Duration is outside the accepted range.
    #[error(
        "Duration must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES} minutes, got {0}"
    )]
    DurationOutOfRange(u32),
    /// Waitlist is too long.
    #[error("Waitlist capacity must be at most {MAX_WAITLIST_CAPACITY}, got {0}")]
    WaitlistTooLarge(u32),
    /// Repeat count is outside the accepted range.
    #[error("Repeat count must be between 1 and {MAX_RECURRENCE_COUNT}, got {0}")]
    RecurrenceCountOutOfRange(u8),
    /// The repeat end date precedes the first session.
    #[error("Repeat end date {until} is before the first class on {date}")]
    UntilBeforeStart {
        /// The repeat end date.
        until: NaiveDate,
        /// The first session date.
        date: NaiveDate,
    },
}

impl FieldError {
    /// The form field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingClassType => "class_type_id",
            Self::MissingInstructor => "instructor_id",
            Self::MissingDate => "date",
            Self::MissingStartTime => "start_time",
            Self::CapacityOutOfRange(_) => "capacity",
            Self::DurationOutOfRange(_) => "duration_minutes",
            Self::WaitlistTooLarge(_) => "waitlist_capacity",
            Self::RecurrenceCountOutOfRange(_) => "recurrence.count",
            Self::UntilBeforeStart { .. } => "recurrence.until",
        }
    }
}

/// Validates a class form.
///
/// Every rule is checked; all failures are returned together, in form
/// order. An empty list means the form may proceed to conflict detection.
#[must_use]
pub fn validate_class_form(form: &ClassForm) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError::MissingName);
    }
    if form.class_type_id.is_none() {
        errors.push(FieldError::MissingClassType);
    }
    if form.instructor_id.is_none() {
        errors.push(FieldError::MissingInstructor);
    }
    if form.date.is_none() {
        errors.push(FieldError::MissingDate);
    }
    if form.start_time.is_none() {
        errors.push(FieldError::MissingStartTime);
    }
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&form.capacity) {
        errors.push(FieldError::CapacityOutOfRange(form.capacity));
    }
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&form.duration_minutes) {
        errors.push(FieldError::DurationOutOfRange(form.duration_minutes));
    }
    if form.waitlist_capacity > MAX_WAITLIST_CAPACITY {
        errors.push(FieldError::WaitlistTooLarge(form.waitlist_capacity));
    }

    let rule: &RecurrenceRule = &form.recurrence;
    if rule.enabled {
        if !(1..=MAX_RECURRENCE_COUNT).contains(&rule.count) {
            errors.push(FieldError::RecurrenceCountOutOfRange(rule.count));
        }
        if let (Some(until), Some(date)) = (rule.until, form.date)
            && until < date
        {
            errors.push(FieldError::UntilBeforeStart { until, date });
        }
    }

    errors
}
