// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Series planning: validation, expansion and conflict detection.
//!
//! Planning is pure and recomputed from scratch on every form change.
//! Callers that plan on every keystroke memoize against unchanged inputs.

use crate::error::CoreError;
use classbook_domain::{
    ClassForm, ConflictFinding, ConflictQuery, FieldError, Interval, NewOccurrence, Occurrence,
    ResourceDirectory, VenueId, detect_conflicts, expand_recurrence, has_blocking,
    validate_class_form,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A class form bound to the venue it is created in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDraft {
    /// The venue hosting the series.
    pub venue_id: VenueId,
    /// The operator's form.
    pub form: ClassForm,
    /// The session being edited, left out of conflict detection.
    pub editing_occurrence_id: Option<i64>,
}

/// The outcome of planning a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPlan {
    /// Per-field form problems. Non-empty means no candidates were built.
    pub field_errors: Vec<FieldError>,
    /// The base occurrence followed by its recurrences.
    pub candidates: Vec<NewOccurrence>,
    /// Overlaps with existing sessions.
    pub findings: Vec<ConflictFinding>,
}

impl SeriesPlan {
    /// Whether the plan may be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.field_errors.is_empty() && !has_blocking(&self.findings) && !self.candidates.is_empty()
    }

    /// Checks that the plan may be submitted.
    ///
    /// # Errors
    ///
    /// Returns the first reason the plan is refused: field errors, then
    /// blocking conflicts, then an empty series.
    pub fn ensure_submittable(&self) -> Result<(), CoreError> {
        if !self.field_errors.is_empty() {
            return Err(CoreError::InvalidDraft(self.field_errors.clone()));
        }
        let blocking: usize = self.findings.iter().filter(|f| f.blocking).count();
        if blocking > 0 {
            return Err(CoreError::BlockedByConflicts(blocking));
        }
        if self.candidates.is_empty() {
            return Err(CoreError::EmptySeries);
        }
        Ok(())
    }
}

/// Builds the candidate sessions of a draft: the base occurrence followed
/// by its recurrences.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDraft`] if the form has field errors, or a
/// domain error if date arithmetic overflows while expanding.
pub fn build_candidates(draft: &ClassDraft) -> Result<Vec<NewOccurrence>, CoreError> {
    let form: &ClassForm = &draft.form;
    let field_errors: Vec<FieldError> = validate_class_form(form);

    let (Some(date), Some(start_time), Some(instructor_id), Some(class_type_id)) = (
        form.date,
        form.start_time,
        form.instructor_id,
        form.class_type_id,
    ) else {
        return Err(CoreError::InvalidDraft(field_errors));
    };
    if !field_errors.is_empty() {
        return Err(CoreError::InvalidDraft(field_errors));
    }

    let base: Interval = Interval::starting_at(date.and_time(start_time), form.duration_minutes)?;
    let recurrences: Vec<Interval> =
        expand_recurrence(date, start_time, form.duration_minutes, &form.recurrence)?;

    Ok(std::iter::once(base)
        .chain(recurrences)
        .map(|interval| NewOccurrence {
            venue_id: draft.venue_id,
            class_type_id,
            instructor_id,
            room_id: form.room_id,
            name: form.name.trim().to_string(),
            start: interval.start,
            end: interval.end,
            capacity: form.capacity,
            booked_count: 0,
            waitlist_capacity: form.waitlist_capacity,
            late_cancel_allowed: form.late_cancel_allowed,
            visible: form.visible,
        })
        .collect())
}

/// The span covered by a set of candidates, for fetching existing sessions.
#[must_use]
pub fn candidate_window(candidates: &[NewOccurrence]) -> Option<Interval> {
    let start = candidates.iter().map(|c| c.start).min()?;
    let end = candidates.iter().map(|c| c.end).max()?;
    Some(Interval::from_bounds(start, end))
}

/// Plans a series from a draft.
///
/// # Arguments
///
/// * `draft` - The class draft
/// * `existing` - Every existing session of the venue in the affected window
/// * `directory` - Display names for conflict messages
///
/// # Returns
///
/// A plan. Field errors are reported inside the plan, not as an error.
///
/// # Errors
///
/// Returns an error only if date arithmetic overflows while expanding.
pub fn plan_series(
    draft: &ClassDraft,
    existing: &[Occurrence],
    directory: &ResourceDirectory,
) -> Result<SeriesPlan, CoreError> {
    let candidates: Vec<NewOccurrence> = match build_candidates(draft) {
        Ok(candidates) => candidates,
        Err(CoreError::InvalidDraft(field_errors)) => {
            debug!(count = field_errors.len(), "Class draft has field errors");
            return Ok(SeriesPlan {
                field_errors,
                candidates: Vec::new(),
                findings: Vec::new(),
            });
        }
        Err(err) => return Err(err),
    };

    let findings: Vec<ConflictFinding> = detect_conflicts(
        &candidates,
        existing,
        directory,
        ConflictQuery {
            ignore_occurrence_id: draft.editing_occurrence_id,
        },
    );

    debug!(
        candidates = candidates.len(),
        findings = findings.len(),
        "Planned class series"
    );

    Ok(SeriesPlan {
        field_errors: Vec::new(),
        candidates,
        findings,
    })
}
