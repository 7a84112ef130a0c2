// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double-booking detection for candidate class sessions.
//!
//! Every candidate in a series is checked against every existing session
//! of the venue. A clash on the instructor and a clash on the room are
//! reported independently, so one pairing can yield two findings.
//!
//! All findings block submission.

use crate::overlap::intervals_overlap;
use crate::types::{InstructorId, NewOccurrence, Occurrence, ResourceDirectory, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The resource two sessions are competing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// The same instructor would teach two classes at once.
    Instructor,
    /// The same room would host two classes at once.
    Room,
}

impl ResourceKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instructor => "instructor",
            Self::Room => "room",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected overlap between a candidate and an existing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFinding {
    /// The contested resource.
    pub kind: ResourceKind,
    /// Index of the candidate within the series (0 is the base occurrence).
    pub candidate_index: usize,
    /// Identifier of the existing session.
    pub existing_occurrence_id: i64,
    /// Human-readable explanation.
    pub message: String,
    /// Whether the finding prevents submission.
    pub blocking: bool,
}

/// Options for a conflict check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictQuery {
    /// An existing session to leave out of the check (the one being edited).
    pub ignore_occurrence_id: Option<i64>,
}

/// Detects instructor and room clashes for a candidate series.
///
/// # Arguments
///
/// * `candidates` - The base occurrence followed by its recurrences
/// * `existing` - Every existing session of the venue
/// * `directory` - Display names for the messages
/// * `query` - Check options
///
/// # Returns
///
/// Findings in candidate order, with identical messages collapsed.
#[must_use]
pub fn detect_conflicts(
    candidates: &[NewOccurrence],
    existing: &[Occurrence],
    directory: &ResourceDirectory,
    query: ConflictQuery,
) -> Vec<ConflictFinding> {
    let mut findings: Vec<ConflictFinding> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (candidate_index, candidate) in candidates.iter().enumerate() {
        for session in existing {
            if query.ignore_occurrence_id == Some(session.occurrence_id) {
                continue;
            }
            if !intervals_overlap(&candidate.interval(), &session.interval()) {
                continue;
            }

            if session.instructor_id == candidate.instructor_id {
                push_unique(
                    &mut findings,
                    &mut seen,
                    ConflictFinding {
                        kind: ResourceKind::Instructor,
                        candidate_index,
                        existing_occurrence_id: session.occurrence_id,
                        message: instructor_message(candidate.instructor_id, session, directory),
                        blocking: true,
                    },
                );
            }

            if let (Some(candidate_room), Some(session_room)) = (candidate.room_id, session.room_id)
                && candidate_room == session_room
            {
                push_unique(
                    &mut findings,
                    &mut seen,
                    ConflictFinding {
                        kind: ResourceKind::Room,
                        candidate_index,
                        existing_occurrence_id: session.occurrence_id,
                        message: room_message(session_room, session, directory),
                        blocking: true,
                    },
                );
            }
        }
    }

    findings
}

/// Whether any finding prevents submission.
#[must_use]
pub fn has_blocking(findings: &[ConflictFinding]) -> bool {
    findings.iter().any(|finding| finding.blocking)
}

fn push_unique(
    findings: &mut Vec<ConflictFinding>,
    seen: &mut HashSet<String>,
    finding: ConflictFinding,
) {
    if seen.insert(finding.message.clone()) {
        findings.push(finding);
    }
}

fn describe_slot(session: &Occurrence) -> String {
    format!(
        "'{}' on {} from {} to {}",
        session.name,
        session.start.format("%Y-%m-%d"),
        session.start.format("%H:%M"),
        session.end.format("%H:%M")
    )
}

fn instructor_message(
    instructor: InstructorId,
    session: &Occurrence,
    directory: &ResourceDirectory,
) -> String {
    format!(
        "{} is already teaching {}",
        directory.instructor_name(instructor),
        describe_slot(session)
    )
}

fn room_message(room: RoomId, session: &Occurrence, directory: &ResourceDirectory) -> String {
    format!(
        "{} is already booked for {}",
        directory.room_name(room),
        describe_slot(session)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{ClassTypeId, VenueId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn existing(id: i64, instructor: i64, room: Option<i64>, start: NaiveDateTime, end: NaiveDateTime) -> Occurrence {
        Occurrence {
            occurrence_id: id,
            name: String::from("Morning Flow"),
            instructor_id: InstructorId::new(instructor),
            room_id: room.map(RoomId::new),
            start,
            end,
            capacity: 12,
            booked_count: 4,
            waitlist_count: 0,
        }
    }

    fn candidate(instructor: i64, room: Option<i64>, start: NaiveDateTime, end: NaiveDateTime) -> NewOccurrence {
        NewOccurrence {
            venue_id: VenueId::new(1),
            class_type_id: ClassTypeId::new(1),
            instructor_id: InstructorId::new(instructor),
            room_id: room.map(RoomId::new),
            name: String::from("Power Hour"),
            start,
            end,
            capacity: 10,
            booked_count: 0,
            waitlist_capacity: 5,
            late_cancel_allowed: false,
            visible: true,
        }
    }

    fn directory() -> ResourceDirectory {
        let mut directory: ResourceDirectory = ResourceDirectory::new();
        directory.insert_instructor(InstructorId::new(1), "Ada");
        directory.insert_room(RoomId::new(1), "Studio A");
        directory.insert_room(RoomId::new(2), "Studio B");
        directory
    }

    #[test]
    fn test_instructor_clash_in_other_room() {
        let sessions = vec![existing(7, 1, Some(1), at(6, 10, 0), at(6, 11, 0))];
        let candidates = vec![candidate(1, Some(2), at(6, 10, 30), at(6, 11, 30))];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ResourceKind::Instructor);
        assert_eq!(findings[0].existing_occurrence_id, 7);
        assert!(findings[0].blocking);
        assert!(findings[0].message.starts_with("Ada is already teaching"));
        assert!(has_blocking(&findings));
    }

    #[test]
    fn test_room_clash_with_other_instructor() {
        let sessions = vec![existing(7, 2, Some(1), at(6, 10, 0), at(6, 11, 0))];
        let candidates = vec![candidate(1, Some(1), at(6, 9, 30), at(6, 10, 15))];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ResourceKind::Room);
        assert!(findings[0].message.starts_with("Studio A is already booked"));
    }

    #[test]
    fn test_same_instructor_and_room_yields_two_findings() {
        let sessions = vec![existing(7, 1, Some(1), at(6, 10, 0), at(6, 11, 0))];
        let candidates = vec![candidate(1, Some(1), at(6, 10, 0), at(6, 11, 0))];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());

        let kinds: Vec<ResourceKind> = findings.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![ResourceKind::Instructor, ResourceKind::Room]);
    }

    #[test]
    fn test_touching_sessions_do_not_conflict() {
        let sessions = vec![existing(7, 1, Some(1), at(6, 10, 0), at(6, 11, 0))];
        let candidates = vec![candidate(1, Some(1), at(6, 11, 0), at(6, 12, 0))];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());
        assert!(findings.is_empty());
        assert!(!has_blocking(&findings));
    }

    #[test]
    fn test_missing_room_never_conflicts_on_room() {
        let sessions = vec![existing(7, 2, None, at(6, 10, 0), at(6, 11, 0))];
        let candidates = vec![candidate(1, None, at(6, 10, 0), at(6, 11, 0))];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_ignored_session_is_skipped() {
        let sessions = vec![existing(7, 1, Some(1), at(6, 10, 0), at(6, 11, 0))];
        let candidates = vec![candidate(1, Some(1), at(6, 10, 0), at(6, 11, 0))];

        let findings = detect_conflicts(
            &candidates,
            &sessions,
            &directory(),
            ConflictQuery {
                ignore_occurrence_id: Some(7),
            },
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_findings_follow_candidate_order() {
        let sessions = vec![
            existing(7, 1, None, at(6, 10, 0), at(6, 11, 0)),
            existing(8, 1, None, at(8, 10, 0), at(8, 11, 0)),
        ];
        let candidates = vec![
            candidate(1, None, at(6, 10, 0), at(6, 11, 0)),
            candidate(1, None, at(7, 10, 0), at(7, 11, 0)),
            candidate(1, None, at(8, 10, 0), at(8, 11, 0)),
        ];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());

        let indices: Vec<usize> = findings.iter().map(|f| f.candidate_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_identical_messages_are_collapsed() {
        // Two existing rows describing the same slot produce the same message.
        let sessions = vec![
            existing(7, 1, None, at(6, 10, 0), at(6, 11, 0)),
            existing(7, 1, None, at(6, 10, 0), at(6, 11, 0)),
        ];
        let candidates = vec![candidate(1, None, at(6, 10, 30), at(6, 11, 30))];

        let findings = detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_instructor_flagged_iff_shared_and_overlapping() {
        let sessions = vec![existing(7, 1, None, at(6, 10, 0), at(6, 11, 0))];
        for instructor in 1..=2 {
            for start_minute in (0..=120).step_by(15) {
                let start: NaiveDateTime = at(6, 9, 0) + chrono::Duration::minutes(start_minute);
                let end: NaiveDateTime = start + chrono::Duration::minutes(30);
                let candidates = vec![candidate(instructor, None, start, end)];

                let findings =
                    detect_conflicts(&candidates, &sessions, &directory(), ConflictQuery::default());

                let expected: bool = instructor == 1 && start < at(6, 11, 0) && at(6, 10, 0) < end;
                assert_eq!(
                    findings.iter().any(|f| f.kind == ResourceKind::Instructor),
                    expected,
                    "instructor={instructor} start={start}"
                );
            }
        }
    }
}
