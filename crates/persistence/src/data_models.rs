// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;
use classbook_domain::{ClassTypeId, InstructorId, Occurrence, RoomId, VenueId};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Format of session start and end columns.
///
/// Fixed width, so text comparison in SQL orders like time.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Formats a venue-local time for a session column.
#[must_use]
pub fn format_stored_timestamp(value: NaiveDateTime) -> String {
    value.format(STORED_TIMESTAMP_FORMAT).to_string()
}

/// Reads a session time column.
///
/// # Errors
///
/// Returns an error if the column holds something other than a stored timestamp.
pub fn parse_stored_timestamp(raw: &str) -> Result<NaiveDateTime, PersistenceError> {
    NaiveDateTime::parse_from_str(raw, STORED_TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp '{raw}': {e}")))
}

/// An instructor of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorData {
    pub instructor_id: InstructorId,
    pub venue_id: VenueId,
    pub display_name: String,
}

/// A room of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomData {
    pub room_id: RoomId,
    pub venue_id: VenueId,
    pub display_name: String,
}

/// A stored class session with every column converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSessionData {
    pub session_id: i64,
    pub venue_id: VenueId,
    pub class_type_id: ClassTypeId,
    pub instructor_id: InstructorId,
    pub room_id: Option<RoomId>,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub capacity: u32,
    pub booked_count: u32,
    pub waitlist_capacity: u32,
    pub waitlist_count: u32,
    pub late_cancel_allowed: bool,
    pub visible: bool,
    /// The submission that created the session, if any.
    pub batch_id: Option<String>,
    pub batch_seq: Option<u32>,
}

impl ClassSessionData {
    /// The snapshot used by conflict detection and analytics.
    #[must_use]
    pub fn occurrence(&self) -> Occurrence {
        Occurrence {
            occurrence_id: self.session_id,
            name: self.name.clone(),
            instructor_id: self.instructor_id,
            room_id: self.room_id,
            start: self.start,
            end: self.end,
            capacity: self.capacity,
            booked_count: self.booked_count,
            waitlist_count: self.waitlist_count,
        }
    }
}
