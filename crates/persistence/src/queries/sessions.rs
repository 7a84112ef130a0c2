// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class session queries.

use classbook_domain::{ClassTypeId, InstructorId, Interval, RoomId, VenueId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{ClassSessionData, format_stored_timestamp, parse_stored_timestamp};
use crate::diesel_schema::class_sessions;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = class_sessions)]
struct ClassSessionRow {
    session_id: i64,
    venue_id: i64,
    class_type_id: i64,
    instructor_id: i64,
    room_id: Option<i64>,
    name: String,
    starts_at: String,
    ends_at: String,
    capacity: i32,
    booked_count: i32,
    waitlist_capacity: i32,
    waitlist_count: i32,
    late_cancel_allowed: i32,
    visible: i32,
    batch_id: Option<String>,
    batch_seq: Option<i32>,
}

fn to_count(column: &str, session_id: i64, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "session {session_id} has negative {column}: {value}"
        ))
    })
}

impl TryFrom<ClassSessionRow> for ClassSessionData {
    type Error = PersistenceError;

    fn try_from(row: ClassSessionRow) -> Result<Self, Self::Error> {
        let id: i64 = row.session_id;
        Ok(Self {
            session_id: id,
            venue_id: VenueId::new(row.venue_id),
            class_type_id: ClassTypeId::new(row.class_type_id),
            instructor_id: InstructorId::new(row.instructor_id),
            room_id: row.room_id.map(RoomId::new),
            name: row.name,
            start: parse_stored_timestamp(&row.starts_at)?,
            end: parse_stored_timestamp(&row.ends_at)?,
            capacity: to_count("capacity", id, row.capacity)?,
            booked_count: to_count("booked_count", id, row.booked_count)?,
            waitlist_capacity: to_count("waitlist_capacity", id, row.waitlist_capacity)?,
            waitlist_count: to_count("waitlist_count", id, row.waitlist_count)?,
            late_cancel_allowed: row.late_cancel_allowed != 0,
            visible: row.visible != 0,
            batch_id: row.batch_id,
            batch_seq: row
                .batch_seq
                .map(|seq| to_count("batch_seq", id, seq))
                .transpose()?,
        })
    }
}

/// Lists the sessions of a venue that overlap `window`, ordered by start.
///
/// A session overlaps when it starts before the window ends and ends
/// after the window starts.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_sessions_in_window(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    window: Interval,
) -> Result<Vec<ClassSessionData>, PersistenceError> {
    let window_start: String = format_stored_timestamp(window.start);
    let window_end: String = format_stored_timestamp(window.end);

    let rows: Vec<ClassSessionRow> = class_sessions::table
        .filter(class_sessions::venue_id.eq(venue_id.value()))
        .filter(class_sessions::starts_at.lt(&window_end))
        .filter(class_sessions::ends_at.gt(&window_start))
        .order((
            class_sessions::starts_at.asc(),
            class_sessions::session_id.asc(),
        ))
        .select(ClassSessionRow::as_select())
        .load(conn)?;

    debug!(
        venue_id = %venue_id,
        window_start,
        window_end,
        count = rows.len(),
        "Loaded class sessions in window"
    );

    rows.into_iter().map(ClassSessionData::try_from).collect()
}

/// Retrieves one session.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if the session does not exist.
pub fn get_session(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<Option<ClassSessionData>, PersistenceError> {
    let row: Option<ClassSessionRow> = class_sessions::table
        .filter(class_sessions::session_id.eq(session_id))
        .select(ClassSessionRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ClassSessionData::try_from).transpose()
}

/// Finds the session a venue created for one slot of a batch.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_batch_slot(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    batch_id: &str,
    batch_seq: i32,
) -> Result<Option<i64>, PersistenceError> {
    Ok(class_sessions::table
        .filter(class_sessions::venue_id.eq(venue_id.value()))
        .filter(class_sessions::batch_id.eq(batch_id))
        .filter(class_sessions::batch_seq.eq(batch_seq))
        .select(class_sessions::session_id)
        .first::<i64>(conn)
        .optional()?)
}

/// Counts the sessions a venue created under a batch.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_batch_sessions(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    batch_id: &str,
) -> Result<i64, PersistenceError> {
    Ok(class_sessions::table
        .filter(class_sessions::venue_id.eq(venue_id.value()))
        .filter(class_sessions::batch_id.eq(batch_id))
        .count()
        .get_result(conn)?)
}
