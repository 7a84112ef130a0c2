// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Instructor and room mutations.

use classbook_domain::{InstructorId, RoomId, VenueId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{instructors, rooms};
use crate::error::PersistenceError;

/// Creates an instructor.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `venue_id` - The venue employing the instructor
/// * `display_name` - The name shown in calendars and conflict messages
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_instructor(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    display_name: &str,
) -> Result<InstructorId, PersistenceError> {
    diesel::insert_into(instructors::table)
        .values((
            instructors::venue_id.eq(venue_id.value()),
            instructors::display_name.eq(display_name.trim()),
        ))
        .execute(conn)?;

    let instructor_id: i64 = get_last_insert_rowid(conn)?;
    info!(venue_id = %venue_id, instructor_id, "Created instructor");
    Ok(InstructorId::new(instructor_id))
}

/// Creates a room.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_room(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    display_name: &str,
) -> Result<RoomId, PersistenceError> {
    diesel::insert_into(rooms::table)
        .values((
            rooms::venue_id.eq(venue_id.value()),
            rooms::display_name.eq(display_name.trim()),
        ))
        .execute(conn)?;

    let room_id: i64 = get_last_insert_rowid(conn)?;
    info!(venue_id = %venue_id, room_id, "Created room");
    Ok(RoomId::new(room_id))
}
