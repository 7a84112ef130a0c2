// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Instructor and room queries.

use classbook_domain::{InstructorId, RoomId, VenueId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{InstructorData, RoomData};
use crate::diesel_schema::{instructors, rooms};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = instructors)]
struct InstructorRow {
    instructor_id: i64,
    venue_id: i64,
    display_name: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = rooms)]
struct RoomRow {
    room_id: i64,
    venue_id: i64,
    display_name: String,
}

/// Lists the instructors of a venue in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_instructors(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
) -> Result<Vec<InstructorData>, PersistenceError> {
    let rows: Vec<InstructorRow> = instructors::table
        .filter(instructors::venue_id.eq(venue_id.value()))
        .order(instructors::instructor_id.asc())
        .select(InstructorRow::as_select())
        .load(conn)?;

    debug!(venue_id = %venue_id, count = rows.len(), "Loaded instructors");

    Ok(rows
        .into_iter()
        .map(|row| InstructorData {
            instructor_id: InstructorId::new(row.instructor_id),
            venue_id: VenueId::new(row.venue_id),
            display_name: row.display_name,
        })
        .collect())
}

/// Lists the rooms of a venue in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rooms(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
) -> Result<Vec<RoomData>, PersistenceError> {
    let rows: Vec<RoomRow> = rooms::table
        .filter(rooms::venue_id.eq(venue_id.value()))
        .order(rooms::room_id.asc())
        .select(RoomRow::as_select())
        .load(conn)?;

    debug!(venue_id = %venue_id, count = rows.len(), "Loaded rooms");

    Ok(rows
        .into_iter()
        .map(|row| RoomData {
            room_id: RoomId::new(row.room_id),
            venue_id: VenueId::new(row.venue_id),
            display_name: row.display_name,
        })
        .collect())
}
