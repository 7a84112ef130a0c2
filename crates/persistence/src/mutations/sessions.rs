// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class session mutations.
//!
//! Sessions created by a series submission carry `(batch_id, batch_seq)`.
//! The pair is unique within a venue, so creating the same slot twice
//! returns the first session instead of inserting a duplicate. Another
//! venue reusing the token gets its own sessions.

use classbook_domain::{NewOccurrence, RoomId, VenueId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::format_stored_timestamp;
use crate::diesel_schema::class_sessions;
use crate::error::PersistenceError;
use crate::queries::sessions::find_batch_slot;

fn to_column(name: &str, value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::SerializationError(format!("{name} too large: {value}")))
}

/// Creates the session for one batch slot, or returns the existing one.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `batch_id` - The submission's batch token
/// * `batch_seq` - The candidate's position in the series
/// * `occurrence` - The session to create
///
/// # Errors
///
/// Returns an error if the insert fails, including when the instructor or
/// room does not exist.
pub fn create_session_in_batch(
    conn: &mut SqliteConnection,
    batch_id: &str,
    batch_seq: u32,
    occurrence: &NewOccurrence,
) -> Result<i64, PersistenceError> {
    let seq: i32 = to_column("batch_seq", batch_seq)?;

    conn.transaction::<i64, PersistenceError, _>(|tx| {
        if let Some(session_id) = find_batch_slot(tx, occurrence.venue_id, batch_id, seq)? {
            debug!(batch_id, batch_seq, session_id, "Batch slot already created");
            return Ok(session_id);
        }

        diesel::insert_into(class_sessions::table)
            .values((
                class_sessions::venue_id.eq(occurrence.venue_id.value()),
                class_sessions::class_type_id.eq(occurrence.class_type_id.value()),
                class_sessions::instructor_id.eq(occurrence.instructor_id.value()),
                class_sessions::room_id.eq(occurrence.room_id.map(RoomId::value)),
                class_sessions::name.eq(&occurrence.name),
                class_sessions::starts_at.eq(format_stored_timestamp(occurrence.start)),
                class_sessions::ends_at.eq(format_stored_timestamp(occurrence.end)),
                class_sessions::capacity.eq(to_column("capacity", occurrence.capacity)?),
                class_sessions::booked_count.eq(to_column("booked_count", occurrence.booked_count)?),
                class_sessions::waitlist_capacity
                    .eq(to_column("waitlist_capacity", occurrence.waitlist_capacity)?),
                class_sessions::late_cancel_allowed.eq(i32::from(occurrence.late_cancel_allowed)),
                class_sessions::visible.eq(i32::from(occurrence.visible)),
                class_sessions::batch_id.eq(Some(batch_id)),
                class_sessions::batch_seq.eq(Some(seq)),
            ))
            .execute(tx)?;

        let session_id: i64 = get_last_insert_rowid(tx)?;
        info!(
            venue_id = %occurrence.venue_id,
            batch_id,
            batch_seq,
            session_id,
            start = %occurrence.start,
            "Created class session"
        );
        Ok(session_id)
    })
}

/// Deletes every session a venue created under a batch.
///
/// Bookings on deleted sessions keep their history with no session.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_batch(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    batch_id: &str,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(
        class_sessions::table
            .filter(class_sessions::venue_id.eq(venue_id.value()))
            .filter(class_sessions::batch_id.eq(batch_id)),
    )
    .execute(conn)?;
    info!(venue_id = %venue_id, batch_id, removed, "Deleted class sessions of batch");
    Ok(removed)
}
