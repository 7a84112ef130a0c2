// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Classbook.
//!
//! Stores instructors, rooms, class sessions and the raw booking, payment
//! and package ownership events that analytics reads. Built on Diesel over
//! `SQLite`.
//!
//! ## Session times
//!
//! Session start and end are venue-local wall-clock times stored as
//! fixed-width text, so window queries compare them directly in SQL.
//!
//! ## Raw events
//!
//! Event timestamps and amounts are stored verbatim. A malformed value is
//! kept and later counted as skipped by the aggregator.
//!
//! ## Testing
//!
//! Every `new_in_memory()` call opens its own shared-cache in-memory
//! database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use classbook::{BatchToken, OccurrenceStore};
use classbook_domain::{
    BookingRecord, InstructorId, Interval, NewOccurrence, Occurrence, PackageSaleRecord,
    PaymentRecord, ResourceDirectory, RoomId, VenueId,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    ClassSessionData, InstructorData, RoomData, STORED_TIMESTAMP_FORMAT, format_stored_timestamp,
    parse_stored_timestamp,
};
pub use error::PersistenceError;

/// The persistence adapter.
///
/// Owns one `SQLite` connection. Callers sharing it across tasks wrap it
/// in a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_classbook_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file, creating it if
    /// needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Instructors and rooms
    // ========================================================================

    /// Creates an instructor.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_instructor(
        &mut self,
        venue_id: VenueId,
        display_name: &str,
    ) -> Result<InstructorId, PersistenceError> {
        mutations::resources::create_instructor(&mut self.conn, venue_id, display_name)
    }

    /// Lists the instructors of a venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_instructors(
        &mut self,
        venue_id: VenueId,
    ) -> Result<Vec<InstructorData>, PersistenceError> {
        queries::resources::list_instructors(&mut self.conn, venue_id)
    }

    /// Creates a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_room(
        &mut self,
        venue_id: VenueId,
        display_name: &str,
    ) -> Result<RoomId, PersistenceError> {
        mutations::resources::create_room(&mut self.conn, venue_id, display_name)
    }

    /// Lists the rooms of a venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&mut self, venue_id: VenueId) -> Result<Vec<RoomData>, PersistenceError> {
        queries::resources::list_rooms(&mut self.conn, venue_id)
    }

    /// Builds the display-name directory of a venue.
    ///
    /// # Errors
    ///
    /// Returns an error if either list cannot be loaded.
    pub fn resource_directory(
        &mut self,
        venue_id: VenueId,
    ) -> Result<ResourceDirectory, PersistenceError> {
        let instructors: Vec<InstructorData> = self.list_instructors(venue_id)?;
        let rooms: Vec<RoomData> = self.list_rooms(venue_id)?;
        Ok(ResourceDirectory::from_lists(
            instructors
                .into_iter()
                .map(|i| (i.instructor_id, i.display_name)),
            rooms.into_iter().map(|r| (r.room_id, r.display_name)),
        ))
    }

    // ========================================================================
    // Class sessions
    // ========================================================================

    /// Lists the sessions of a venue overlapping `window`, ordered by start.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_sessions_in_window(
        &mut self,
        venue_id: VenueId,
        window: Interval,
    ) -> Result<Vec<ClassSessionData>, PersistenceError> {
        queries::sessions::list_sessions_in_window(&mut self.conn, venue_id, window)
    }

    /// Same as [`Self::list_sessions_in_window`], as engine snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn occurrences_in_window(
        &mut self,
        venue_id: VenueId,
        window: Interval,
    ) -> Result<Vec<Occurrence>, PersistenceError> {
        Ok(self
            .list_sessions_in_window(venue_id, window)?
            .iter()
            .map(ClassSessionData::occurrence)
            .collect())
    }

    /// Retrieves one session.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_session(
        &mut self,
        session_id: i64,
    ) -> Result<Option<ClassSessionData>, PersistenceError> {
        queries::sessions::get_session(&mut self.conn, session_id)
    }

    /// Counts the sessions a venue created under a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_batch_sessions(
        &mut self,
        venue_id: VenueId,
        batch: &BatchToken,
    ) -> Result<i64, PersistenceError> {
        queries::sessions::count_batch_sessions(&mut self.conn, venue_id, batch.as_str())
    }

    // ========================================================================
    // Raw events
    // ========================================================================

    /// Records a booking, updating the session's counters when attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the session does not exist.
    pub fn record_booking(
        &mut self,
        venue_id: VenueId,
        session_id: Option<i64>,
        status: &str,
        created_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::events::record_booking(&mut self.conn, venue_id, session_id, status, created_at)
    }

    /// Lists the raw bookings of a venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(
        &mut self,
        venue_id: VenueId,
    ) -> Result<Vec<BookingRecord>, PersistenceError> {
        queries::events::list_bookings(&mut self.conn, venue_id)
    }

    /// Records a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_payment(
        &mut self,
        venue_id: VenueId,
        amount: &str,
        paid_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::events::record_payment(&mut self.conn, venue_id, amount, paid_at)
    }

    /// Lists the raw payments of a venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payments(
        &mut self,
        venue_id: VenueId,
    ) -> Result<Vec<PaymentRecord>, PersistenceError> {
        queries::events::list_payments(&mut self.conn, venue_id)
    }

    /// Records a package ownership.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_package_ownership(
        &mut self,
        venue_id: VenueId,
        package_name: &str,
        purchased_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::events::record_package_ownership(
            &mut self.conn,
            venue_id,
            package_name,
            purchased_at,
        )
    }

    /// Lists the raw package ownerships of a venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_package_sales(
        &mut self,
        venue_id: VenueId,
    ) -> Result<Vec<PackageSaleRecord>, PersistenceError> {
        queries::events::list_package_sales(&mut self.conn, venue_id)
    }
}

impl OccurrenceStore for Persistence {
    type Error = PersistenceError;

    fn create_occurrence(
        &mut self,
        batch: &BatchToken,
        sequence: u32,
        occurrence: &NewOccurrence,
    ) -> Result<i64, Self::Error> {
        mutations::sessions::create_session_in_batch(
            &mut self.conn,
            batch.as_str(),
            sequence,
            occurrence,
        )
    }

    fn delete_batch(
        &mut self,
        venue_id: VenueId,
        batch: &BatchToken,
    ) -> Result<usize, Self::Error> {
        mutations::sessions::delete_batch(&mut self.conn, venue_id, batch.as_str())
    }
}
