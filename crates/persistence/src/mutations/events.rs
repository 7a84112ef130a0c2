// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking, payment and package ownership mutations.
//!
//! Timestamps and amounts are stored exactly as received.

use classbook_domain::{BookingStatus, VenueId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{bookings, class_sessions, package_ownerships, payments};
use crate::error::PersistenceError;

/// Records a booking.
///
/// A booking attached to a session also moves the session's counters:
/// seat-holding statuses add to `booked_count`, waitlisted bookings add to
/// `waitlist_count`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `venue_id` - The venue
/// * `session_id` - The booked session, if known
/// * `status` - Raw status text
/// * `created_at` - Raw creation timestamp
///
/// # Errors
///
/// Returns an error if the insert fails, including when the session does
/// not exist.
pub fn record_booking(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    session_id: Option<i64>,
    status: &str,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let parsed: BookingStatus = match status.parse::<BookingStatus>() {
        Ok(parsed) => parsed,
        Err(never) => match never {},
    };

    conn.transaction::<i64, PersistenceError, _>(|tx| {
        diesel::insert_into(bookings::table)
            .values((
                bookings::venue_id.eq(venue_id.value()),
                bookings::session_id.eq(session_id),
                bookings::status.eq(status.trim()),
                bookings::created_at.eq(created_at),
            ))
            .execute(tx)?;
        let booking_id: i64 = get_last_insert_rowid(tx)?;

        if let Some(session_id) = session_id {
            let target = class_sessions::table.filter(class_sessions::session_id.eq(session_id));
            match parsed {
                BookingStatus::Confirmed | BookingStatus::Attended | BookingStatus::NoShow => {
                    diesel::update(target)
                        .set(class_sessions::booked_count.eq(class_sessions::booked_count + 1))
                        .execute(tx)?;
                }
                BookingStatus::Waitlisted => {
                    diesel::update(target)
                        .set(class_sessions::waitlist_count.eq(class_sessions::waitlist_count + 1))
                        .execute(tx)?;
                }
                _ => {}
            }
        }

        info!(venue_id = %venue_id, booking_id, status = %parsed, "Recorded booking");
        Ok(booking_id)
    })
}

/// Records a payment.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn record_payment(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    amount: &str,
    paid_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(payments::table)
        .values((
            payments::venue_id.eq(venue_id.value()),
            payments::amount.eq(amount),
            payments::paid_at.eq(paid_at),
        ))
        .execute(conn)?;

    let payment_id: i64 = get_last_insert_rowid(conn)?;
    info!(venue_id = %venue_id, payment_id, "Recorded payment");
    Ok(payment_id)
}

/// Records a package ownership.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn record_package_ownership(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
    package_name: &str,
    purchased_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(package_ownerships::table)
        .values((
            package_ownerships::venue_id.eq(venue_id.value()),
            package_ownerships::package_name.eq(package_name.trim()),
            package_ownerships::purchased_at.eq(purchased_at),
        ))
        .execute(conn)?;

    let ownership_id: i64 = get_last_insert_rowid(conn)?;
    info!(venue_id = %venue_id, ownership_id, "Recorded package ownership");
    Ok(ownership_id)
}
