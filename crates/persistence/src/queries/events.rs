// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw booking, payment and package ownership queries.
//!
//! Timestamps and amounts are returned as stored. Interpreting them is the
//! aggregator's job, so a malformed value reaches it and is counted there.

use classbook_domain::{BookingRecord, PackageSaleRecord, PaymentRecord, VenueId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{bookings, package_ownerships, payments};
use crate::error::PersistenceError;

/// Lists every booking of a venue.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
) -> Result<Vec<BookingRecord>, PersistenceError> {
    let rows: Vec<(String, String)> = bookings::table
        .filter(bookings::venue_id.eq(venue_id.value()))
        .order(bookings::booking_id.asc())
        .select((bookings::status, bookings::created_at))
        .load(conn)?;

    debug!(venue_id = %venue_id, count = rows.len(), "Loaded bookings");

    Ok(rows
        .into_iter()
        .map(|(status, created_at)| BookingRecord { status, created_at })
        .collect())
}

/// Lists every payment of a venue.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_payments(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
) -> Result<Vec<PaymentRecord>, PersistenceError> {
    let rows: Vec<(String, String)> = payments::table
        .filter(payments::venue_id.eq(venue_id.value()))
        .order(payments::payment_id.asc())
        .select((payments::amount, payments::paid_at))
        .load(conn)?;

    debug!(venue_id = %venue_id, count = rows.len(), "Loaded payments");

    Ok(rows
        .into_iter()
        .map(|(amount, paid_at)| PaymentRecord { amount, paid_at })
        .collect())
}

/// Lists every package ownership of a venue.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_package_sales(
    conn: &mut SqliteConnection,
    venue_id: VenueId,
) -> Result<Vec<PackageSaleRecord>, PersistenceError> {
    let rows: Vec<String> = package_ownerships::table
        .filter(package_ownerships::venue_id.eq(venue_id.value()))
        .order(package_ownerships::ownership_id.asc())
        .select(package_ownerships::purchased_at)
        .load(conn)?;

    debug!(venue_id = %venue_id, count = rows.len(), "Loaded package ownerships");

    Ok(rows
        .into_iter()
        .map(|purchased_at| PackageSaleRecord { purchased_at })
        .collect())
}
