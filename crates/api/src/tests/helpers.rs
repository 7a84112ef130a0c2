// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{NaiveDate, NaiveDateTime};
use classbook_domain::VenueId;
use classbook_persistence::Persistence;

use crate::{
    CreateResourceRequest, RecurrenceRequest, SeriesRequest, create_instructor, create_room,
};

pub const VENUE: VenueId = VenueId::new(7);
pub const OTHER_VENUE: VenueId = VenueId::new(8);

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// A venue with instructor "Ada" and room "Studio A".
pub struct TestVenue {
    pub persistence: Persistence,
    pub instructor_id: i64,
    pub room_id: i64,
}

pub fn create_test_venue() -> TestVenue {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (instructor_id, room_id) = add_venue_resources(&mut persistence, VENUE);

    TestVenue {
        persistence,
        instructor_id,
        room_id,
    }
}

/// Adds instructor "Ada" and room "Studio A" to `venue_id`, returning their ids.
pub fn add_venue_resources(persistence: &mut Persistence, venue_id: VenueId) -> (i64, i64) {
    let instructor_id: i64 = create_instructor(
        persistence,
        venue_id,
        &CreateResourceRequest {
            display_name: String::from("Ada"),
        },
    )
    .unwrap()
    .instructor_id;
    let room_id: i64 = create_room(
        persistence,
        venue_id,
        &CreateResourceRequest {
            display_name: String::from("Studio A"),
        },
    )
    .unwrap()
    .room_id;
    (instructor_id, room_id)
}

/// Evening Yoga on Monday 2025-01-06 at 18:00 for an hour, repeated weekly
/// twice. Ids are sent as loosely formatted text.
pub fn create_weekly_request(venue: &TestVenue) -> SeriesRequest {
    SeriesRequest {
        name: String::from("Evening Yoga"),
        class_type_id: Some(String::from(" 3 ")),
        instructor_id: Some(format!("#{}", venue.instructor_id)),
        room_id: Some(venue.room_id.to_string()),
        date: Some(String::from("2025-01-06")),
        start_time: Some(String::from("18:00")),
        duration_minutes: 60,
        capacity: 15,
        waitlist_capacity: 5,
        late_cancel_allowed: false,
        visible: true,
        recurrence: Some(RecurrenceRequest {
            frequency: String::from("weekly"),
            weekdays: Vec::new(),
            count: 2,
            until: None,
        }),
        editing_session_id: None,
        batch_id: None,
    }
}
