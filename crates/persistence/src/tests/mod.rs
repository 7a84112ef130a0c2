// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod resource_tests;

use crate::Persistence;
use chrono::{NaiveDate, NaiveDateTime};
use classbook_domain::{ClassTypeId, InstructorId, NewOccurrence, RoomId, VenueId};

pub const VENUE: VenueId = VenueId::new(1);
pub const OTHER_VENUE: VenueId = VenueId::new(2);

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// A database with one instructor ("Ada") and one room ("Studio A") at [`VENUE`].
pub fn create_test_persistence() -> (Persistence, InstructorId, RoomId) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let instructor: InstructorId = persistence.create_instructor(VENUE, "Ada").unwrap();
    let room: RoomId = persistence.create_room(VENUE, "Studio A").unwrap();
    (persistence, instructor, room)
}

pub fn create_test_occurrence(
    instructor: InstructorId,
    room: Option<RoomId>,
    start: NaiveDateTime,
    minutes: i64,
) -> NewOccurrence {
    NewOccurrence {
        venue_id: VENUE,
        class_type_id: ClassTypeId::new(3),
        instructor_id: instructor,
        room_id: room,
        name: String::from("Morning Flow"),
        start,
        end: start + chrono::Duration::minutes(minutes),
        capacity: 12,
        booked_count: 0,
        waitlist_capacity: 4,
        late_cancel_allowed: true,
        visible: true,
    }
}
