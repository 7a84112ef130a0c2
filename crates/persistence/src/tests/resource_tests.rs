// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{OTHER_VENUE, VENUE, create_test_persistence};
use crate::{InstructorData, Persistence, RoomData};
use classbook_domain::{InstructorId, ResourceDirectory, RoomId};

#[test]
fn test_create_instructor_trims_name() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let id: InstructorId = persistence.create_instructor(VENUE, "  Grace  ").unwrap();

    let instructors: Vec<InstructorData> = persistence.list_instructors(VENUE).unwrap();
    assert_eq!(instructors.len(), 1);
    assert_eq!(instructors[0].instructor_id, id);
    assert_eq!(instructors[0].venue_id, VENUE);
    assert_eq!(instructors[0].display_name, "Grace");
}

#[test]
fn test_resources_are_scoped_to_venue() {
    let (mut persistence, _, _) = create_test_persistence();
    persistence.create_instructor(OTHER_VENUE, "Linus").unwrap();
    persistence.create_room(OTHER_VENUE, "Annex").unwrap();

    let rooms: Vec<RoomData> = persistence.list_rooms(VENUE).unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].display_name, "Studio A");

    let other: Vec<InstructorData> = persistence.list_instructors(OTHER_VENUE).unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].display_name, "Linus");
}

#[test]
fn test_list_returns_creation_order() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.create_room(VENUE, "Studio B").unwrap();
    persistence.create_room(VENUE, "Studio A").unwrap();

    let names: Vec<String> = persistence
        .list_rooms(VENUE)
        .unwrap()
        .into_iter()
        .map(|r| r.display_name)
        .collect();
    assert_eq!(names, vec!["Studio B", "Studio A"]);
}

#[test]
fn test_resource_directory_names_known_ids() {
    let (mut persistence, instructor, room) = create_test_persistence();

    let directory: ResourceDirectory = persistence.resource_directory(VENUE).unwrap();
    assert_eq!(directory.instructor_name(instructor), "Ada");
    assert_eq!(directory.room_name(room), "Studio A");
    assert_eq!(directory.room_name(RoomId::new(999)), "Room #999");
}
