// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::VENUE;
use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.create_instructor(VENUE, "Ada").unwrap();

    assert_eq!(db1.list_instructors(VENUE).unwrap().len(), 1);
    assert!(db2.list_instructors(VENUE).unwrap().is_empty());
}

#[test]
fn test_file_database_persists_between_opens() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "classbook_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence.create_room(VENUE, "Studio A").unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let rooms = reopened.list_rooms(VENUE).unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].display_name, "Studio A");

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
