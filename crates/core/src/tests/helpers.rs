// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BatchToken, ClassDraft, OccurrenceStore};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use classbook_domain::{
    ClassForm, ClassTypeId, InstructorId, NewOccurrence, Occurrence, RecurrenceRule,
    ResourceDirectory, RoomId, VenueId,
};
use std::collections::{HashMap, HashSet};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

pub fn create_test_form() -> ClassForm {
    ClassForm {
        name: String::from("Morning Flow"),
        class_type_id: Some(ClassTypeId::new(1)),
        instructor_id: Some(InstructorId::new(1)),
        room_id: Some(RoomId::new(1)),
        date: Some(date(2025, 1, 6)),
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        duration_minutes: 45,
        capacity: 12,
        waitlist_capacity: 4,
        late_cancel_allowed: true,
        visible: true,
        recurrence: RecurrenceRule::disabled(),
    }
}

pub fn create_test_draft(form: ClassForm) -> ClassDraft {
    ClassDraft {
        venue_id: VenueId::new(1),
        form,
        editing_occurrence_id: None,
    }
}

pub fn create_test_directory() -> ResourceDirectory {
    let mut directory: ResourceDirectory = ResourceDirectory::new();
    directory.insert_instructor(InstructorId::new(1), "Ada");
    directory.insert_instructor(InstructorId::new(2), "Grace");
    directory.insert_room(RoomId::new(1), "Studio A");
    directory.insert_room(RoomId::new(2), "Studio B");
    directory
}

pub fn create_existing(
    occurrence_id: i64,
    instructor: i64,
    room: Option<i64>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Occurrence {
    Occurrence {
        occurrence_id,
        name: String::from("Barre"),
        instructor_id: InstructorId::new(instructor),
        room_id: room.map(RoomId::new),
        start,
        end,
        capacity: 10,
        booked_count: 6,
        waitlist_count: 0,
    }
}

/// An in-memory session store that can be told to refuse sequences.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub next_id: i64,
    pub rows: HashMap<(VenueId, String, u32), (i64, NewOccurrence)>,
    pub failing_sequences: HashSet<u32>,
    pub create_calls: usize,
}

impl MemoryStore {
    pub fn failing_on(sequences: &[u32]) -> Self {
        Self {
            failing_sequences: sequences.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl OccurrenceStore for MemoryStore {
    type Error = String;

    fn create_occurrence(
        &mut self,
        batch: &BatchToken,
        sequence: u32,
        occurrence: &NewOccurrence,
    ) -> Result<i64, Self::Error> {
        self.create_calls += 1;
        if self.failing_sequences.contains(&sequence) {
            return Err(format!("store refused sequence {sequence}"));
        }
        let key: (VenueId, String, u32) =
            (occurrence.venue_id, batch.as_str().to_string(), sequence);
        if let Some((id, _)) = self.rows.get(&key) {
            return Ok(*id);
        }
        self.next_id += 1;
        self.rows.insert(key, (self.next_id, occurrence.clone()));
        Ok(self.next_id)
    }

    fn delete_batch(
        &mut self,
        venue_id: VenueId,
        batch: &BatchToken,
    ) -> Result<usize, Self::Error> {
        let before: usize = self.rows.len();
        self.rows
            .retain(|(venue, token, _), _| *venue != venue_id || token != batch.as_str());
        Ok(before - self.rows.len())
    }
}
