// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::overlap::Interval;
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Declares a canonical numeric identifier newtype.
///
/// Raw identifiers arrive from forms and query strings as loosely formatted
/// text. They are normalized exactly once, at the boundary, so that every
/// lookup inside the engine compares canonical values.
macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps an already canonical identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the canonical numeric value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }

            /// Normalizes a raw identifier (surrounding whitespace, leading `#`).
            ///
            /// # Errors
            ///
            /// Returns an error if the value is not a positive integer.
            pub fn parse(raw: &str) -> Result<Self, DomainError> {
                let trimmed: &str = raw.trim().trim_start_matches('#');
                match trimmed.parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(DomainError::InvalidIdentifier {
                        kind: $kind,
                        value: raw.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

canonical_id!(
    /// Canonical venue identifier.
    VenueId,
    "venue"
);
canonical_id!(
    /// Canonical instructor identifier.
    InstructorId,
    "instructor"
);
canonical_id!(
    /// Canonical room identifier.
    RoomId,
    "room"
);
canonical_id!(
    /// Canonical class type identifier.
    ClassTypeId,
    "class type"
);

/// The first day of the week in calendar views and week buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeekStart {
    /// ISO weeks.
    #[default]
    Monday,
    /// US-style weeks.
    Sunday,
}

impl WeekStart {
    /// Returns the weekday that opens a week.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }

    /// Number of days between the start of the week and `day` (0-6).
    #[must_use]
    pub fn days_into_week(self, day: Weekday) -> u32 {
        let start: u32 = self.weekday().num_days_from_monday();
        (day.num_days_from_monday() + 7 - start) % 7
    }

    /// Converts this convention to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Sunday => "sunday",
        }
    }
}

impl FromStr for WeekStart {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(DomainError::UnknownWeekStart(s.to_string())),
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted class session, as returned by the session store.
///
/// Occurrences are read-only snapshots; the store owns the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// The store-assigned identifier.
    pub occurrence_id: i64,
    /// Display name of the class.
    pub name: String,
    /// The instructor teaching the class.
    pub instructor_id: InstructorId,
    /// The room the class is held in, if any.
    pub room_id: Option<RoomId>,
    /// Start instant (venue-local wall clock).
    pub start: NaiveDateTime,
    /// End instant (venue-local wall clock).
    pub end: NaiveDateTime,
    /// Seats available.
    pub capacity: u32,
    /// Seats booked.
    pub booked_count: u32,
    /// Consumers waiting for a seat.
    pub waitlist_count: u32,
}

impl Occurrence {
    /// The half-open time span of this occurrence.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        Interval::from_bounds(self.start, self.end)
    }
}

/// A candidate class session that has not been persisted yet.
///
/// This is the payload of one create call toward the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOccurrence {
    /// The venue hosting the class.
    pub venue_id: VenueId,
    /// The class type.
    pub class_type_id: ClassTypeId,
    /// The instructor teaching the class.
    pub instructor_id: InstructorId,
    /// The room, if any.
    pub room_id: Option<RoomId>,
    /// Display name of the class.
    pub name: String,
    /// Start instant (venue-local wall clock).
    pub start: NaiveDateTime,
    /// End instant (venue-local wall clock).
    pub end: NaiveDateTime,
    /// Seats available.
    pub capacity: u32,
    /// Seats booked. Always zero for a new session.
    pub booked_count: u32,
    /// Maximum waitlist length.
    pub waitlist_capacity: u32,
    /// Whether consumers may cancel late without penalty.
    pub late_cancel_allowed: bool,
    /// Whether consumers can see and book the class.
    pub visible: bool,
}

impl NewOccurrence {
    /// The half-open time span of this candidate.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        Interval::from_bounds(self.start, self.end)
    }
}

/// Display names for instructors and rooms, keyed by canonical id.
///
/// Built once per request from the store's reference lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDirectory {
    instructors: HashMap<InstructorId, String>,
    rooms: HashMap<RoomId, String>,
}

impl ResourceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from reference lists.
    pub fn from_lists<I, R>(instructors: I, rooms: R) -> Self
    where
        I: IntoIterator<Item = (InstructorId, String)>,
        R: IntoIterator<Item = (RoomId, String)>,
    {
        Self {
            instructors: instructors.into_iter().collect(),
            rooms: rooms.into_iter().collect(),
        }
    }

    /// Registers an instructor display name.
    pub fn insert_instructor(&mut self, id: InstructorId, name: impl Into<String>) {
        self.instructors.insert(id, name.into());
    }

    /// Registers a room display name.
    pub fn insert_room(&mut self, id: RoomId, name: impl Into<String>) {
        self.rooms.insert(id, name.into());
    }

    /// Display name for an instructor, falling back to its id.
    #[must_use]
    pub fn instructor_name(&self, id: InstructorId) -> String {
        self.instructors
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Instructor #{id}"))
    }

    /// Display name for a room, falling back to its id.
    #[must_use]
    pub fn room_name(&self, id: RoomId) -> String {
        self.rooms
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Room #{id}"))
    }
}
