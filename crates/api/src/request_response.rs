// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry loosely formatted text exactly as forms and query strings
//! deliver it. Handlers normalize it once into engine types.

use chrono::NaiveDateTime;
use classbook::{CreatedOccurrence, FailedOccurrence};
use classbook_domain::{ConflictFinding, MAX_RECURRENCE_COUNT};
use serde::{Deserialize, Serialize};

/// API request to create an instructor or a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResourceRequest {
    /// The name shown in calendars and conflict messages.
    pub display_name: String,
}

/// API response for a created instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInstructorResponse {
    pub venue_id: i64,
    pub instructor_id: i64,
    pub display_name: String,
    /// A success message.
    pub message: String,
}

/// API response for a created room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub venue_id: i64,
    pub room_id: i64,
    pub display_name: String,
    /// A success message.
    pub message: String,
}

/// An instructor or room in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub id: i64,
    pub display_name: String,
}

/// API response listing the instructors of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInstructorsResponse {
    pub venue_id: i64,
    pub instructors: Vec<ResourceInfo>,
}

/// API response listing the rooms of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub venue_id: i64,
    pub rooms: Vec<ResourceInfo>,
}

/// API request listing sessions between two calendar dates, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListSessionsRequest {
    /// First date (`YYYY-MM-DD`).
    pub start: String,
    /// Last date (`YYYY-MM-DD`).
    pub end: String,
}

/// A stored class session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: i64,
    pub class_type_id: i64,
    pub instructor_id: i64,
    pub room_id: Option<i64>,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub capacity: u32,
    pub booked_count: u32,
    pub waitlist_capacity: u32,
    pub waitlist_count: u32,
    pub late_cancel_allowed: bool,
    pub visible: bool,
    pub batch_id: Option<String>,
}

/// API response listing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSessionsResponse {
    pub venue_id: i64,
    pub sessions: Vec<SessionInfo>,
}

/// The recurrence part of a series request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRequest {
    /// `DAILY`, `WEEKLY` or `MONTHLY`, any case.
    pub frequency: String,
    /// Weekday markers (`MO`..`SU`) for weekly repetition.
    #[serde(default)]
    pub weekdays: Vec<String>,
    /// Additional sessions after the first.
    #[serde(default = "default_recurrence_count")]
    pub count: u8,
    /// Last date a session may fall on (`YYYY-MM-DD`).
    #[serde(default)]
    pub until: Option<String>,
}

const fn default_recurrence_count() -> u8 {
    MAX_RECURRENCE_COUNT
}

const fn default_visible() -> bool {
    true
}

/// API request to preview or submit a class series.
///
/// Identifiers, dates and times are raw text; a blank value counts as
/// missing and is reported as a field error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class_type_id: Option<String>,
    #[serde(default)]
    pub instructor_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    /// Date of the first session (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
    /// Start time (`HH:MM`).
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub waitlist_capacity: u32,
    #[serde(default)]
    pub late_cancel_allowed: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Absent means a single session.
    #[serde(default)]
    pub recurrence: Option<RecurrenceRequest>,
    /// A session being edited, excluded from conflict checks.
    #[serde(default)]
    pub editing_session_id: Option<i64>,
    /// An earlier batch token. Its sessions are not treated as conflicts,
    /// and submission resubmits under it.
    #[serde(default)]
    pub batch_id: Option<String>,
}

/// One candidate session of a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
    /// Position in the series (0 is the first session).
    pub sequence: usize,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One form problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorInfo {
    pub field: String,
    pub message: String,
}

/// API response for a series preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSeriesResponse {
    pub candidates: Vec<CandidateInfo>,
    pub findings: Vec<ConflictFinding>,
    pub field_errors: Vec<FieldErrorInfo>,
    /// Whether submitting this request would be accepted.
    pub can_submit: bool,
}

/// API response for a series submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitSeriesResponse {
    /// The token to retry or roll back this submission with.
    pub batch_id: String,
    pub created: Vec<CreatedOccurrence>,
    pub failed: Vec<FailedOccurrence>,
    /// Whether every session was created.
    pub complete: bool,
    /// A summary message.
    pub message: String,
}

/// API response for a batch rollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackSeriesResponse {
    pub batch_id: String,
    pub removed: usize,
    /// A summary message.
    pub message: String,
}

/// API request for a month view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarRequest {
    /// The month (`YYYY-MM`). Absent means the current month.
    #[serde(default)]
    pub month: Option<String>,
}

/// API request for analytics. Absent values take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    /// Window key, `last_30_days` by default.
    #[serde(default)]
    pub range: Option<String>,
    /// Interval key, `auto` by default.
    #[serde(default)]
    pub interval: Option<String>,
    /// Custom start date (`YYYY-MM-DD`).
    #[serde(default)]
    pub start: Option<String>,
    /// Custom end date (`YYYY-MM-DD`).
    #[serde(default)]
    pub end: Option<String>,
}

/// API request to record a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBookingRequest {
    #[serde(default)]
    pub session_id: Option<i64>,
    pub status: String,
    pub created_at: String,
}

/// API request to record a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// Decimal amount as text.
    pub amount: String,
    pub paid_at: String,
}

/// API request to record a package ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPackageOwnershipRequest {
    pub package_name: String,
    pub purchased_at: String,
}

/// API response for a recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEventResponse {
    pub venue_id: i64,
    /// The id of the stored row.
    pub id: i64,
    /// A success message.
    pub message: String,
}
