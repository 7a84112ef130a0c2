// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Classbook.
//!
//! Handlers accept loosely typed request DTOs, normalize them into engine
//! types once, call into the engine and persistence, and translate every
//! lower-layer error into an [`ApiError`].

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_field_errors,
    translate_persistence_error,
};
pub use handlers::{
    create_instructor, create_room, get_analytics, get_calendar, list_instructors, list_rooms,
    list_sessions, new_batch_token, parse_venue_id, preview_series, record_booking,
    record_package_ownership, record_payment, rollback_series, submit_series,
    to_analytics_filters, to_class_form,
};
pub use request_response::{
    AnalyticsRequest, CalendarRequest, CandidateInfo, CreateInstructorResponse,
    CreateResourceRequest, CreateRoomResponse, FieldErrorInfo, ListInstructorsResponse,
    ListRoomsResponse, ListSessionsRequest, ListSessionsResponse, PreviewSeriesResponse,
    RecordBookingRequest, RecordEventResponse, RecordPackageOwnershipRequest,
    RecordPaymentRequest, RecurrenceRequest, ResourceInfo, RollbackSeriesResponse, SeriesRequest,
    SessionInfo, SubmitSeriesResponse,
};
