// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the persistence adapter explicitly. Handlers that
//! depend on the current time take the venue-local `now` as an argument.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use classbook::{
    AnalyticsFilters, AnalyticsReport, BatchToken, ClassDraft, CoreError, EngineConfig, MonthView,
    SeriesPlan, SubmissionReport, build_analytics, build_candidates, build_month_view,
    candidate_window, month_view_window, plan_series,
};
use classbook_domain::{
    AggregationInput, BookingRecord, ClassForm, ClassTypeId, DateRange, Frequency, InstructorId,
    Interval, IntervalOverride, Occurrence, PackageSaleRecord, PaymentRecord, RangeWindow,
    RecurrenceRule, ResourceDirectory, RoomId, VenueId, parse_custom_bound, parse_weekday_marker,
    start_of_day,
};
use classbook_persistence::{ClassSessionData, InstructorData, Persistence, RoomData};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AnalyticsRequest, CalendarRequest, CandidateInfo, CreateInstructorResponse,
    CreateResourceRequest, CreateRoomResponse, FieldErrorInfo, ListInstructorsResponse,
    ListRoomsResponse, ListSessionsRequest, ListSessionsResponse, PreviewSeriesResponse,
    RecordBookingRequest, RecordEventResponse, RecordPackageOwnershipRequest,
    RecordPaymentRequest, RecurrenceRequest, ResourceInfo, RollbackSeriesResponse, SeriesRequest,
    SessionInfo, SubmitSeriesResponse,
};

/// Format of a series start time.
const START_TIME_FORMAT: &str = "%H:%M";

/// Format of a calendar month.
const MONTH_FORMAT: &str = "%Y-%m";

// ============================================================================
// Input normalization
// ============================================================================

/// Normalizes a venue id taken from a path.
///
/// # Errors
///
/// Returns an error if the value is not a positive integer.
pub fn parse_venue_id(raw: &str) -> Result<VenueId, ApiError> {
    VenueId::parse(raw).map_err(translate_domain_error)
}

/// Generates a fresh batch token from the clock and a random nonce.
#[must_use]
pub fn new_batch_token() -> BatchToken {
    let unix_millis: i64 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0);
    BatchToken::generate(unix_millis, rand::random::<u64>())
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} must not be empty"),
        });
    }
    Ok(())
}

fn parse_recurrence(request: Option<&RecurrenceRequest>) -> Result<RecurrenceRule, ApiError> {
    let Some(request) = request else {
        return Ok(RecurrenceRule::disabled());
    };

    let frequency: Frequency = request
        .frequency
        .parse::<Frequency>()
        .map_err(translate_domain_error)?;
    let weekdays: Vec<Weekday> = request
        .weekdays
        .iter()
        .map(String::as_str)
        .map(parse_weekday_marker)
        .collect::<Result<Vec<Weekday>, _>>()
        .map_err(translate_domain_error)?;

    let mut rule: RecurrenceRule =
        RecurrenceRule::repeating(frequency, request.count).on_weekdays(weekdays);
    if let Some(until) = non_blank(request.until.as_deref()) {
        let until: NaiveDate = parse_custom_bound(until).map_err(|e| ApiError::InvalidInput {
            field: String::from("recurrence.until"),
            message: e.to_string(),
        })?;
        rule = rule.until(until);
    }
    Ok(rule)
}

/// Converts a raw series request into a class form.
///
/// Blank values become missing values, which form validation reports.
///
/// # Errors
///
/// Returns an error if a present value is malformed.
pub fn to_class_form(request: &SeriesRequest) -> Result<ClassForm, ApiError> {
    let class_type_id: Option<ClassTypeId> = non_blank(request.class_type_id.as_deref())
        .map(ClassTypeId::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let instructor_id: Option<InstructorId> = non_blank(request.instructor_id.as_deref())
        .map(InstructorId::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let room_id: Option<RoomId> = non_blank(request.room_id.as_deref())
        .map(RoomId::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let date: Option<NaiveDate> = non_blank(request.date.as_deref())
        .map(parse_custom_bound)
        .transpose()
        .map_err(translate_domain_error)?;
    let start_time: Option<NaiveTime> = non_blank(request.start_time.as_deref())
        .map(|raw| {
            NaiveTime::parse_from_str(raw, START_TIME_FORMAT).map_err(|e| {
                ApiError::InvalidInput {
                    field: String::from("start_time"),
                    message: format!("Failed to parse start time '{raw}': {e}"),
                }
            })
        })
        .transpose()?;

    Ok(ClassForm {
        name: request.name.clone(),
        class_type_id,
        instructor_id,
        room_id,
        date,
        start_time,
        duration_minutes: request.duration_minutes,
        capacity: request.capacity,
        waitlist_capacity: request.waitlist_capacity,
        late_cancel_allowed: request.late_cancel_allowed,
        visible: request.visible,
        recurrence: parse_recurrence(request.recurrence.as_ref())?,
    })
}

/// Plans a draft against the sessions it could collide with.
///
/// Sessions already created under `own_batch` are left out, so retrying a
/// half-finished submission does not conflict with itself.
fn plan_draft(
    persistence: &mut Persistence,
    draft: &ClassDraft,
    own_batch: Option<&BatchToken>,
) -> Result<SeriesPlan, ApiError> {
    let window: Option<Interval> = match build_candidates(draft) {
        Ok(candidates) => candidate_window(&candidates),
        Err(CoreError::InvalidDraft(_)) => None,
        Err(err) => return Err(translate_core_error(err)),
    };

    let existing: Vec<Occurrence> = match window {
        Some(window) => persistence
            .list_sessions_in_window(draft.venue_id, window)
            .map_err(translate_persistence_error)?
            .iter()
            .filter(|s| {
                own_batch.is_none_or(|batch| s.batch_id.as_deref() != Some(batch.as_str()))
            })
            .map(ClassSessionData::occurrence)
            .collect(),
        None => Vec::new(),
    };
    let directory: ResourceDirectory = persistence
        .resource_directory(draft.venue_id)
        .map_err(translate_persistence_error)?;

    plan_series(draft, &existing, &directory).map_err(translate_core_error)
}

fn parse_batch(raw: Option<&str>) -> Result<Option<BatchToken>, ApiError> {
    non_blank(raw)
        .map(BatchToken::parse)
        .transpose()
        .map_err(translate_core_error)
}

fn to_draft(venue_id: VenueId, request: &SeriesRequest) -> Result<ClassDraft, ApiError> {
    Ok(ClassDraft {
        venue_id,
        form: to_class_form(request)?,
        editing_occurrence_id: request.editing_session_id,
    })
}

// ============================================================================
// Instructors and rooms
// ============================================================================

/// Creates an instructor.
///
/// # Errors
///
/// Returns an error if the name is blank or the insert fails.
pub fn create_instructor(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &CreateResourceRequest,
) -> Result<CreateInstructorResponse, ApiError> {
    require_text("display_name", &request.display_name)?;
    let instructor_id: InstructorId = persistence
        .create_instructor(venue_id, &request.display_name)
        .map_err(translate_persistence_error)?;

    Ok(CreateInstructorResponse {
        venue_id: venue_id.value(),
        instructor_id: instructor_id.value(),
        display_name: request.display_name.trim().to_string(),
        message: format!("Created instructor '{}'", request.display_name.trim()),
    })
}

/// Lists the instructors of a venue.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_instructors(
    persistence: &mut Persistence,
    venue_id: VenueId,
) -> Result<ListInstructorsResponse, ApiError> {
    let instructors: Vec<InstructorData> = persistence
        .list_instructors(venue_id)
        .map_err(translate_persistence_error)?;

    Ok(ListInstructorsResponse {
        venue_id: venue_id.value(),
        instructors: instructors
            .into_iter()
            .map(|i| ResourceInfo {
                id: i.instructor_id.value(),
                display_name: i.display_name,
            })
            .collect(),
    })
}

/// Creates a room.
///
/// # Errors
///
/// Returns an error if the name is blank or the insert fails.
pub fn create_room(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &CreateResourceRequest,
) -> Result<CreateRoomResponse, ApiError> {
    require_text("display_name", &request.display_name)?;
    let room_id: RoomId = persistence
        .create_room(venue_id, &request.display_name)
        .map_err(translate_persistence_error)?;

    Ok(CreateRoomResponse {
        venue_id: venue_id.value(),
        room_id: room_id.value(),
        display_name: request.display_name.trim().to_string(),
        message: format!("Created room '{}'", request.display_name.trim()),
    })
}

/// Lists the rooms of a venue.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_rooms(
    persistence: &mut Persistence,
    venue_id: VenueId,
) -> Result<ListRoomsResponse, ApiError> {
    let rooms: Vec<RoomData> = persistence
        .list_rooms(venue_id)
        .map_err(translate_persistence_error)?;

    Ok(ListRoomsResponse {
        venue_id: venue_id.value(),
        rooms: rooms
            .into_iter()
            .map(|r| ResourceInfo {
                id: r.room_id.value(),
                display_name: r.display_name,
            })
            .collect(),
    })
}

// ============================================================================
// Sessions and series
// ============================================================================

fn to_session_info(session: ClassSessionData) -> SessionInfo {
    SessionInfo {
        session_id: session.session_id,
        class_type_id: session.class_type_id.value(),
        instructor_id: session.instructor_id.value(),
        room_id: session.room_id.map(RoomId::value),
        name: session.name,
        start: session.start,
        end: session.end,
        capacity: session.capacity,
        booked_count: session.booked_count,
        waitlist_capacity: session.waitlist_capacity,
        waitlist_count: session.waitlist_count,
        late_cancel_allowed: session.late_cancel_allowed,
        visible: session.visible,
        batch_id: session.batch_id,
    }
}

/// Lists the sessions overlapping a span of calendar dates.
///
/// # Errors
///
/// Returns an error if a date is malformed, the span is inverted, or the
/// query fails.
pub fn list_sessions(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &ListSessionsRequest,
) -> Result<ListSessionsResponse, ApiError> {
    let first: NaiveDate = parse_custom_bound(&request.start).map_err(|e| ApiError::InvalidInput {
        field: String::from("start"),
        message: e.to_string(),
    })?;
    let last: NaiveDate = parse_custom_bound(&request.end).map_err(|e| ApiError::InvalidInput {
        field: String::from("end"),
        message: e.to_string(),
    })?;
    let after_last: NaiveDate = last.succ_opt().ok_or_else(|| ApiError::InvalidInput {
        field: String::from("end"),
        message: format!("{last} is the last representable date"),
    })?;
    let window: Interval = Interval::new(start_of_day(first), start_of_day(after_last))
        .map_err(|_| ApiError::InvalidInput {
            field: String::from("end"),
            message: format!("End date {last} is before start date {first}"),
        })?;

    let sessions: Vec<ClassSessionData> = persistence
        .list_sessions_in_window(venue_id, window)
        .map_err(translate_persistence_error)?;

    Ok(ListSessionsResponse {
        venue_id: venue_id.value(),
        sessions: sessions.into_iter().map(to_session_info).collect(),
    })
}

/// Plans a series without creating anything.
///
/// Form problems are reported in the response, not as an error.
///
/// # Errors
///
/// Returns an error if a present value is malformed or a query fails.
pub fn preview_series(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &SeriesRequest,
) -> Result<PreviewSeriesResponse, ApiError> {
    let own_batch: Option<BatchToken> = parse_batch(request.batch_id.as_deref())?;
    let draft: ClassDraft = to_draft(venue_id, request)?;
    let plan: SeriesPlan = plan_draft(persistence, &draft, own_batch.as_ref())?;

    debug!(
        venue_id = %venue_id,
        candidates = plan.candidates.len(),
        findings = plan.findings.len(),
        field_errors = plan.field_errors.len(),
        "Previewed class series"
    );

    Ok(PreviewSeriesResponse {
        can_submit: plan.can_submit(),
        candidates: plan
            .candidates
            .iter()
            .enumerate()
            .map(|(sequence, c)| CandidateInfo {
                sequence,
                name: c.name.clone(),
                start: c.start,
                end: c.end,
            })
            .collect(),
        field_errors: plan
            .field_errors
            .iter()
            .map(|e| FieldErrorInfo {
                field: e.field().to_string(),
                message: e.to_string(),
            })
            .collect(),
        findings: plan.findings,
    })
}

/// Plans and submits a series, one create per session.
///
/// A request carrying a `batch_id` resubmits under that token, creating
/// only the sessions the venue is missing from the earlier attempt.
///
/// # Errors
///
/// Returns an error if the form is invalid, a blocking conflict exists, the
/// batch token is malformed, or a query fails. Individual create failures
/// are reported in the response.
pub fn submit_series(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &SeriesRequest,
) -> Result<SubmitSeriesResponse, ApiError> {
    let own_batch: Option<BatchToken> = parse_batch(request.batch_id.as_deref())?;
    let draft: ClassDraft = to_draft(venue_id, request)?;
    let plan: SeriesPlan = plan_draft(persistence, &draft, own_batch.as_ref())?;
    let batch: BatchToken = own_batch.unwrap_or_else(new_batch_token);

    let report: SubmissionReport =
        classbook::submit_series(persistence, &plan, batch).map_err(translate_core_error)?;

    let complete: bool = report.is_complete();
    let message: String = if complete {
        format!("Created {} class session(s)", report.created.len())
    } else {
        format!(
            "Created {} of {} class session(s); retry with batch_id {} or roll it back",
            report.created.len(),
            report.created.len() + report.failed.len(),
            report.batch
        )
    };

    Ok(SubmitSeriesResponse {
        batch_id: report.batch.to_string(),
        created: report.created,
        failed: report.failed,
        complete,
        message,
    })
}

/// Deletes every session a venue created under a batch token.
///
/// # Errors
///
/// Returns an error if the token is malformed, the venue created nothing
/// under it, or the delete fails.
pub fn rollback_series(
    persistence: &mut Persistence,
    venue_id: VenueId,
    batch_id: &str,
) -> Result<RollbackSeriesResponse, ApiError> {
    let batch: BatchToken = BatchToken::parse(batch_id).map_err(translate_core_error)?;
    let removed: usize =
        classbook::rollback_series(persistence, venue_id, &batch).map_err(translate_core_error)?;

    if removed == 0 {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Batch"),
            message: format!("No sessions were created under {batch} at venue {venue_id}"),
        });
    }

    Ok(RollbackSeriesResponse {
        batch_id: batch.to_string(),
        removed,
        message: format!("Removed {removed} class session(s)"),
    })
}

// ============================================================================
// Calendar and analytics
// ============================================================================

/// Builds the month view of a venue.
///
/// # Errors
///
/// Returns an error if the month is malformed or the query fails.
pub fn get_calendar(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &CalendarRequest,
    config: &EngineConfig,
    now: NaiveDateTime,
) -> Result<MonthView, ApiError> {
    let today: NaiveDate = now.date();
    let reference: NaiveDate = match non_blank(request.month.as_deref()) {
        Some(raw) => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").map_err(|e| {
            ApiError::InvalidInput {
                field: String::from("month"),
                message: format!("Expected {MONTH_FORMAT} month, got '{raw}': {e}"),
            }
        })?,
        None => today,
    };

    let window: Interval = month_view_window(reference, config.week_start);
    let occurrences: Vec<Occurrence> = persistence
        .occurrences_in_window(venue_id, window)
        .map_err(translate_persistence_error)?;

    Ok(build_month_view(
        reference,
        today,
        config.week_start,
        &occurrences,
    ))
}

/// Converts raw analytics parameters into filters.
///
/// # Errors
///
/// Returns an error if the range or interval key is unknown.
pub fn to_analytics_filters(request: &AnalyticsRequest) -> Result<AnalyticsFilters, ApiError> {
    let window: RangeWindow = non_blank(request.range.as_deref())
        .map(str::parse::<RangeWindow>)
        .transpose()
        .map_err(translate_domain_error)?
        .unwrap_or_default();
    let interval: IntervalOverride = non_blank(request.interval.as_deref())
        .map(str::parse::<IntervalOverride>)
        .transpose()
        .map_err(translate_domain_error)?
        .unwrap_or_default();

    Ok(AnalyticsFilters {
        window,
        interval,
        custom_start: request.start.clone(),
        custom_end: request.end.clone(),
    })
}

/// Builds the analytics report of a venue.
///
/// # Errors
///
/// Returns an error if a parameter is malformed or a query fails.
pub fn get_analytics(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &AnalyticsRequest,
    config: &EngineConfig,
    now: NaiveDateTime,
) -> Result<AnalyticsReport, ApiError> {
    let filters: AnalyticsFilters = to_analytics_filters(request)?;
    let range: DateRange = filters.resolve(now).map_err(translate_core_error)?;
    let window_end: NaiveDateTime = range
        .end
        .checked_add_signed(Duration::milliseconds(1))
        .unwrap_or(range.end);
    let window: Interval = Interval::from_bounds(range.start, window_end);

    let occurrences: Vec<Occurrence> = persistence
        .occurrences_in_window(venue_id, window)
        .map_err(translate_persistence_error)?;
    let bookings: Vec<BookingRecord> = persistence
        .list_bookings(venue_id)
        .map_err(translate_persistence_error)?;
    let payments: Vec<PaymentRecord> = persistence
        .list_payments(venue_id)
        .map_err(translate_persistence_error)?;
    let package_sales: Vec<PackageSaleRecord> = persistence
        .list_package_sales(venue_id)
        .map_err(translate_persistence_error)?;

    let input: AggregationInput<'_> = AggregationInput {
        occurrences: &occurrences,
        package_sales: &package_sales,
        bookings: &bookings,
        payments: &payments,
    };

    build_analytics(&filters, &input, now, config).map_err(translate_core_error)
}

// ============================================================================
// Raw events
// ============================================================================

/// Records a booking.
///
/// # Errors
///
/// Returns an error if the status or timestamp is blank, the session does
/// not exist, or the insert fails.
pub fn record_booking(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &RecordBookingRequest,
) -> Result<RecordEventResponse, ApiError> {
    require_text("status", &request.status)?;
    require_text("created_at", &request.created_at)?;

    let id: i64 = persistence
        .record_booking(
            venue_id,
            request.session_id,
            &request.status,
            &request.created_at,
        )
        .map_err(translate_persistence_error)?;

    Ok(RecordEventResponse {
        venue_id: venue_id.value(),
        id,
        message: String::from("Recorded booking"),
    })
}

/// Records a payment.
///
/// The amount is stored as given; analytics counts an unusable amount as zero.
///
/// # Errors
///
/// Returns an error if the timestamp is blank or the insert fails.
pub fn record_payment(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &RecordPaymentRequest,
) -> Result<RecordEventResponse, ApiError> {
    require_text("paid_at", &request.paid_at)?;

    let id: i64 = persistence
        .record_payment(venue_id, &request.amount, &request.paid_at)
        .map_err(translate_persistence_error)?;

    Ok(RecordEventResponse {
        venue_id: venue_id.value(),
        id,
        message: String::from("Recorded payment"),
    })
}

/// Records a package ownership.
///
/// # Errors
///
/// Returns an error if the name or timestamp is blank or the insert fails.
pub fn record_package_ownership(
    persistence: &mut Persistence,
    venue_id: VenueId,
    request: &RecordPackageOwnershipRequest,
) -> Result<RecordEventResponse, ApiError> {
    require_text("package_name", &request.package_name)?;
    require_text("purchased_at", &request.purchased_at)?;

    let id: i64 = persistence
        .record_package_ownership(venue_id, &request.package_name, &request.purchased_at)
        .map_err(translate_persistence_error)?;

    Ok(RecordEventResponse {
        venue_id: venue_id.value(),
        id,
        message: String::from("Recorded package ownership"),
    })
}
