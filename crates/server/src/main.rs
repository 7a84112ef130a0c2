// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::{NaiveDateTime, Utc};
use clap::Parser;
use classbook::{AnalyticsReport, EngineConfig, MonthView};
use classbook_api::{
    AnalyticsRequest, ApiError, CalendarRequest, CreateInstructorResponse, CreateResourceRequest,
    CreateRoomResponse, ListInstructorsResponse, ListRoomsResponse, ListSessionsRequest,
    ListSessionsResponse, PreviewSeriesResponse, RecordBookingRequest, RecordEventResponse,
    RecordPackageOwnershipRequest, RecordPaymentRequest, RollbackSeriesResponse, SeriesRequest,
    SubmitSeriesResponse, create_instructor, create_room, get_analytics, get_calendar,
    list_instructors, list_rooms, list_sessions, parse_venue_id, preview_series, record_booking,
    record_package_ownership, record_payment, rollback_series, submit_series,
};
use classbook_domain::{DomainError, VenueId, WeekStart};
use classbook_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Classbook Server - HTTP server for class scheduling and venue analytics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone of the venue
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// Seats assumed per class when sessions carry no capacity
    #[arg(long, default_value_t = 20)]
    assumed_class_capacity: u32,

    /// Desired number of chart axis intervals
    #[arg(long, default_value_t = 5)]
    axis_ticks: u32,

    /// First day of the week (monday or sunday)
    #[arg(long, default_value = "monday")]
    week_start: String,
}

impl Args {
    /// Builds the engine configuration from the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone or week start is unknown.
    fn engine_config(&self) -> Result<EngineConfig, DomainError> {
        Ok(EngineConfig {
            timezone: EngineConfig::parse_timezone(&self.timezone)?,
            week_start: self.week_start.parse::<WeekStart>()?,
            assumed_class_capacity: self.assumed_class_capacity,
            axis_tick_count: self.axis_ticks,
        })
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for resources, sessions and raw events.
    persistence: Arc<Mutex<Persistence>>,
    /// Venue settings.
    config: EngineConfig,
}

impl AppState {
    /// The current venue-local time.
    fn now(&self) -> NaiveDateTime {
        self.config.local_time(Utc::now())
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses the venue segment of a route.
fn venue_from_path(raw: &str) -> Result<VenueId, HttpError> {
    parse_venue_id(raw).map_err(HttpError::from)
}

/// Handler for POST `/venues/{venue_id}/instructors` endpoint.
async fn handle_create_instructor(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<CreateResourceRequest>,
) -> Result<Json<CreateInstructorResponse>, HttpError> {
    info!(venue_id = %venue_id, "Handling create_instructor request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateInstructorResponse = create_instructor(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/venues/{venue_id}/instructors` endpoint.
async fn handle_list_instructors(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
) -> Result<Json<ListInstructorsResponse>, HttpError> {
    info!(venue_id = %venue_id, "Handling list_instructors request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListInstructorsResponse = list_instructors(&mut persistence, venue_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/venues/{venue_id}/rooms` endpoint.
async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<CreateResourceRequest>,
) -> Result<Json<CreateRoomResponse>, HttpError> {
    info!(venue_id = %venue_id, "Handling create_room request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateRoomResponse = create_room(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/venues/{venue_id}/rooms` endpoint.
async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
) -> Result<Json<ListRoomsResponse>, HttpError> {
    info!(venue_id = %venue_id, "Handling list_rooms request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListRoomsResponse = list_rooms(&mut persistence, venue_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/venues/{venue_id}/sessions` endpoint.
///
/// Lists sessions between two inclusive dates.
async fn handle_list_sessions(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Query(query): Query<ListSessionsRequest>,
) -> Result<Json<ListSessionsResponse>, HttpError> {
    info!(
        venue_id = %venue_id,
        start = %query.start,
        end = %query.end,
        "Handling list_sessions request"
    );
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListSessionsResponse = list_sessions(&mut persistence, venue_id, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/venues/{venue_id}/series/preview` endpoint.
///
/// Plans a series without writing anything.
async fn handle_preview_series(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<SeriesRequest>,
) -> Result<Json<PreviewSeriesResponse>, HttpError> {
    info!(venue_id = %venue_id, name = %req.name, "Handling preview_series request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PreviewSeriesResponse = preview_series(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/venues/{venue_id}/series` endpoint.
///
/// Creates every session of a series. Store failures are reported per
/// session in the response body.
async fn handle_submit_series(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<SeriesRequest>,
) -> Result<Json<SubmitSeriesResponse>, HttpError> {
    info!(
        venue_id = %venue_id,
        name = %req.name,
        batch_id = ?req.batch_id,
        "Handling submit_series request"
    );
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitSeriesResponse = submit_series(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/venues/{venue_id}/series/{batch_id}` endpoint.
///
/// Removes every session the venue created under a batch.
async fn handle_rollback_series(
    AxumState(app_state): AxumState<AppState>,
    Path((venue_id, batch_id)): Path<(String, String)>,
) -> Result<Json<RollbackSeriesResponse>, HttpError> {
    info!(
        venue_id = %venue_id,
        batch_id = %batch_id,
        "Handling rollback_series request"
    );
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RollbackSeriesResponse =
        rollback_series(&mut persistence, venue_id, &batch_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/venues/{venue_id}/calendar` endpoint.
async fn handle_get_calendar(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Query(query): Query<CalendarRequest>,
) -> Result<Json<MonthView>, HttpError> {
    info!(venue_id = %venue_id, month = ?query.month, "Handling get_calendar request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;
    let now: NaiveDateTime = app_state.now();

    let mut persistence = app_state.persistence.lock().await;
    let view: MonthView = get_calendar(
        &mut persistence,
        venue_id,
        &query,
        &app_state.config,
        now,
    )?;
    drop(persistence);

    Ok(Json(view))
}

/// Handler for GET `/venues/{venue_id}/analytics` endpoint.
async fn handle_get_analytics(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Query(query): Query<AnalyticsRequest>,
) -> Result<Json<AnalyticsReport>, HttpError> {
    info!(
        venue_id = %venue_id,
        range = ?query.range,
        interval = ?query.interval,
        "Handling get_analytics request"
    );
    let venue_id: VenueId = venue_from_path(&venue_id)?;
    let now: NaiveDateTime = app_state.now();

    let mut persistence = app_state.persistence.lock().await;
    let report: AnalyticsReport = get_analytics(
        &mut persistence,
        venue_id,
        &query,
        &app_state.config,
        now,
    )?;
    drop(persistence);

    Ok(Json(report))
}

/// Handler for POST `/venues/{venue_id}/bookings` endpoint.
async fn handle_record_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<RecordBookingRequest>,
) -> Result<Json<RecordEventResponse>, HttpError> {
    info!(
        venue_id = %venue_id,
        session_id = ?req.session_id,
        status = %req.status,
        "Handling record_booking request"
    );
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordEventResponse = record_booking(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/venues/{venue_id}/payments` endpoint.
async fn handle_record_payment(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Json<RecordEventResponse>, HttpError> {
    info!(venue_id = %venue_id, "Handling record_payment request");
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordEventResponse = record_payment(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/venues/{venue_id}/package_ownerships` endpoint.
async fn handle_record_package_ownership(
    AxumState(app_state): AxumState<AppState>,
    Path(venue_id): Path<String>,
    Json(req): Json<RecordPackageOwnershipRequest>,
) -> Result<Json<RecordEventResponse>, HttpError> {
    info!(
        venue_id = %venue_id,
        package_name = %req.package_name,
        "Handling record_package_ownership request"
    );
    let venue_id: VenueId = venue_from_path(&venue_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordEventResponse =
        record_package_ownership(&mut persistence, venue_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/venues/{venue_id}/instructors",
            post(handle_create_instructor).get(handle_list_instructors),
        )
        .route(
            "/venues/{venue_id}/rooms",
            post(handle_create_room).get(handle_list_rooms),
        )
        .route("/venues/{venue_id}/sessions", get(handle_list_sessions))
        .route(
            "/venues/{venue_id}/series/preview",
            post(handle_preview_series),
        )
        .route("/venues/{venue_id}/series", post(handle_submit_series))
        .route(
            "/venues/{venue_id}/series/{batch_id}",
            delete(handle_rollback_series),
        )
        .route("/venues/{venue_id}/calendar", get(handle_get_calendar))
        .route("/venues/{venue_id}/analytics", get(handle_get_analytics))
        .route("/venues/{venue_id}/bookings", post(handle_record_booking))
        .route("/venues/{venue_id}/payments", post(handle_record_payment))
        .route(
            "/venues/{venue_id}/package_ownerships",
            post(handle_record_package_ownership),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Classbook Server");

    let config: EngineConfig = args.engine_config()?;
    info!(
        timezone = %config.timezone,
        week_start = %config.week_start,
        assumed_class_capacity = config.assumed_class_capacity,
        "Loaded venue settings"
    );

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
