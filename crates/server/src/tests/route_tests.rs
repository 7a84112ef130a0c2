// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_app, send};
use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

/// Creates instructor "Ada" and room "Studio A" in venue 1.
async fn seed_resources(app: &Router) -> (i64, i64) {
    let (status, instructor) = send(
        app,
        "POST",
        "/venues/1/instructors",
        Some(&json!({ "display_name": "Ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, room) = send(
        app,
        "POST",
        "/venues/1/rooms",
        Some(&json!({ "display_name": "Studio A" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        instructor["instructor_id"].as_i64().unwrap(),
        room["room_id"].as_i64().unwrap(),
    )
}

fn weekly_series(instructor_id: i64, room_id: i64) -> Value {
    json!({
        "name": "Evening Yoga",
        "class_type_id": "3",
        "instructor_id": instructor_id.to_string(),
        "room_id": room_id.to_string(),
        "date": "2025-01-06",
        "start_time": "18:00",
        "duration_minutes": 60,
        "capacity": 15,
        "recurrence": { "frequency": "weekly", "count": 2 }
    })
}

#[tokio::test]
async fn test_create_and_list_resources() {
    let app: Router = create_test_app();
    seed_resources(&app).await;

    let (status, body) = send(&app, "GET", "/venues/1/instructors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instructors"][0]["display_name"], "Ada");

    let (status, body) = send(&app, "GET", "/venues/2/rooms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rooms"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_invalid_venue_is_bad_request() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/venues/abc/instructors", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().unwrap().contains("venue"));
}

#[tokio::test]
async fn test_blank_resource_name_is_bad_request() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/venues/1/rooms",
        Some(&json!({ "display_name": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("display_name"));
}

#[tokio::test]
async fn test_preview_then_submit_then_list_sessions() {
    let app: Router = create_test_app();
    let (instructor_id, room_id) = seed_resources(&app).await;
    let series: Value = weekly_series(instructor_id, room_id);

    let (status, preview) = send(&app, "POST", "/venues/1/series/preview", Some(&series)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["can_submit"], true);
    assert_eq!(preview["candidates"].as_array().unwrap().len(), 3);

    let (status, submitted) = send(&app, "POST", "/venues/1/series", Some(&series)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["complete"], true);
    assert_eq!(submitted["created"].as_array().unwrap().len(), 3);
    assert!(
        submitted["batch_id"]
            .as_str()
            .unwrap()
            .starts_with("batch_")
    );

    let (status, listed) = send(
        &app,
        "GET",
        "/venues/1/sessions?start=2025-01-01&end=2025-01-13",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["sessions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_conflicting_series_is_rejected() {
    let app: Router = create_test_app();
    let (instructor_id, room_id) = seed_resources(&app).await;
    let series: Value = weekly_series(instructor_id, room_id);
    send(&app, "POST", "/venues/1/series", Some(&series)).await;

    let (status, preview) = send(&app, "POST", "/venues/1/series/preview", Some(&series)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["can_submit"], false);
    assert!(!preview["findings"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, "POST", "/venues/1/series", Some(&series)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_invalid_series_form_is_bad_request() {
    let app: Router = create_test_app();
    let (instructor_id, room_id) = seed_resources(&app).await;
    let mut series: Value = weekly_series(instructor_id, room_id);
    series["name"] = json!("");

    let (status, preview) = send(&app, "POST", "/venues/1/series/preview", Some(&series)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["field_errors"][0]["field"], "name");

    let (status, _) = send(&app, "POST", "/venues/1/series", Some(&series)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rollback_removes_batch() {
    let app: Router = create_test_app();
    let (instructor_id, room_id) = seed_resources(&app).await;
    let (_, submitted) = send(
        &app,
        "POST",
        "/venues/1/series",
        Some(&weekly_series(instructor_id, room_id)),
    )
    .await;
    let batch_id: &str = submitted["batch_id"].as_str().unwrap();

    let elsewhere: String = format!("/venues/2/series/{batch_id}");
    let (status, _) = send(&app, "DELETE", &elsewhere, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri: String = format!("/venues/1/series/{batch_id}");
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 3);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/venues/1/series/not-a-batch", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calendar_badges_month() {
    let app: Router = create_test_app();
    let (instructor_id, room_id) = seed_resources(&app).await;
    send(
        &app,
        "POST",
        "/venues/1/series",
        Some(&weekly_series(instructor_id, room_id)),
    )
    .await;

    let (status, view) = send(&app, "GET", "/venues/1/calendar?month=2025-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["month"], 1);

    let weeks: &Vec<Value> = view["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 6);
    let badged: usize = weeks
        .iter()
        .flat_map(|week| week.as_array().unwrap())
        .filter(|cell| cell["occurrence_count"].as_u64().unwrap() > 0)
        .count();
    assert_eq!(badged, 3);

    let (status, _) = send(&app, "GET", "/venues/1/calendar?month=13-2025", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_report_and_bad_keys() {
    let app: Router = create_test_app();

    let (status, report) = send(&app, "GET", "/venues/1/analytics?range=last_7_days", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["buckets"].as_array().unwrap().len(), 7);

    let (status, body) = send(&app, "GET", "/venues/1/analytics?interval=hourly", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("interval"));
}

#[tokio::test]
async fn test_record_raw_events() {
    let app: Router = create_test_app();
    let (instructor_id, room_id) = seed_resources(&app).await;
    let (_, submitted) = send(
        &app,
        "POST",
        "/venues/1/series",
        Some(&weekly_series(instructor_id, room_id)),
    )
    .await;
    let session_id: i64 = submitted["created"][0]["occurrence_id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/venues/1/bookings",
        Some(&json!({
            "session_id": session_id,
            "status": "confirmed",
            "created_at": "2025-01-02T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/venues/1/payments",
        Some(&json!({ "amount": "25.50", "paid_at": "2025-01-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/venues/1/package_ownerships",
        Some(&json!({ "package_name": "Intro pass", "purchased_at": "2025-01-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/venues/1/bookings",
        Some(&json!({
            "session_id": 9999,
            "status": "confirmed",
            "created_at": "2025-01-02"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(
        &app,
        "GET",
        "/venues/1/sessions?start=2025-01-06&end=2025-01-06",
        None,
    )
    .await;
    assert_eq!(listed["sessions"][0]["booked_count"], 1);
}
