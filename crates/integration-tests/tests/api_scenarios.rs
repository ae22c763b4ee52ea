//! End-to-end API scenarios through the full router.
//!
//! Runs in-process against the in-memory store; no database or server needed.

use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
};
use exercise_tracker_integration_tests::TestApp;

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_created_user_round_trips_through_listing() {
    let app = TestApp::new();

    let created = app.post_form("/api/users", &[("username", "fcc_test")]).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["username"], "fcc_test");
    let id = created.body["_id"].as_str().unwrap_or_default().to_owned();
    assert!(!id.is_empty());

    let listed = app.get("/api/users").await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.body.as_array().cloned().unwrap_or_default();
    assert!(
        users
            .iter()
            .any(|u| u["_id"] == id.as_str() && u["username"] == "fcc_test")
    );
}

#[tokio::test]
async fn test_listing_without_writes_is_identical() {
    let app = TestApp::new();
    for name in ["ann", "ben", "cat"] {
        app.create_user(name).await;
    }

    let first = app.get("/api/users").await;
    let second = app.get("/api/users").await;
    assert_eq!(first.body, second.body);
    assert_eq!(first.body[0]["username"], "ann");
    assert_eq!(first.body[2]["username"], "cat");
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let app = TestApp::new();
    app.create_user("twin").await;

    let again = app.post_form("/api/users", &[("username", "twin")]).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert!(again.body["error"].is_string());
}

#[tokio::test]
async fn test_blank_username_is_rejected() {
    let app = TestApp::new();
    for fields in [&[][..], &[("username", "   ")][..]] {
        let response = app.post_form("/api/users", fields).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body["error"].is_string());
    }
}

#[tokio::test]
async fn test_username_length_is_capped_at_64() {
    let app = TestApp::new();

    let longest = "a".repeat(64);
    let ok = app.post_form("/api/users", &[("username", longest.as_str())]).await;
    assert_eq!(ok.status, StatusCode::OK);

    let too_long = "b".repeat(65);
    let rejected = app.post_form("/api/users", &[("username", too_long.as_str())]).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert!(rejected.body["error"].is_string());
}

// =============================================================================
// Exercises
// =============================================================================

#[tokio::test]
async fn test_duration_is_coerced_from_text() {
    let app = TestApp::new();
    let id = app.create_user("runner").await;

    let ok = app.log_exercise(&id, "run", "30", Some("2024-01-01")).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["duration"], 30);

    let bad = app.log_exercise(&id, "run", "abc", Some("2024-01-01")).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.body["error"].is_string());
}

#[tokio::test]
async fn test_exercise_response_echoes_user_and_renders_date() {
    let app = TestApp::new();
    let id = app.create_user("echo").await;

    let response = app
        .log_exercise(&id, "pushups", "10", Some("2024-01-01"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_id"], id.as_str());
    assert_eq!(response.body["username"], "echo");
    assert_eq!(response.body["description"], "pushups");
    assert_eq!(response.body["date"], "Mon Jan 01 2024");
}

#[tokio::test]
async fn test_rfc3339_date_is_accepted() {
    let app = TestApp::new();
    let id = app.create_user("iso").await;

    let response = app
        .log_exercise(&id, "row", "12", Some("2024-02-29T10:00:00Z"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["date"], "Thu Feb 29 2024");
}

#[tokio::test]
async fn test_local_date_time_and_rendered_dates_are_accepted() {
    let app = TestApp::new();
    let id = app.create_user("echoed").await;

    let local = app
        .log_exercise(&id, "row", "12", Some("2024-01-01T10:00:00"))
        .await;
    assert_eq!(local.status, StatusCode::OK);
    assert_eq!(local.body["date"], "Mon Jan 01 2024");

    let rendered = local.body["date"].as_str().unwrap_or_default().to_owned();
    let again = app.log_exercise(&id, "row", "12", Some(rendered.as_str())).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["date"], "Mon Jan 01 2024");

    let log = app
        .get(&format!("/api/users/{id}/logs?from=Mon%20Jan%2001%202024&to=2024-01-01T23:00:00"))
        .await;
    assert_eq!(log.status, StatusCode::OK);
    assert_eq!(log.body["count"], 2);
}

#[tokio::test]
async fn test_missing_date_defaults_to_a_rendered_date() {
    let app = TestApp::new();
    let id = app.create_user("now").await;

    let response = app.log_exercise(&id, "walk", "5", None).await;
    assert_eq!(response.status, StatusCode::OK);
    // "Www Mmm DD YYYY"
    let date = response.body["date"].as_str().unwrap_or_default();
    assert_eq!(date.len(), 15);
}

#[tokio::test]
async fn test_exercise_for_unknown_user_is_404_and_writes_nothing() {
    let app = TestApp::new();
    let ghost = uuid::Uuid::new_v4().to_string();

    let response = app.log_exercise(&ghost, "run", "10", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());

    let response = app.log_exercise("not-an-id", "run", "10", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let log = app.get(&format!("/api/users/{ghost}/logs")).await;
    assert_eq!(log.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Logs
// =============================================================================

#[tokio::test]
async fn test_log_date_range_is_inclusive() {
    let app = TestApp::new();
    let id = app.create_user("ranged").await;
    for date in ["2024-01-01", "2024-01-15", "2024-02-01"] {
        app.log_exercise(&id, "swim", "20", Some(date)).await;
    }

    let log = app
        .get(&format!("/api/users/{id}/logs?from=2024-01-01&to=2024-01-31"))
        .await;
    assert_eq!(log.status, StatusCode::OK);
    assert_eq!(log.body["_id"], id.as_str());
    assert_eq!(log.body["username"], "ranged");
    assert_eq!(log.body["count"], 2);
    assert_eq!(log.body["log"][0]["date"], "Mon Jan 01 2024");
    assert_eq!(log.body["log"][1]["date"], "Mon Jan 15 2024");
    assert_eq!(log.body["log"][0]["description"], "swim");
    assert_eq!(log.body["log"][0]["duration"], 20);
}

#[tokio::test]
async fn test_log_limit_truncates_only_when_positive() {
    let app = TestApp::new();
    let id = app.create_user("limited").await;
    for day in 1..=5 {
        let date = format!("2024-03-0{day}");
        app.log_exercise(&id, "bike", "15", Some(date.as_str())).await;
    }

    let cases = [("?limit=2", 2), ("?limit=0", 5), ("", 5), ("?limit=-1", 5), ("?limit=lots", 5)];
    for (query, expected) in cases {
        let log = app.get(&format!("/api/users/{id}/logs{query}")).await;
        assert_eq!(log.status, StatusCode::OK, "query {query}");
        assert_eq!(log.body["count"], expected, "query {query}");
        assert_eq!(
            log.body["log"].as_array().map(Vec::len),
            Some(expected),
            "query {query}"
        );
    }

    let first_two = app.get(&format!("/api/users/{id}/logs?limit=2")).await;
    assert_eq!(first_two.body["log"][0]["date"], "Fri Mar 01 2024");
    assert_eq!(first_two.body["log"][1]["date"], "Sat Mar 02 2024");
}

#[tokio::test]
async fn test_log_blank_bounds_are_ignored_and_bad_bounds_rejected() {
    let app = TestApp::new();
    let id = app.create_user("bounds").await;
    app.log_exercise(&id, "yoga", "30", Some("2024-01-01")).await;

    let blank = app.get(&format!("/api/users/{id}/logs?from=&to=")).await;
    assert_eq!(blank.status, StatusCode::OK);
    assert_eq!(blank.body["count"], 1);

    let bad = app.get(&format!("/api/users/{id}/logs?from=yesterday")).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.body["error"].is_string());
}

#[tokio::test]
async fn test_logs_are_per_user() {
    let app = TestApp::new();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.log_exercise(&alice, "run", "10", Some("2024-01-01")).await;

    let bob_log = app.get(&format!("/api/users/{bob}/logs")).await;
    assert_eq!(bob_log.status, StatusCode::OK);
    assert_eq!(bob_log.body["count"], 0);
    assert_eq!(bob_log.body["log"].as_array().map(Vec::len), Some(0));
}

// =============================================================================
// Failure surfaces
// =============================================================================

#[tokio::test]
async fn test_store_outage_is_500_without_details() {
    let app = TestApp::new();
    let id = app.create_user("outage").await;
    app.store().set_offline(true);

    for response in [
        app.get("/api/users").await,
        app.get(&format!("/api/users/{id}/logs")).await,
        app.post_form("/api/users", &[("username", "late")]).await,
    ] {
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Internal server error");
    }

    app.store().set_offline(false);
    assert_eq!(app.get("/api/users").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();
    let response = app.get("/api/exercise/new").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Not found");
}

// =============================================================================
// Ambient surface
// =============================================================================

#[tokio::test]
async fn test_landing_page_and_assets_are_served() {
    let app = TestApp::new();

    for (uri, content_type) in [("/", "text/html"), ("/public/style.css", "text/css")] {
        let request = Request::builder().uri(uri).body(Body::empty()).expect("valid request");
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let served = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(served.starts_with(content_type), "{uri}: {served}");
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();
    let request = Request::builder().uri("/health").body(Body::empty()).expect("valid request");
    assert_eq!(app.send(request).await.status(), StatusCode::OK);

    app.store().set_offline(true);
    let request = Request::builder()
        .uri("/health/ready")
        .body(Body::empty())
        .expect("valid request");
    assert_eq!(app.send(request).await.status(), StatusCode::SERVICE_UNAVAILABLE);
}
