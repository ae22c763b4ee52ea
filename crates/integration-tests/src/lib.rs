//! Integration tests for the exercise tracker.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process scenarios (no database needed)
//! cargo test -p exercise-tracker-integration-tests
//!
//! # Live-server scenarios
//! cargo run -p exercise-tracker-cli -- migrate
//! cargo run -p exercise-tracker-server &
//! cargo test -p exercise-tracker-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_scenarios` - Full router over the in-memory store
//! - `live_server` - HTTP against a running server (`TRACKER_BASE_URL`)

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use exercise_tracker_core::UserId;
use exercise_tracker_server::db::memory::MemoryStore;
use exercise_tracker_server::routes;
use exercise_tracker_server::state::AppState;

/// The full application router over a fresh in-memory store.
pub struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Build the router with the repository's landing page and assets.
    #[must_use]
    pub fn new() -> Self {
        let (state, store) = AppState::in_memory();
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let router = routes::app(
            state,
            &root.join("public"),
            &root.join("views/index.html"),
        );
        Self { router, store }
    }

    /// The backing store, for inspection or to simulate an outage.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Send a raw request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which axum routers never do.
    pub async fn send(&self, request: Request) -> axum::response::Response {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    /// `POST` a form-encoded body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap_or_else(|e| panic!("bad request for {uri}: {e}"));
        self.json(request).await
    }

    /// `GET` a JSON resource.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap_or_else(|e| panic!("bad request for {uri}: {e}"));
        self.json(request).await
    }

    /// Register a user and return its `_id`.
    ///
    /// # Panics
    ///
    /// Panics if registration does not succeed or the `_id` is not a user id.
    pub async fn create_user(&self, username: &str) -> String {
        let response = self.post_form("/api/users", &[("username", username)]).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        let raw = response.body["_id"]
            .as_str()
            .unwrap_or_else(|| panic!("missing _id in {:?}", response.body));
        UserId::parse(raw)
            .unwrap_or_else(|| panic!("_id is not a user id: {raw}"))
            .to_string()
    }

    /// Log an exercise and return the response.
    pub async fn log_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: &str,
        date: Option<&str>,
    ) -> TestResponse {
        let mut fields = vec![("description", description), ("duration", duration)];
        if let Some(date) = date {
            fields.push(("date", date));
        }
        self.post_form(&format!("/api/users/{user_id}/exercises"), &fields)
            .await
    }

    async fn json(&self, request: Request) -> TestResponse {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("failed to read body: {e}"));
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {bytes:?}"));
        TestResponse { status, body }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
