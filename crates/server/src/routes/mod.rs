//! HTTP route handlers for the tracker API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Landing page
//! GET  /public/*                - Static assets
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store ping)
//!
//! # API
//! POST /api/users               - Register a user (form: username)
//! GET  /api/users               - List users
//! POST /api/users/{_id}/exercises - Log an exercise (form: description, duration, date?)
//! GET  /api/users/{_id}/logs    - Exercise log (query: from?, to?, limit?)
//! ```
//!
//! Anything else answers 404 with a JSON error body.

pub mod exercises;
pub mod health;
pub mod users;

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::Uri,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::index).post(users::create))
        .route("/users/{id}/exercises", post(exercises::create))
        .route("/users/{id}/logs", get(exercises::log))
}

/// Build the complete application router.
///
/// `public_dir` is served under `/public` and `index_page` at `/`.
pub fn app(state: AppState, public_dir: &Path, index_page: &Path) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .route_service("/", ServeFile::new(index_page))
        .nest_service("/public", ServeDir::new(public_dir))
        .fallback(not_found)
        .with_state(state)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .layer(CorsLayer::permissive())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Fallback for unknown routes.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{StatusCode, header},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::middleware::REQUEST_ID_HEADER;

    fn test_app() -> (Router, Arc<MemoryStore>) {
        let (state, store) = AppState::in_memory();
        let app = app(
            state,
            Path::new("does-not-exist/public"),
            Path::new("does-not-exist/index.html"),
        );
        (app, store)
    }

    async fn send(app: &Router, request: Request) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_user(app: &Router, name: &str) -> String {
        let response = send(app, post_form("/api/users", &format!("username={name}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        json(response).await["_id"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn test_create_and_list_users() {
        let (app, _) = test_app();

        let response = send(&app, post_form("/api/users", "username=fcc_test")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["username"], "fcc_test");
        let id = body["_id"].as_str().unwrap().to_owned();

        let users = json(send(&app, get_req("/api/users")).await).await;
        assert_eq!(users.as_array().unwrap().len(), 1);
        assert_eq!(users[0]["_id"], id.as_str());
        assert_eq!(users[0]["username"], "fcc_test");
    }

    #[tokio::test]
    async fn test_create_user_validation_and_conflict() {
        let (app, _) = test_app();

        let response = send(&app, post_form("/api/users", "")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json(response).await["error"].is_string());

        create_user(&app, "taken").await;
        let response = send(&app, post_form("/api/users", "username=taken")).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_user_without_form_body_is_bad_request() {
        let (app, _) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_log_exercise_response_shape() {
        let (app, _) = test_app();
        let id = create_user(&app, "runner").await;

        let response = send(
            &app,
            post_form(
                &format!("/api/users/{id}/exercises"),
                "description=run&duration=30&date=2024-01-01",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["_id"], id.as_str());
        assert_eq!(body["username"], "runner");
        assert_eq!(body["description"], "run");
        assert_eq!(body["duration"], 30);
        assert_eq!(body["date"], "Mon Jan 01 2024");
    }

    #[tokio::test]
    async fn test_log_exercise_errors() {
        let (app, _) = test_app();
        let id = create_user(&app, "v").await;

        let response = send(
            &app,
            post_form(&format!("/api/users/{id}/exercises"), "description=run&duration=abc"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            post_form("/api/users/not-a-user/exercises", "description=run&duration=5"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_user_outranks_missing_form_body() {
        let (app, _) = test_app();
        let id = create_user(&app, "bodyless").await;
        let bare_post = |uri: String| {
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        };

        let ghost = uuid::Uuid::new_v4();
        let response = send(&app, bare_post(format!("/api/users/{ghost}/exercises"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(json(response).await["error"].is_string());

        let response = send(&app, bare_post(format!("/api/users/{id}/exercises"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logs_filter_and_count() {
        let (app, _) = test_app();
        let id = create_user(&app, "logger").await;
        for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            let response = send(
                &app,
                post_form(
                    &format!("/api/users/{id}/exercises"),
                    &format!("description=lift&duration=10&date={date}"),
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let body = json(send(&app, get_req(&format!("/api/users/{id}/logs"))).await).await;
        assert_eq!(body["count"], 3);
        assert_eq!(body["log"].as_array().unwrap().len(), 3);
        assert_eq!(body["log"][0]["date"], "Mon Jan 01 2024");

        let body = json(
            send(
                &app,
                get_req(&format!("/api/users/{id}/logs?from=2024-01-02&limit=1")),
            )
            .await,
        )
        .await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["log"][0]["date"], "Tue Jan 02 2024");

        let response = send(&app, get_req(&format!("/api/users/{id}/logs?to=soon"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_failure_is_500_with_json_body() {
        let (app, store) = test_app();
        store.set_offline(true);

        let response = send(&app, get_req("/api/users")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let (app, store) = test_app();
        assert_eq!(send(&app, get_req("/health")).await.status(), StatusCode::OK);
        assert_eq!(
            send(&app, get_req("/health/ready")).await.status(),
            StatusCode::OK
        );

        store.set_offline(true);
        assert_eq!(
            send(&app, get_req("/health/ready")).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _) = test_app();
        let response = send(&app, get_req("/api/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"], "Not found");
    }

    #[tokio::test]
    async fn test_cross_origin_requests_are_allowed() {
        let (app, _) = test_app();
        let request = Request::builder()
            .uri("/api/users")
            .header(header::ORIGIN, "https://www.freecodecamp.org")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let preflight = Request::builder()
            .method("OPTIONS")
            .uri("/api/users")
            .header(header::ORIGIN, "https://www.freecodecamp.org")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, preflight).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
        );
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let (app, _) = test_app();
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");

        let response = send(&app, get_req("/health")).await;
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}
