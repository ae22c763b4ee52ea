//! Request ID middleware for request tracing and correlation.
//!
//! Every API response carries an `x-request-id` header. An ID supplied by an
//! upstream proxy is reused if it looks sane; otherwise a UUID v4 is minted.
//! The ID is recorded on the request span and tagged on the Sentry scope so a
//! client-reported ID can be matched to server logs.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID accepted verbatim.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers().get(REQUEST_ID_HEADER));

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Reuse a well-formed upstream ID or generate a new one.
fn resolve_request_id(upstream: Option<&HeaderValue>) -> String {
    upstream
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_UPSTREAM_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_is_reused() {
        let header = HeaderValue::from_static("cf-ray-123abc");
        assert_eq!(resolve_request_id(Some(&header)), "cf-ray-123abc");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = resolve_request_id(None);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_malformed_upstream_id_is_replaced() {
        let header = HeaderValue::from_static("has spaces; and=junk");
        let id = resolve_request_id(Some(&header));
        assert!(Uuid::parse_str(&id).is_ok());

        let long = HeaderValue::from_str(&"a".repeat(MAX_UPSTREAM_ID_LEN + 1)).unwrap();
        assert!(Uuid::parse_str(&resolve_request_id(Some(&long))).is_ok());
    }
}
