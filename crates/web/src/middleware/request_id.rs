//! Request ID middleware for request tracing and correlation.
//!
//! Generates a UUID v4 for each request if not provided by an upstream
//! proxy. The request ID is:
//! - Recorded in the current tracing span
//! - Added to the Sentry scope for error correlation
//! - Returned in the response headers

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inherited request ID we accept before generating our own.
const MAX_REQUEST_ID_LENGTH: usize = 64;

/// Middleware that ensures every request has a unique request ID.
///
/// A reverse proxy in front of the app can supply `x-request-id` and the
/// value is carried through. The site is also reachable directly, so an
/// inherited ID is only reused when it is short and plain ASCII; anything
/// else is replaced with a fresh UUID v4.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id =
        inherited_request_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    // Record in current span for structured logging
    Span::current().record("request_id", &request_id);

    // Set in Sentry scope for error correlation
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    // Add to response headers so clients can reference the request ID
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Returns the upstream `x-request-id` if it is usable as-is.
///
/// Usable means non-empty, at most [`MAX_REQUEST_ID_LENGTH`] characters, and
/// limited to alphanumerics, `-`, and `_` so the value is safe to echo into
/// logs and response headers.
fn inherited_request_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
    if value.is_empty() || value.len() > MAX_REQUEST_ID_LENGTH {
        return None;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .then(|| value.to_string())
}
