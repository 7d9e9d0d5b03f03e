//! Request ID middleware for request tracing and correlation.
//!
//! Reuses an upstream `x-request-id` header when present, otherwise mints a
//! UUID v4. The ID is recorded on the current span, tagged on the Sentry
//! scope and echoed back in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound on accepted upstream IDs.
const MAX_REQUEST_ID_LEN: usize = 128;

/// The ID assigned to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestId(String);

impl RequestId {
    /// Take the upstream header if it is usable, otherwise mint a fresh one.
    fn from_header(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.len() <= MAX_REQUEST_ID_LEN)
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |s| Self(s.to_owned()))
    }
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = RequestId::from_header(request.headers().get(REQUEST_ID_HEADER));

    Span::current().record("request_id", request_id.0.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id.0);
    });

    let header = HeaderValue::from_str(&request_id.0).ok();

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
