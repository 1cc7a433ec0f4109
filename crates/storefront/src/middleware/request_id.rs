//! Request ID middleware for request tracing and correlation.
//!
//! Generates a UUID v4 for each request unless a usable ID was provided by
//! an upstream proxy (e.g., a load balancer). The request ID is:
//! - Recorded in the current tracing span
//! - Added to the Sentry scope for error correlation
//! - Returned in the response headers

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
///
/// An incoming `x-request-id` is reused when it is short and made of
/// printable ASCII without spaces; otherwise a new UUID v4 is generated so
/// log lines and Sentry tags stay well-formed.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = upstream_request_id(request.headers().get(REQUEST_ID_HEADER))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

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

fn upstream_request_id(header: Option<&HeaderValue>) -> Option<String> {
    let value = header?.to_str().ok()?.trim();
    let usable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.chars().all(|c| c.is_ascii_graphic());
    usable.then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_reused() {
        let header = HeaderValue::from_static("cf-8f2a91c0");
        assert_eq!(
            upstream_request_id(Some(&header)).as_deref(),
            Some("cf-8f2a91c0")
        );
    }

    #[test]
    fn test_unusable_upstream_id_replaced() {
        assert_eq!(upstream_request_id(None), None);
        let blank = HeaderValue::from_static("   ");
        assert_eq!(upstream_request_id(Some(&blank)), None);
        let spaced = HeaderValue::from_static("two words");
        assert_eq!(upstream_request_id(Some(&spaced)), None);
        let long = HeaderValue::from_str(&"a".repeat(MAX_REQUEST_ID_LEN + 1)).ok();
        assert_eq!(upstream_request_id(long.as_ref()), None);
    }
}
