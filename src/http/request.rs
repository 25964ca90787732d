//! Request inspection.
//!
//! # Responsibilities
//! - Name the request ID header shared by the middleware stack
//! - Extract the routing key (raw path plus query) from a request URI
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The routing key is taken verbatim; percent-escapes are never decoded

use axum::http::{HeaderName, Uri};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The path and query exactly as the client sent them.
pub fn raw_path(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}
