//! Metrics collection.
//!
//! # Metrics
//! - `stub_requests_total` (counter): requests by method, status and whether a route matched
//! - `stub_request_duration_seconds` (histogram): time spent answering

use std::time::Instant;

use axum::http::{Method, StatusCode};

/// Record one answered request.
pub fn record_request(method: &Method, status: StatusCode, matched: bool, start: Instant) {
    let method = method.as_str().to_owned();
    let status = status.as_u16().to_string();
    let matched = matched.to_string();

    metrics::counter!(
        "stub_requests_total",
        "method" => method.clone(),
        "status" => status.clone(),
        "matched" => matched.clone()
    )
    .increment(1);

    metrics::histogram!(
        "stub_request_duration_seconds",
        "method" => method,
        "status" => status,
        "matched" => matched
    )
    .record(start.elapsed().as_secs_f64());
}
