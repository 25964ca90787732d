//! Response construction.
//!
//! # Responsibilities
//! - Turn a table answer into an HTTP response
//! - Build the answer for methods the stub does not serve
//!
//! # Design Decisions
//! - Headers from the table answer replace anything axum set by default
//! - Unsupported methods still carry the cross-origin header

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::routing::table::{stub_headers, StubResponse};

impl IntoResponse for StubResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        response.headers_mut().extend(self.headers);
        response
    }
}

/// Answer for anything other than GET or HEAD.
pub fn unsupported_method() -> StubResponse {
    StubResponse {
        status: StatusCode::NOT_IMPLEMENTED,
        body: Bytes::from_static(b"Unsupported method"),
        headers: stub_headers(),
        matched: false,
    }
}
