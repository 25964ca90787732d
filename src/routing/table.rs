//! Route table lookup and dispatch.
//!
//! # Responsibilities
//! - Store canned responses keyed by raw request path
//! - Answer a path with its canned response or the 404 fallback
//! - Attach the headers every stub response carries
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap on the verbatim path, query string included
//! - `%0A` in a path is matched as those three characters, never as a newline

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use thiserror::Error;

use crate::config::schema::{default_routes, RouteConfig, DEFAULT_NOT_FOUND_BODY};

/// Errors raised while building a route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("route path {0:?} is defined more than once")]
    DuplicatePath(String),

    #[error("route {path:?} has invalid status {status}")]
    InvalidStatus { path: String, status: u16 },
}

/// A fixed response stored in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Result of answering a request path.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: Bytes,
    pub headers: HeaderMap,
    /// Whether a table entry produced this response.
    pub matched: bool,
}

/// Immutable mapping from exact request path to canned response.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, CannedResponse>,
    not_found: Bytes,
}

impl RouteTable {
    /// Build a table from route definitions.
    pub fn from_config(
        routes: &[RouteConfig],
        not_found_body: impl Into<String>,
    ) -> Result<Self, TableError> {
        let mut table = HashMap::with_capacity(routes.len());

        for route in routes {
            let status = StatusCode::from_u16(route.status)
                .map_err(|_| TableError::InvalidStatus {
                    path: route.path.clone(),
                    status: route.status,
                })?;

            let canned = CannedResponse {
                status,
                body: Bytes::from(route.body.clone()),
            };

            if table.insert(route.path.clone(), canned).is_some() {
                return Err(TableError::DuplicatePath(route.path.clone()));
            }
        }

        Ok(Self {
            routes: table,
            not_found: Bytes::from(not_found_body.into()),
        })
    }

    /// The word-completion and solver table used by the crossword front end.
    pub fn crossword() -> Self {
        let routes = default_routes();
        let mut table = HashMap::with_capacity(routes.len());
        for route in routes {
            table.insert(
                route.path,
                CannedResponse {
                    status: StatusCode::OK,
                    body: Bytes::from(route.body),
                },
            );
        }

        Self {
            routes: table,
            not_found: Bytes::from_static(DEFAULT_NOT_FOUND_BODY.as_bytes()),
        }
    }

    /// Find the entry for an exact path.
    pub fn lookup(&self, path: &str) -> Option<&CannedResponse> {
        self.routes.get(path)
    }

    /// Answer a raw request path. Never fails: a miss is a 404.
    pub fn handle(&self, path: &str) -> StubResponse {
        let (status, body, matched) = match self.lookup(path) {
            Some(canned) => (canned.status, canned.body.clone(), true),
            None => (StatusCode::NOT_FOUND, self.not_found.clone(), false),
        };

        StubResponse {
            status,
            body,
            headers: stub_headers(),
            matched,
        }
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routed paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Headers attached to every stub response.
///
/// The application under test is served from another port, so the browser
/// only hands it our bodies if any origin is allowed.
pub fn stub_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers
}
