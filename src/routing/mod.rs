//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (raw, still percent-encoded)
//!     → table.rs (exact lookup)
//!     → Return: canned response or the 404 fallback
//!
//! Table Construction (at startup):
//!     RouteConfig[]
//!     → reject duplicate paths
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table built once, immutable at runtime (shared via Arc, no locks)
//! - Exact string equality only: no prefixes, no patterns, no decoding
//! - A miss is a normal 404 response, not an error

pub mod table;

pub use table::{CannedResponse, RouteTable, StubResponse, TableError};
