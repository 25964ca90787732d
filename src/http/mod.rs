//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, fallback handler)
//!     → request.rs (request ID, raw path extraction)
//!     → routing::RouteTable::handle (exact lookup)
//!     → response.rs (status, body and stub headers onto the wire)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{raw_path, X_REQUEST_ID};
pub use server::HttpServer;
