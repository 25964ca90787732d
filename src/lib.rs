//! Stub backend and browser scenarios for testing the crossword front end.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod scenario;

pub use config::schema::StubConfig;
pub use http::HttpServer;
pub use lifecycle::{ServerState, Shutdown, StubError, StubServer};
pub use routing::RouteTable;
