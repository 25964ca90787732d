//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! start() (stub_server.rs):
//!     Stopped → Starting → bind listener → spawn serve task → Running
//!     bind failure: → Stopped, error returned to the caller
//!
//! stop() (stub_server.rs, shutdown.rs):
//!     Running → Stopping → broadcast shutdown → await serve task → Stopped
//!
//! Signals (signals.rs):
//!     SIGINT → binary calls stop()
//! ```
//!
//! # Design Decisions
//! - State changes only through start()/stop(); stop() is idempotent
//! - Shutdown has timeout: the serve task is aborted after the deadline

pub mod shutdown;
pub mod signals;
pub mod stub_server;

pub use shutdown::Shutdown;
pub use stub_server::{ServerState, StubError, StubServer};
