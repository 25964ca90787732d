//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace layer into every request span
//! - Metrics go through the `metrics` facade and cost nothing without a recorder

pub mod logging;
pub mod metrics;
