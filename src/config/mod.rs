//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → StubConfig (validated, immutable)
//!     → route table built once at server construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the stub never reloads
//! - All fields have defaults, so an empty file yields the crossword table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RouteConfig, ScenarioConfig, StubConfig};
pub use validation::{validate_config, ValidationError};
