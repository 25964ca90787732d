//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every request path maps to at most one route
//! - Validate value ranges (status codes, timeouts)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: StubConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::StubConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener host must not be empty")]
    EmptyHost,

    #[error("route path {0:?} must start with '/'")]
    RelativePath(String),

    #[error("route path {0:?} is defined more than once")]
    DuplicatePath(String),

    #[error("route {path:?} has invalid status {status}")]
    InvalidStatus { path: String, status: u16 },

    #[error("scenario wait timeout must be greater than zero")]
    ZeroWaitTimeout,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &StubConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath(route.path.clone()));
        }
        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicatePath(route.path.clone()));
        }
        if !(100..=599).contains(&route.status) {
            errors.push(ValidationError::InvalidStatus {
                path: route.path.clone(),
                status: route.status,
            });
        }
    }

    if config.scenario.wait_timeout_secs == 0 {
        errors.push(ValidationError::ZeroWaitTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
