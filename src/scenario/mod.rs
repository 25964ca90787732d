//! Browser scenario subsystem.
//!
//! # Data Flow
//! ```text
//! StubServer (started first, base URL known)
//!     → webdriver.rs (WebDriver session via fantoccini)
//!     → driver.rs (open app, point it at the stub, bounded waits)
//!     → scenarios.rs (UI scripts asserting the stub's canned data shows up)
//! ```
//!
//! # Design Decisions
//! - Browser capability is a trait so driver logic runs against an in-memory DOM in tests
//! - Every wait is bounded by the configured timeout; a miss fails the scenario
//! - No retries: an element that is not there when looked up is an error

pub mod browser;
pub mod driver;
pub mod keys;
pub mod scenarios;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use thiserror::Error;

use crate::lifecycle::StubError;

pub use browser::{Browser, Locator};
pub use driver::ScenarioDriver;
pub use keys::Key;
pub use webdriver::WebDriverBrowser;

/// Why a scenario failed.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not start browser session: {0}")]
    Session(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("timed out after {timeout:?} waiting for {condition}")]
    WaitTimeout { condition: String, timeout: Duration },

    #[error("browser command failed: {0}")]
    Browser(String),

    #[error("stub route missing for {0}")]
    MissingRoute(String),

    #[error(transparent)]
    Stub(#[from] StubError),
}
