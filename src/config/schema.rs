//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the stub.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Body returned for any path that has no route.
pub const DEFAULT_NOT_FOUND_BODY: &str = "404 Not Found";

/// Root configuration for the stub server and its scenarios.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StubConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Canned responses, matched by exact request path.
    pub routes: Vec<RouteConfig>,

    /// Body served with the 404 fallback.
    pub not_found_body: String,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Browser scenario settings.
    pub scenario: ScenarioConfig,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            not_found_body: DEFAULT_NOT_FOUND_BODY.to_string(),
            observability: ObservabilityConfig::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host name or IP to bind.
    pub host: String,

    /// Port to bind. `0` picks an ephemeral port.
    pub port: u16,

    /// How long `stop()` waits for the serve task to drain.
    pub shutdown_timeout_secs: u64,
}

impl ListenerConfig {
    /// `host:port` as given in the config, for logging and error messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8079,
            shutdown_timeout_secs: 5,
        }
    }
}

/// A single canned response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Raw request path including the query string, still percent-encoded.
    pub path: String,

    /// Status code (default: 200).
    #[serde(default = "default_status")]
    pub status: u16,

    /// Plaintext body, may be empty.
    #[serde(default)]
    pub body: String,
}

impl RouteConfig {
    pub fn ok(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: default_status(),
            body: body.into(),
        }
    }
}

fn default_status() -> u16 {
    200
}

/// The word-completion and solver responses the crossword front end expects.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::ok(
            "/words?word=...&page=0",
            "AAA BBB CCC DDD EEE FFF GGG HHH III JJJ",
        ),
        RouteConfig::ok(
            "/words?word=...&page=1",
            "LLL MMM NNN OOO PPP QQQ RRR SSS TTT UUU",
        ),
        RouteConfig::ok("/words?word=H..&page=0", "HMM HNN"),
        RouteConfig::ok("/words?word=H..&page=1", ""),
        RouteConfig::ok("/solve?crossword=...%0A...%0A...", "ERA\nREL\nEDE"),
    ]
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Settings for driving the application under test in a browser.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Page serving the crossword application.
    pub app_url: String,

    /// WebDriver endpoint (e.g. chromedriver).
    pub webdriver_url: String,

    /// Upper bound for every DOM wait, in seconds.
    pub wait_timeout_secs: u64,

    /// Delay between polls while waiting.
    pub poll_interval_ms: u64,

    /// Run the browser without a window.
    pub headless: bool,

    /// Page function that replaces the application's backend base URL.
    pub backend_override_hook: String,

    /// Page function that turns off the "leave this page?" prompt.
    pub leave_confirm_hook: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:8081/".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            wait_timeout_secs: 10,
            poll_interval_ms: 100,
            headless: true,
            backend_override_hook: "window.setBackendUrl".to_string(),
            leave_confirm_hook: "window.disableLeaveConfirmation".to_string(),
        }
    }
}
