//! Crossword stub backend.
//!
//! Serves fixed word-completion and solver responses so the crossword front
//! end can be exercised without its real backend.
//!
//! ```text
//!   browser (front end on :8081)
//!        │  GET /words?word=...&page=0
//!        ▼
//!   ┌──────────┐    ┌─────────┐    ┌─────────────┐
//!   │ listener │───▶│  http   │───▶│ route table │
//!   │  :8079   │    │ server  │    │ exact match │
//!   └──────────┘    └─────────┘    └─────────────┘
//!        ▲                                │
//!        └──── 200 canned body / 404 ─────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use crossword_stub::config::{load_config, validate_config, ConfigError, StubConfig};
use crossword_stub::lifecycle::signals::shutdown_signal;
use crossword_stub::observability::logging::init_logging;
use crossword_stub::StubServer;

#[derive(Parser)]
#[command(name = "crossword-stub")]
#[command(about = "Canned backend for crossword front-end tests", long_about = None)]
struct Cli {
    /// TOML config file; built-in crossword routes when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<StubConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => StubConfig::default(),
        };

        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.observability.log_level);

    tracing::info!("crossword-stub v{} starting", env!("CARGO_PKG_VERSION"));

    let mut server = StubServer::new(&config)?;
    server.start().await?;

    for path in server.table().paths() {
        tracing::info!(path, "Route");
    }

    shutdown_signal().await;
    server.stop().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
