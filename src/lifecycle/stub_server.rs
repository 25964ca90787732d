//! The stub server and its lifecycle.
//!
//! # Responsibilities
//! - Bind the configured address and run the serve task in the background
//! - Track lifecycle state across start()/stop()
//! - Surface bind failures to the caller
//!
//! # Design Decisions
//! - start() returns as soon as the listener is bound; the kernel queues
//!   connections from then on, so callers may issue requests immediately
//! - stop() never blocks past the configured shutdown timeout

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::schema::{ListenerConfig, StubConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::routing::{RouteTable, TableError};

/// Where the server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerState::Stopped => "stopped",
            ServerState::Starting => "starting",
            ServerState::Running => "running",
            ServerState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Errors from constructing, starting or stopping the stub server.
#[derive(Debug, Error)]
pub enum StubError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stub server is already {0}")]
    AlreadyRunning(ServerState),

    #[error("serve task failed: {0}")]
    Serve(#[from] std::io::Error),

    #[error("serve task did not finish cleanly: {0}")]
    Task(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Canned-response HTTP server for the crossword front end.
pub struct StubServer {
    listener: ListenerConfig,
    table: Arc<RouteTable>,
    state: ServerState,
    shutdown: Shutdown,
    local_addr: Option<SocketAddr>,
    task: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl StubServer {
    /// Validate `config` and build the route table. Nothing is bound yet.
    pub fn new(config: &StubConfig) -> Result<Self, StubError> {
        validate_config(config).map_err(StubError::Config)?;
        let table = RouteTable::from_config(&config.routes, config.not_found_body.clone())?;
        Ok(Self::with_table(config.listener.clone(), table))
    }

    /// Serve an already built table.
    pub fn with_table(listener: ListenerConfig, table: RouteTable) -> Self {
        Self {
            listener,
            table: Arc::new(table),
            state: ServerState::Stopped,
            shutdown: Shutdown::new(),
            local_addr: None,
            task: None,
        }
    }

    /// Bind the listener and start serving in the background.
    ///
    /// Returns the bound address once connections are being accepted.
    pub async fn start(&mut self) -> Result<SocketAddr, StubError> {
        if self.state != ServerState::Stopped {
            return Err(StubError::AlreadyRunning(self.state));
        }
        self.state = ServerState::Starting;

        let (listener, local_addr) = match self.bind().await {
            Ok(bound) => bound,
            Err(source) => {
                self.state = ServerState::Stopped;
                let address = self.listener.address();
                tracing::error!(address = %address, error = %source, "Failed to bind stub server");
                return Err(StubError::Bind { address, source });
            }
        };

        self.shutdown = Shutdown::new();
        let shutdown_rx = self.shutdown.subscribe();
        let server = HttpServer::new(self.table.clone());
        self.task = Some(tokio::spawn(server.run(listener, shutdown_rx)));
        self.local_addr = Some(local_addr);
        self.state = ServerState::Running;

        tracing::info!(
            address = %local_addr,
            routes = self.table.len(),
            "Stub server running"
        );
        Ok(local_addr)
    }

    async fn bind(&self) -> Result<(TcpListener, SocketAddr), std::io::Error> {
        let listener = TcpListener::bind((self.listener.host.as_str(), self.listener.port)).await?;
        let local_addr = listener.local_addr()?;
        Ok((listener, local_addr))
    }

    /// Stop serving and release the listener. Safe to call in any state.
    pub async fn stop(&mut self) -> Result<(), StubError> {
        let Some(mut task) = self.task.take() else {
            self.state = ServerState::Stopped;
            return Ok(());
        };

        self.state = ServerState::Stopping;
        self.shutdown.trigger();

        let grace = Duration::from_secs(self.listener.shutdown_timeout_secs);
        let result = match tokio::time::timeout(grace, &mut task).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(e))) => Err(StubError::Serve(e)),
            Ok(Err(e)) => Err(StubError::Task(e.to_string())),
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.listener.shutdown_timeout_secs,
                    "Graceful shutdown timed out, aborting serve task"
                );
                task.abort();
                Ok(())
            }
        };

        self.state = ServerState::Stopped;
        self.local_addr = None;
        tracing::info!("Stub server stopped");
        result
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// `http://ip:port` while running; what the front end's backend URL is set to.
    pub fn base_url(&self) -> Option<String> {
        self.local_addr.map(|addr| format!("http://{addr}"))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.shutdown.trigger();
        }
    }
}
