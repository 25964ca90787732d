//! OS signal handling.

/// Wait for Ctrl+C.
///
/// If the handler cannot be installed the error is logged and this returns at once.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
