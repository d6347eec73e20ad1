//! Coordinator HTTP server lifecycle management.
//!
//! [`start_server`] binds a TCP listener and runs the Axum server until
//! the process terminates; [`spawn_server`] launches it on a background
//! Tokio task so the binary can keep the main task for shutdown
//! handling and the final best-effort persist.

use std::net::SocketAddr;
use std::sync::Arc;

use aurora_core::config::ServerConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur when starting or running the coordinator server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Start the coordinator HTTP server.
///
/// Binds to the configured address, builds the router, and serves
/// requests until the process is terminated.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "coordinator server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Spawn the coordinator HTTP server on a background Tokio task.
///
/// The server runs until the Tokio runtime is shut down or the task is
/// aborted. The caller should hold the returned handle and abort or
/// await it during clean shutdown.
pub fn spawn_server(config: ServerConfig, state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = start_server(&config, state).await {
            tracing::error!(error = %e, "coordinator server exited with error");
        }
    })
}
