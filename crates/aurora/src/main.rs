//! Coordinator binary for the Aurora escape room.
//!
//! This is the main entry point that wires together the code registry,
//! game store, snapshot persistence, and the HTTP/`WebSocket` server.
//! It loads configuration, restores the last snapshot if one exists,
//! and serves until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `aurora-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the code registry from config
//! 4. Restore the last snapshot, or start a fresh game
//! 5. Create the shared application state
//! 6. Spawn the autosave loop
//! 7. Spawn the HTTP/`WebSocket` server
//! 8. Wait for Ctrl-C, then take a final snapshot and exit

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use aurora_core::{CodeRegistry, CoordinatorConfig, GameStore};
use aurora_persist::SnapshotStore;
use aurora_server::AppState;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::HostError;

/// Application entry point for the coordinator.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the shutdown
/// signal handler cannot be installed.
#[tokio::main]
async fn main() -> Result<(), HostError> {
    // 1. Load configuration (before logging, so the configured level
    //    can seed the filter).
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config
    //    file when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("aurora coordinator starting");
    info!(
        host = config.server.host,
        port = config.server.port,
        snapshot_path = config.persistence.snapshot_path,
        autosave_interval_secs = config.persistence.autosave_interval_secs,
        "Configuration loaded"
    );

    // 3. Build the code registry.
    let registry: CodeRegistry = config.registry.clone().into();
    info!(
        recovery_count = registry.recovery_codes().len(),
        qr_count = registry.qr_codes().len(),
        "Code registry initialized"
    );

    // 4. Restore the last snapshot, or start fresh.
    let snapshots = SnapshotStore::new(config.persistence.snapshot_path.clone());
    let store = match snapshots.load().await {
        Some(collections) => {
            info!(
                path = %snapshots.path().display(),
                "Game state restored from snapshot"
            );
            GameStore::restore(registry, collections)
        }
        None => {
            info!("No usable snapshot, starting a fresh game");
            GameStore::new(registry)
        }
    };

    // 5. Create the shared application state.
    let app_state = Arc::new(AppState::with_snapshots(store, snapshots.clone()));

    // 6. Spawn the autosave loop.
    let autosave_handle = aurora_persist::spawn_autosave(
        snapshots.clone(),
        Arc::clone(&app_state.game),
        Duration::from_secs(config.persistence.autosave_interval_secs),
    );

    // 7. Spawn the server.
    let server_handle = aurora_server::spawn_server(config.server.clone(), Arc::clone(&app_state));
    info!("Coordinator server task spawned");

    // 8. Wait for Ctrl-C, then persist one last time so a restart
    //    resumes mid-game.
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    autosave_handle.abort();
    server_handle.abort();

    let mut final_state = app_state.game.read().await.state();
    final_state.timestamp = Utc::now();
    if let Err(e) = snapshots.save(&final_state).await {
        warn!(error = %e, "final snapshot save failed");
    }

    info!("aurora coordinator shutdown complete");
    Ok(())
}

/// Load the coordinator configuration from `aurora-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
/// A missing file is not an error: defaults match the reference
/// deployment.
fn load_config() -> Result<CoordinatorConfig, HostError> {
    let config_path = Path::new("aurora-config.yaml");
    if config_path.exists() {
        let config = CoordinatorConfig::from_file(config_path)?;
        Ok(config)
    } else {
        let mut config = CoordinatorConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}
