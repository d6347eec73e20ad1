//! Error types for the coordinator binary.

use aurora_core::ConfigError;

/// Errors that can abort coordinator startup or shutdown.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The shutdown signal handler failed to install.
    #[error("signal error: {0}")]
    Signal(#[from] std::io::Error),
}
