//! Error types for the persistence layer.
//!
//! All errors are propagated via [`SnapshotError`]. Callers on the
//! request path never see these: snapshot writes are fire-and-forget
//! and failures are logged, then retried on the next autosave cycle.

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// A filesystem operation failed.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or deserialization error.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
