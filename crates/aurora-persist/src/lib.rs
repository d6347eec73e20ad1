//! Persistence layer for the Aurora escape-room coordinator.
//!
//! Durability here is deliberately modest: the full game state is
//! snapshotted to one JSON file, periodically and after resets. The
//! acceptable staleness window is one autosave interval. Everything is
//! best-effort; a lost write costs at most a few seconds of progress in
//! a party game.
//!
//! # Modules
//!
//! - [`snapshot`] -- the snapshot file reader/writer
//! - [`autosave`] -- the periodic background save loop
//! - [`error`] -- shared error types

pub mod autosave;
pub mod error;
pub mod snapshot;

// Re-export primary types for convenience.
pub use autosave::{save_in_background, spawn_autosave};
pub use error::SnapshotError;
pub use snapshot::SnapshotStore;
