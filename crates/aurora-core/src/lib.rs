//! Core domain logic for the Aurora escape-room coordinator.
//!
//! This crate owns the authoritative game state and the rules for
//! mutating it:
//!
//! - [`registry`] -- the fixed code sets for a deployment
//! - [`store`] -- the single-writer [`GameStore`] with the idempotent
//!   mutation API and the edge-triggered completion detector
//! - [`config`] -- YAML configuration loading
//!
//! Everything network-facing lives in `aurora-server`; everything disk
//! related lives in `aurora-persist`. The store is deliberately plain
//! synchronous Rust so tests can drive it without a runtime.
//!
//! [`GameStore`]: store::GameStore

pub mod config;
pub mod registry;
pub mod store;

// Re-export primary types for convenience.
pub use config::{ConfigError, CoordinatorConfig};
pub use registry::CodeRegistry;
pub use store::{GameStore, RestoredCollections, ScanOutcome, SubmitOutcome};
