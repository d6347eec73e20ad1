//! Coordinator server for the Aurora escape room.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) pushing the full [`GameState`]
//!   to every observer screen after each effective mutation, via
//!   [`tokio::sync::broadcast`]
//! - **REST endpoints** for submissions, admin toggles, reset, and
//!   state reads
//! - **Printable QR sheet** (`GET /print-qr`)
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! Observers never receive deltas: every push is a complete state
//! snapshot, so a slow or reconnecting screen converges by simply
//! applying the latest message. Mutations hold the store's write lock
//! for the whole read-modify-broadcast unit, preserving the sequential
//! semantics the game logic assumes.
//!
//! [`GameState`]: aurora_types::GameState

pub mod error;
pub mod handlers;
pub mod print;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{spawn_server, start_server, ServerError};
pub use state::AppState;
