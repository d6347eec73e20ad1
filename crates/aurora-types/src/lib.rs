//! Shared type definitions for the Aurora escape-room coordinator.
//!
//! This crate is the single source of truth for the data contract
//! between the coordinator server and its observer screens. Types
//! defined here flow downstream to `TypeScript` via `ts-rs` for the
//! browser client.
//!
//! # Modules
//!
//! - [`codes`] -- Redeemable code entry records (recovery + QR)
//! - [`state`] -- The authoritative [`GameState`] record
//! - [`protocol`] -- `WebSocket` message envelopes
//!
//! [`GameState`]: state::GameState

pub mod codes;
pub mod protocol;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use codes::{QrCode, RecoveryCode};
pub use protocol::{ClientMessage, ServerMessage};
pub use state::GameState;
