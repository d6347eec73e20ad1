//! WebSocket message types exchanged with observer screens.
//!
//! Messages are JSON with a `type` discriminator in kebab-case, matching
//! the event names the browser client listens for. Server messages are
//! either directed at one socket (submission status) or fanned out to
//! every connected observer (full state, completion notification).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::state::GameState;

/// Messages pushed from the coordinator to observer screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum ServerMessage {
    /// Full-state snapshot. Sent to every observer on each effective
    /// mutation, to a new connection once, and on explicit request.
    GameState {
        /// The complete current state.
        state: GameState,
    },

    /// Outcome of a recovery code submission, sent only to the
    /// submitting socket.
    RecoveryCodeStatus {
        /// The code value as submitted.
        code: String,
        /// Whether the code was recognized.
        success: bool,
    },

    /// Outcome of a QR scan submission, sent only to the submitting
    /// socket.
    QrScanStatus {
        /// The code value as submitted.
        code: String,
        /// Whether the code was recognized.
        success: bool,
    },

    /// Every QR code has now been scanned. Edge-triggered: emitted to
    /// all observers exactly once per completion, carrying the final
    /// hidden code from the registry.
    AllQrScanned {
        /// The designated final hidden code.
        #[serde(rename = "finalCode")]
        final_code: String,
    },
}

/// Messages received from observer screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum ClientMessage {
    /// A player typed a recovery code at this screen.
    SubmitRecoveryCode {
        /// The code value, matched exact-case.
        code: String,
    },

    /// A player scanned a QR code with this screen.
    ScanQr {
        /// The code value, uppercased before matching.
        code: String,
    },

    /// Ask for an on-demand push of the current full state.
    RequestGameState,
}
