//! REST API endpoint handlers for the coordinator server.
//!
//! All handlers operate on the shared [`AppState`]. Mutating handlers
//! hold the store's write lock across the whole read-modify-broadcast
//! unit so concurrent requests serialize cleanly, then release it
//! before any disk work. Validation failures (unknown or empty codes)
//! are 200 responses with `success: false`, never HTTP errors.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/state` | Full current game state |
//! | `GET` | `/recovery-codes` | The recovery collection |
//! | `POST` | `/submit-recovery-code` | Player submits a typed code |
//! | `GET` | `/qr-codes` | The QR collection |
//! | `POST` | `/submit-qr-code` | Player submits a scanned code |
//! | `POST` | `/reset` | Reset all state to initial values |
//! | `POST` | `/admin/toggle-recovery-code` | Operator flips a flag |
//! | `POST` | `/admin/toggle-qr-code` | Operator flips a flag |

use std::sync::Arc;

use aurora_types::{GameState, ServerMessage};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body structs
// ---------------------------------------------------------------------------

/// Request body for submission and toggle endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct CodeRequest {
    /// The code value. A missing or empty value is treated as a
    /// validation failure, never a transport error.
    #[serde(default)]
    pub code: String,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing game progress and API links.
///
/// The real player screens are the separate browser client; this page
/// is for operators poking at the server directly.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.game.read().await.state();
    let entered = snapshot.recovery_codes.iter().filter(|c| c.entered).count();
    let scanned = snapshot.qr_codes.iter().filter(|c| c.scanned).count();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Aurora Coordinator</title>
    <style>
        body {{ background: #0d1117; color: #c9d1d9; font-family: monospace; padding: 2rem; }}
        h1 {{ color: #58a6ff; }}
        a {{ color: #58a6ff; }}
    </style>
</head>
<body>
    <h1>Aurora Coordinator</h1>
    <p>Players connected: {players} | Recovery codes entered: {entered}/{recovery_total} | QR codes scanned: {scanned}/{qr_total}</p>
    <ul>
        <li><a href="/state">/state</a> -- full game state</li>
        <li><a href="/recovery-codes">/recovery-codes</a> -- recovery collection</li>
        <li><a href="/qr-codes">/qr-codes</a> -- QR collection</li>
        <li><a href="/print-qr">/print-qr</a> -- printable QR sheet</li>
    </ul>
    <p><code>ws://host:port/ws</code> -- live state stream</p>
</body>
</html>"#,
        players = snapshot.player_count,
        recovery_total = snapshot.recovery_codes.len(),
        qr_total = snapshot.qr_codes.len(),
    ))
}

// ---------------------------------------------------------------------------
// GET /state -- full current game state
// ---------------------------------------------------------------------------

/// Return the complete current [`GameState`].
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<GameState> {
    Json(state.game.read().await.state())
}

// ---------------------------------------------------------------------------
// GET /recovery-codes, GET /qr-codes -- collection reads
// ---------------------------------------------------------------------------

/// Return the current recovery collection.
pub async fn get_recovery_codes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let codes = state.game.read().await.recovery_codes();
    Json(serde_json::json!({ "recoveryCodes": codes }))
}

/// Return the current QR collection.
pub async fn get_qr_codes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let codes = state.game.read().await.qr_codes();
    Json(serde_json::json!({ "qrCodes": codes }))
}

// ---------------------------------------------------------------------------
// POST /submit-recovery-code -- player-facing submission
// ---------------------------------------------------------------------------

/// Submit a typed-in recovery code (exact-case lookup).
///
/// An effective submission pushes the full state to every observer;
/// an idempotent re-submission succeeds without a broadcast.
pub async fn submit_recovery_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CodeRequest>,
) -> impl IntoResponse {
    let (outcome, codes) = {
        let mut game = state.game.write().await;
        let outcome = game.submit_recovery_code(&body.code);
        if outcome.changed {
            state.broadcast_state(game.state());
        }
        (outcome, game.recovery_codes())
    };

    if outcome.success {
        Json(serde_json::json!({ "ok": true, "success": true, "recoveryCodes": codes }))
    } else {
        Json(serde_json::json!({
            "ok": false,
            "success": false,
            "message": "Invalid code",
            "recoveryCodes": codes,
        }))
    }
}

// ---------------------------------------------------------------------------
// POST /submit-qr-code -- player-facing submission
// ---------------------------------------------------------------------------

/// Submit a scanned QR code (the value is uppercased before lookup).
///
/// When this submission completes the QR set for the first time since
/// the last reset, the edge-triggered `all-qr-scanned` notification is
/// broadcast on top of the regular full-state push.
pub async fn submit_qr_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CodeRequest>,
) -> impl IntoResponse {
    let (outcome, codes) = {
        let mut game = state.game.write().await;
        let outcome = game.submit_scan_code(&body.code);
        if outcome.changed {
            state.broadcast_state(game.state());
        }
        if let Some(final_code) = outcome.completion.clone() {
            state.broadcast(ServerMessage::AllQrScanned { final_code });
        }
        (outcome, game.qr_codes())
    };

    if outcome.success {
        Json(serde_json::json!({ "ok": true, "success": true, "qrCodes": codes }))
    } else {
        Json(serde_json::json!({
            "ok": false,
            "success": false,
            "message": "Invalid code",
            "qrCodes": codes,
        }))
    }
}

// ---------------------------------------------------------------------------
// POST /reset -- back to initial values
// ---------------------------------------------------------------------------

/// Reset all state to initial values and persist immediately.
///
/// The forced save does not wait for the periodic autosave cycle, and
/// runs on a background task so a slow disk never delays the response.
pub async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = {
        let mut game = state.game.write().await;
        game.reset();
        let snapshot = game.state();
        state.broadcast_state(snapshot.clone());
        snapshot
    };
    state.persist_now(snapshot);
    Json(serde_json::json!({ "ok": true }))
}

// ---------------------------------------------------------------------------
// POST /admin/toggle-* -- operator interface
// ---------------------------------------------------------------------------

/// Unconditionally flip a recovery code's flag (operator tool).
///
/// Always broadcasts and always reports `ok`, even for an unknown code
/// (which is a no-op on the collection).
pub async fn toggle_recovery_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CodeRequest>,
) -> impl IntoResponse {
    let codes = {
        let mut game = state.game.write().await;
        let _ = game.toggle_recovery_code(&body.code);
        state.broadcast_state(game.state());
        game.recovery_codes()
    };
    Json(serde_json::json!({ "ok": true, "recoveryCodes": codes }))
}

/// Unconditionally flip a QR code's flag (operator tool).
pub async fn toggle_qr_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CodeRequest>,
) -> impl IntoResponse {
    let codes = {
        let mut game = state.game.write().await;
        let _ = game.toggle_scan_code(&body.code);
        state.broadcast_state(game.state());
        game.qr_codes()
    };
    Json(serde_json::json!({ "ok": true, "qrCodes": codes }))
}
