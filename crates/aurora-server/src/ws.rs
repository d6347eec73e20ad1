//! `WebSocket` handler for live observer screens.
//!
//! Clients connect to `GET /ws` and immediately receive the current
//! full [`GameState`](aurora_types::GameState). From then on they get a
//! fresh full snapshot after every effective mutation, plus the
//! edge-triggered `all-qr-scanned` notification. Submission status
//! messages go only to the submitting socket.
//!
//! Connecting increments the shared player counter; disconnecting
//! decrements it (clamped at zero). Both changes are broadcast so every
//! screen shows the same head count.
//!
//! If a client falls behind, lagged messages are silently skipped and
//! the client resumes from the most recent snapshot -- safe, because
//! every push is a full-state replacement.

use std::sync::Arc;

use aurora_types::{ClientMessage, ServerMessage};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and join the
/// game as an observer.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_game(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle one observer connection for its whole lifetime.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let conn_id = Uuid::new_v4();
    info!(%conn_id, "observer connected");

    let mut rx = state.subscribe();

    // Join: count the new screen, give it the current state, and let
    // everyone else see the updated player count.
    let snapshot = {
        let mut game = state.game.write().await;
        game.increment_players();
        let snapshot = game.state();
        state.broadcast_state(snapshot.clone());
        snapshot
    };
    if send_message(&mut socket, &ServerMessage::GameState { state: snapshot })
        .await
        .is_err()
    {
        leave(&state, conn_id).await;
        return;
    }

    loop {
        tokio::select! {
            // Fan-out from the broadcast channel.
            result = rx.recv() => {
                match result {
                    Ok(message) => {
                        if send_message(&mut socket, &message).await.is_err() {
                            debug!(%conn_id, "observer disconnected (send failed)");
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(%conn_id, skipped = n, "observer lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!(%conn_id, "broadcast channel closed, shutting down socket");
                        break;
                    }
                }
            }
            // Inbound traffic from this observer.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_message(&mut socket, &state, conn_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%conn_id, "observer disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%conn_id, "observer closed the connection");
                        break;
                    }
                    Some(Err(e)) => {
                        debug!(%conn_id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {
                        // Ignore binary frames and pongs.
                    }
                }
            }
        }
    }

    leave(&state, conn_id).await;
}

/// Apply one inbound client message.
///
/// Malformed payloads are logged and dropped; the protocol never
/// answers garbage with an error frame.
async fn handle_client_message(
    socket: &mut WebSocket,
    state: &Arc<AppState>,
    conn_id: Uuid,
    text: &str,
) {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            warn!(%conn_id, error = %e, "ignoring malformed client message");
            return;
        }
    };

    match message {
        ClientMessage::SubmitRecoveryCode { code } => {
            let outcome = {
                let mut game = state.game.write().await;
                let outcome = game.submit_recovery_code(&code);
                if outcome.changed {
                    state.broadcast_state(game.state());
                }
                outcome
            };
            let status = ServerMessage::RecoveryCodeStatus {
                code,
                success: outcome.success,
            };
            let _ = send_message(socket, &status).await;
        }
        ClientMessage::ScanQr { code } => {
            let outcome = {
                let mut game = state.game.write().await;
                let outcome = game.submit_scan_code(&code);
                if outcome.changed {
                    state.broadcast_state(game.state());
                }
                if let Some(final_code) = outcome.completion.clone() {
                    state.broadcast(ServerMessage::AllQrScanned { final_code });
                }
                outcome
            };
            let status = ServerMessage::QrScanStatus {
                code,
                success: outcome.success,
            };
            let _ = send_message(socket, &status).await;
        }
        ClientMessage::RequestGameState => {
            let snapshot = state.game.read().await.state();
            let _ = send_message(socket, &ServerMessage::GameState { state: snapshot }).await;
        }
    }
}

/// Leave: uncount the screen and let the remaining observers know.
async fn leave(state: &Arc<AppState>, conn_id: Uuid) {
    info!(%conn_id, "observer disconnected");
    let mut game = state.game.write().await;
    game.decrement_players();
    state.broadcast_state(game.state());
}

/// Serialize and send one server message as a text frame.
async fn send_message(
    socket: &mut WebSocket,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(message) {
        Ok(j) => j,
        Err(e) => {
            warn!("failed to serialize server message: {e}");
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}
