//! Axum router construction for the coordinator API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled so the browser client can be served
//! from a different origin during development.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::print;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the coordinator server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws` -- `WebSocket` live state stream
/// - `GET /state` -- full game state
/// - `GET /recovery-codes`, `GET /qr-codes` -- collection reads
/// - `POST /submit-recovery-code`, `POST /submit-qr-code` -- submissions
/// - `POST /reset` -- reset everything
/// - `POST /admin/toggle-recovery-code`, `POST /admin/toggle-qr-code`
/// - `GET /print-qr` -- printable QR sheet
///
/// CORS is configured to allow any origin; submissions are
/// deliberately unauthenticated (party-game trust model).
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_game))
        // REST API
        .route("/state", get(handlers::get_state))
        .route("/reset", post(handlers::reset))
        .route("/recovery-codes", get(handlers::get_recovery_codes))
        .route("/submit-recovery-code", post(handlers::submit_recovery_code))
        .route("/qr-codes", get(handlers::get_qr_codes))
        .route("/submit-qr-code", post(handlers::submit_qr_code))
        .route("/print-qr", get(print::print_qr))
        .route(
            "/admin/toggle-recovery-code",
            post(handlers::toggle_recovery_code),
        )
        .route("/admin/toggle-qr-code", post(handlers::toggle_qr_code))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
