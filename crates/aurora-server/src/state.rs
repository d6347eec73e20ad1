//! Shared application state for the coordinator server.
//!
//! [`AppState`] couples the single-writer [`GameStore`] with the
//! broadcast channel that fans state updates out to every connected
//! observer screen. It is explicitly constructed (in `main` or in
//! tests) and injected via Axum's `State` extractor; there is no
//! module-level singleton.

use std::sync::Arc;

use aurora_core::GameStore;
use aurora_persist::SnapshotStore;
use aurora_types::{GameState, ServerMessage};
use tokio::sync::{broadcast, RwLock};

/// Capacity of the broadcast channel for state updates.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message. Full-state replacement semantics make that safe: the
/// newest snapshot supersedes everything skipped.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and shared between HTTP handlers, `WebSocket`
/// tasks, and the autosave loop. Mutations take the write lock for the
/// whole read-modify-broadcast unit, which keeps them externally
/// serializable on a multi-threaded runtime.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The authoritative game state store.
    pub game: Arc<RwLock<GameStore>>,
    /// Broadcast sender for observer-facing messages.
    pub tx: broadcast::Sender<ServerMessage>,
    /// Snapshot store for reset-triggered immediate saves. `None` in
    /// tests that do not touch the filesystem.
    pub snapshots: Option<SnapshotStore>,
}

impl AppState {
    /// Create application state around an existing store, without
    /// snapshot persistence.
    pub fn new(store: GameStore) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            game: Arc::new(RwLock::new(store)),
            tx,
            snapshots: None,
        }
    }

    /// Create application state with a snapshot store attached.
    pub fn with_snapshots(store: GameStore, snapshots: SnapshotStore) -> Self {
        let mut state = Self::new(store);
        state.snapshots = Some(snapshots);
        state
    }

    /// Subscribe to the observer broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.tx.subscribe()
    }

    /// Publish a message to all connected observers.
    ///
    /// Returns the number of receivers that got the message. Zero
    /// receivers is normal (no screens connected), not an error.
    pub fn broadcast(&self, message: ServerMessage) -> usize {
        self.tx.send(message).unwrap_or(0)
    }

    /// Publish a full-state snapshot to all connected observers.
    pub fn broadcast_state(&self, state: GameState) -> usize {
        self.broadcast(ServerMessage::GameState { state })
    }

    /// Persist `state` immediately on a background task, if a snapshot
    /// store is attached. Fire-and-forget: never blocks the caller.
    pub fn persist_now(&self, state: GameState) {
        if let Some(store) = &self.snapshots {
            aurora_persist::save_in_background(store.clone(), state);
        }
    }
}

#[cfg(test)]
mod tests {
    use aurora_core::CodeRegistry;

    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_subscriber() {
        let state = AppState::new(GameStore::new(CodeRegistry::default()));
        let mut rx = state.subscribe();

        let snapshot = state.game.read().await.state();
        let receivers = state.broadcast_state(snapshot);
        assert_eq!(receivers, 1);

        let received = rx.recv().await.ok();
        assert!(matches!(received, Some(ServerMessage::GameState { .. })));
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_is_not_an_error() {
        let state = AppState::new(GameStore::new(CodeRegistry::default()));
        let snapshot = state.game.read().await.state();
        assert_eq!(state.broadcast_state(snapshot), 0);
    }
}
