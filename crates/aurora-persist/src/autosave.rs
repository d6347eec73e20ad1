//! Periodic autosave of the game state to the snapshot file.
//!
//! The autosave loop runs on a background Tokio task and writes the
//! full state every interval (reference behavior: 10 seconds). Writes
//! are fire-and-forget relative to request handling: a slow or failing
//! disk never blocks mutations or broadcasts, and a failed write is
//! simply retried on the next cycle. There is no backoff and no
//! alerting beyond a warning log.

use std::sync::Arc;
use std::time::Duration;

use aurora_core::GameStore;
use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::snapshot::SnapshotStore;

/// Spawn the periodic autosave task.
///
/// Every `interval`, clones the current state under a read lock,
/// stamps it with the save time, and writes it out. Returns a
/// [`JoinHandle`] so the caller can abort the loop on shutdown.
pub fn spawn_autosave(
    store: SnapshotStore,
    game: Arc<RwLock<GameStore>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; that initial write is
        // harmless and doubles as a startup sanity check of the path.
        loop {
            ticker.tick().await;
            let mut state = game.read().await.state();
            state.timestamp = Utc::now();
            if let Err(e) = store.save(&state).await {
                warn!(error = %e, "autosave failed, will retry next cycle");
            }
        }
    })
}

/// Persist `state` on a background task, immediately.
///
/// Used after `reset()`, which must not wait for the periodic cycle.
/// Failures are logged and absorbed; the in-memory state and the
/// in-flight response are unaffected.
pub fn save_in_background(store: SnapshotStore, state: aurora_types::GameState) {
    tokio::spawn(async move {
        if let Err(e) = store.save(&state).await {
            warn!(error = %e, "immediate snapshot save failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use aurora_core::CodeRegistry;

    use super::*;

    fn temp_path(test_name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "aurora_autosave_{}_{}.json",
            test_name,
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn autosave_writes_within_interval() {
        let path = temp_path("writes");
        let store = SnapshotStore::new(&path);
        let game = Arc::new(RwLock::new(GameStore::new(CodeRegistry::default())));

        let handle = spawn_autosave(store.clone(), Arc::clone(&game), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.abort();

        let restored = store.load().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(restored.is_some());
    }

    #[tokio::test]
    async fn background_save_lands_on_disk() {
        let path = temp_path("background");
        let store = SnapshotStore::new(&path);
        let game = GameStore::new(CodeRegistry::default());

        save_in_background(store.clone(), game.state());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let restored = store.load().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(restored.is_some());
    }
}
