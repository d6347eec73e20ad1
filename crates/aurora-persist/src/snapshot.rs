//! JSON snapshot file storage for the game state.
//!
//! The whole [`GameState`] is written as one pretty-printed JSON
//! document. On restore, only the two code collections are adopted
//! (and only when both are structurally present); player count and
//! timestamp always start fresh. A missing or unreadable file is not
//! an error, it just means a fresh game.

use std::path::{Path, PathBuf};

use aurora_core::RestoredCollections;
use aurora_types::{GameState, QrCode, RecoveryCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::SnapshotError;

/// Permissive on-disk layout used for restore.
///
/// Deserialized separately from [`GameState`] so a snapshot missing
/// either collection (or written by an older build) degrades to a
/// fresh start instead of a parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    recovery_codes: Option<Vec<RecoveryCode>>,
    #[serde(default)]
    qr_codes: Option<Vec<QrCode>>,
}

/// Reads and writes the game state snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `state` to the snapshot file as pretty JSON.
    ///
    /// The serialized timestamp is the state's own timestamp; callers
    /// that want save-time stamping refresh it before calling.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if serialization or the file write
    /// fails. Callers on the request path log and ignore this; the
    /// next autosave cycle retries naturally.
    pub async fn save(&self, state: &GameState) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "game state snapshot written");
        Ok(())
    }

    /// Load the code collections from the snapshot file, if usable.
    ///
    /// Returns `None` when the file is absent, unreadable, not valid
    /// JSON, or missing either collection. All failure modes are
    /// logged and absorbed; restore never aborts startup.
    pub async fn load(&self) -> Option<RestoredCollections> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file, starting fresh");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read saved game state");
                return None;
            }
        };

        let raw: RawSnapshot = match serde_json::from_slice(&contents) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not parse saved game state");
                return None;
            }
        };

        match (raw.recovery_codes, raw.qr_codes) {
            (Some(recovery_codes), Some(qr_codes)) => {
                info!(path = %self.path.display(), "loaded saved game state");
                Some(RestoredCollections {
                    recovery_codes,
                    qr_codes,
                })
            }
            _ => {
                warn!(path = %self.path.display(), "snapshot missing code collections, starting fresh");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use aurora_core::{CodeRegistry, GameStore};
    use chrono::Utc;

    use super::*;

    fn temp_path(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "aurora_snapshot_{}_{}.json",
            test_name,
            std::process::id()
        ))
    }

    fn sample_state() -> GameState {
        let mut store = GameStore::new(CodeRegistry::new(
            vec![String::from("4821")],
            vec![String::from("AAA"), String::from("BBB")],
            String::from("6158"),
        ));
        store.submit_recovery_code("4821");
        store.submit_scan_code("aaa");
        store.increment_players();
        store.state()
    }

    #[tokio::test]
    async fn round_trip_reproduces_collections() {
        let path = temp_path("round_trip");
        let store = SnapshotStore::new(&path);
        let state = sample_state();

        assert!(store.save(&state).await.is_ok());
        let restored = store.load().await;
        let _ = tokio::fs::remove_file(&path).await;

        let restored = restored.unwrap_or(RestoredCollections {
            recovery_codes: Vec::new(),
            qr_codes: Vec::new(),
        });
        assert_eq!(restored.recovery_codes, state.recovery_codes);
        assert_eq!(restored.qr_codes, state.qr_codes);
    }

    #[tokio::test]
    async fn missing_file_yields_none() {
        let store = SnapshotStore::new(temp_path("missing"));
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn invalid_json_yields_none() {
        let path = temp_path("invalid");
        let _ = tokio::fs::write(&path, b"not json {").await;
        let store = SnapshotStore::new(&path);
        let loaded = store.load().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn snapshot_missing_one_collection_yields_none() {
        let path = temp_path("partial");
        let partial = serde_json::json!({
            "timestamp": Utc::now(),
            "playerCount": 3,
            "recoveryCodes": [{ "code": "4821", "entered": true }],
        });
        let _ = tokio::fs::write(&path, partial.to_string()).await;
        let store = SnapshotStore::new(&path);
        let loaded = store.load().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn on_disk_layout_matches_reference() {
        let path = temp_path("layout");
        let store = SnapshotStore::new(&path);
        let state = sample_state();
        assert!(store.save(&state).await.is_ok());

        let bytes = tokio::fs::read(&path).await.unwrap_or_default();
        let _ = tokio::fs::remove_file(&path).await;
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_default();

        assert!(json.get("timestamp").is_some());
        assert_eq!(json.get("playerCount").and_then(serde_json::Value::as_u64), Some(1));
        let first_qr = json
            .get("qrCodes")
            .and_then(|v| v.get(0))
            .cloned()
            .unwrap_or_default();
        assert_eq!(first_qr.get("code").and_then(|v| v.as_str()), Some("AAA"));
        assert_eq!(first_qr.get("scanned").and_then(serde_json::Value::as_bool), Some(true));
    }
}
