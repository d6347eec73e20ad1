//! The authoritative shared game state record.
//!
//! Exactly one [`GameState`] exists per running coordinator. It is owned
//! by the store in `aurora-core`; everything observers ever receive is a
//! full clone of this record, never a delta. The JSON field names below
//! are the on-disk snapshot layout and the broadcast layout at the same
//! time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::codes::{QrCode, RecoveryCode};

/// Full shared progress state for one running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// When this state was last stamped (mutation or snapshot time).
    pub timestamp: DateTime<Utc>,
    /// Number of currently connected observer screens. Never negative.
    pub player_count: u32,
    /// The recovery code collection, in registry order.
    pub recovery_codes: Vec<RecoveryCode>,
    /// The QR code collection, in registry order.
    pub qr_codes: Vec<QrCode>,
}

impl GameState {
    /// Whether every QR code in the collection has been scanned.
    pub fn all_qr_scanned(&self) -> bool {
        self.qr_codes.iter().all(|c| c.scanned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameState {
        GameState {
            timestamp: Utc::now(),
            player_count: 2,
            recovery_codes: vec![RecoveryCode::fresh("4821")],
            qr_codes: vec![
                QrCode {
                    code: String::from("AAA"),
                    scanned: true,
                },
                QrCode::fresh("BBB"),
            ],
        }
    }

    #[test]
    fn json_layout_is_camel_case() {
        let state = sample();
        let json = serde_json::to_value(&state).unwrap_or_default();
        assert!(json.get("playerCount").is_some());
        assert!(json.get("recoveryCodes").is_some());
        assert!(json.get("qrCodes").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn all_qr_scanned_requires_every_flag() {
        let mut state = sample();
        assert!(!state.all_qr_scanned());
        for c in &mut state.qr_codes {
            c.scanned = true;
        }
        assert!(state.all_qr_scanned());
    }

    #[test]
    fn empty_qr_collection_counts_as_scanned() {
        let mut state = sample();
        state.qr_codes.clear();
        assert!(state.all_qr_scanned());
    }
}
