//! Redeemable code entries for the two code collections.
//!
//! A game ships with two independent collections: recovery codes, which
//! players type in by hand, and QR codes, which players redeem by
//! scanning. Both are simple `code` + flag records; identity is the
//! `code` value, unique within its collection. The flag field names
//! (`entered` vs `scanned`) are part of the persisted and broadcast JSON
//! layout and must not change.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A recovery code slot: typed in by a player at the recovery console.
///
/// Lookups against this collection are exact-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RecoveryCode {
    /// The code value players must type in.
    pub code: String,
    /// Whether a player has entered this code.
    pub entered: bool,
}

impl RecoveryCode {
    /// Create a fresh, not-yet-entered slot for `code`.
    pub fn fresh(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            entered: false,
        }
    }
}

/// A QR code slot: redeemed by being found and scanned.
///
/// Lookups against this collection are case-insensitive; submitted
/// values are uppercased before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QrCode {
    /// The code value embedded in the printed QR image.
    pub code: String,
    /// Whether a player has scanned this code.
    pub scanned: bool,
}

impl QrCode {
    /// Create a fresh, not-yet-scanned slot for `code`.
    pub fn fresh(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            scanned: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_code_json_uses_entered_flag() {
        let entry = RecoveryCode::fresh("4821");
        let json = serde_json::to_value(&entry).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "code": "4821", "entered": false }))
        );
    }

    #[test]
    fn qr_code_json_uses_scanned_flag() {
        let entry = QrCode::fresh("R3C0V3R");
        let json = serde_json::to_value(&entry).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "code": "R3C0V3R", "scanned": false }))
        );
    }
}
