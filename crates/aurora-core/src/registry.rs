//! The static code registry for a deployment.
//!
//! A registry is the fixed menu of valid codes for one game build: the
//! recovery set, the scan (QR) set, and the single designated final
//! hidden code revealed when every QR code has been scanned. Values are
//! decided at deployment time (via config); changing them means
//! redeploying, not a runtime operation.
//!
//! Uniqueness within each set is an implementer contract and is not
//! enforced at runtime.

use aurora_types::{QrCode, RecoveryCode};

/// Recovery codes handed out through the puzzle trail (mails, notes).
const DEFAULT_RECOVERY_CODES: [&str; 10] = [
    "4821", "9153", "6158", "2049", "7385", "1593", "8264", "4710", "5937", "0682",
];

/// Codes embedded in the printed QR images hidden around the room.
const DEFAULT_QR_CODES: [&str; 15] = [
    "R3C0V3R", "K3YF1ND3", "L0CKB0X1", "C0D3HUN7", "UNL0CKM3", "S3CR3T42", "P4ZZL3X1", "D4T4L0CK",
    "F1L3K3Y7", "CLU3S3EK", "TR34SUR3", "G4M3C0D3", "QRC0D3ME", "H4CKTH1S", "S0LV3M31",
];

/// Revealed to all screens once the QR set is complete.
const DEFAULT_FINAL_HIDDEN_CODE: &str = "6158";

/// The read-only code sets for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRegistry {
    recovery_codes: Vec<String>,
    qr_codes: Vec<String>,
    final_hidden_code: String,
}

impl CodeRegistry {
    /// Build a registry from explicit code lists.
    pub const fn new(
        recovery_codes: Vec<String>,
        qr_codes: Vec<String>,
        final_hidden_code: String,
    ) -> Self {
        Self {
            recovery_codes,
            qr_codes,
            final_hidden_code,
        }
    }

    /// The ordered recovery code values.
    pub fn recovery_codes(&self) -> &[String] {
        &self.recovery_codes
    }

    /// The ordered scan (QR) code values.
    pub fn qr_codes(&self) -> &[String] {
        &self.qr_codes
    }

    /// The final hidden code revealed on QR-set completion.
    pub fn final_hidden_code(&self) -> &str {
        &self.final_hidden_code
    }

    /// A fresh all-false recovery collection in registry order.
    pub fn fresh_recovery_codes(&self) -> Vec<RecoveryCode> {
        self.recovery_codes
            .iter()
            .map(|c| RecoveryCode::fresh(c.as_str()))
            .collect()
    }

    /// A fresh all-false QR collection in registry order.
    pub fn fresh_qr_codes(&self) -> Vec<QrCode> {
        self.qr_codes.iter().map(|c| QrCode::fresh(c.as_str())).collect()
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self {
            recovery_codes: DEFAULT_RECOVERY_CODES.iter().map(ToString::to_string).collect(),
            qr_codes: DEFAULT_QR_CODES.iter().map(ToString::to_string).collect(),
            final_hidden_code: DEFAULT_FINAL_HIDDEN_CODE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_matches_deployment_values() {
        let registry = CodeRegistry::default();
        assert_eq!(registry.recovery_codes().len(), 10);
        assert_eq!(registry.qr_codes().len(), 15);
        assert_eq!(registry.final_hidden_code(), "6158");
        assert!(registry.qr_codes().iter().any(|c| c == "R3C0V3R"));
    }

    #[test]
    fn fresh_collections_preserve_order_and_start_false() {
        let registry = CodeRegistry::new(
            vec![String::from("1111"), String::from("2222")],
            vec![String::from("AAA"), String::from("BBB")],
            String::from("9999"),
        );

        let recovery = registry.fresh_recovery_codes();
        let codes: Vec<&str> = recovery.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["1111", "2222"]);
        assert!(recovery.iter().all(|c| !c.entered));

        let qr = registry.fresh_qr_codes();
        let codes: Vec<&str> = qr.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["AAA", "BBB"]);
        assert!(qr.iter().all(|c| !c.scanned));
    }
}
