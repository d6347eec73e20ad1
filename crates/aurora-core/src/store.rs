//! The single-writer game state store and its mutation API.
//!
//! [`GameStore`] owns the one authoritative [`GameState`] per process.
//! All mutations go through the narrow methods here; callers only ever
//! see defensive clones. The store itself is synchronous and lock-free:
//! the server wraps it in an `RwLock` and holds the write guard across
//! each read-modify-broadcast unit, so mutations apply in a single
//! serializable order no matter how many requests race.
//!
//! Submissions are idempotent-intent: re-submitting an already-redeemed
//! code reports success without changing state. Only the admin toggle
//! operations flip flags unconditionally.
//!
//! # Completion detection
//!
//! The "all QR codes scanned" notification is edge-triggered. The store
//! keeps an explicit latch (`all_qr_announced`) rather than recomputing
//! the predicate, because recomputation alone cannot distinguish a fresh
//! completion from a resubmission. The latch is cleared only by
//! [`GameStore::reset`], so a subsequent completion fires again.

use aurora_types::{GameState, QrCode, RecoveryCode};
use chrono::Utc;
use tracing::{debug, info};

use crate::registry::CodeRegistry;

/// Result of an idempotent code submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Whether the code was recognized (including re-submissions).
    pub success: bool,
    /// Whether this submission actually flipped a flag.
    pub changed: bool,
}

/// Result of a QR scan submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Whether the code was recognized (including re-submissions).
    pub success: bool,
    /// Whether this submission actually flipped a flag.
    pub changed: bool,
    /// `Some(final_hidden_code)` when this submission completed the QR
    /// set for the first time since the last reset.
    pub completion: Option<String>,
}

/// Restored code collections adopted from a persisted snapshot.
///
/// Only the two collections survive a restart; player count and
/// timestamp are always reinitialized fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredCollections {
    /// The recovery collection from the snapshot.
    pub recovery_codes: Vec<RecoveryCode>,
    /// The QR collection from the snapshot.
    pub qr_codes: Vec<QrCode>,
}

/// The process-wide game state store.
///
/// Constructed once at startup (fresh or from a restored snapshot) and
/// explicitly passed to handlers, so tests can instantiate as many
/// stores as they need.
#[derive(Debug)]
pub struct GameStore {
    registry: CodeRegistry,
    state: GameState,
    /// Latch for the edge-triggered completion notification.
    all_qr_announced: bool,
}

impl GameStore {
    /// Create a store with fresh all-false collections from `registry`.
    pub fn new(registry: CodeRegistry) -> Self {
        let state = GameState {
            timestamp: Utc::now(),
            player_count: 0,
            recovery_codes: registry.fresh_recovery_codes(),
            qr_codes: registry.fresh_qr_codes(),
        };
        Self {
            registry,
            state,
            all_qr_announced: false,
        }
    }

    /// Create a store adopting code collections from a snapshot.
    ///
    /// Player count and timestamp start fresh regardless of what the
    /// snapshot held. If the restored QR set is already complete the
    /// completion latch starts set, so restarting a finished game does
    /// not re-announce the final code.
    pub fn restore(registry: CodeRegistry, collections: RestoredCollections) -> Self {
        let state = GameState {
            timestamp: Utc::now(),
            player_count: 0,
            recovery_codes: collections.recovery_codes,
            qr_codes: collections.qr_codes,
        };
        let all_qr_announced = state.all_qr_scanned();
        Self {
            registry,
            state,
            all_qr_announced,
        }
    }

    /// The registry this store was built from.
    pub const fn registry(&self) -> &CodeRegistry {
        &self.registry
    }

    /// A defensive clone of the current state.
    pub fn state(&self) -> GameState {
        self.state.clone()
    }

    /// A clone of the current recovery collection.
    pub fn recovery_codes(&self) -> Vec<RecoveryCode> {
        self.state.recovery_codes.clone()
    }

    /// A clone of the current QR collection.
    pub fn qr_codes(&self) -> Vec<QrCode> {
        self.state.qr_codes.clone()
    }

    // -----------------------------------------------------------------------
    // Player counter
    // -----------------------------------------------------------------------

    /// Record a newly connected observer screen.
    pub fn increment_players(&mut self) -> u32 {
        self.state.player_count = self.state.player_count.saturating_add(1);
        self.touch();
        self.state.player_count
    }

    /// Record a disconnected observer screen. Clamped at zero.
    pub fn decrement_players(&mut self) -> u32 {
        self.state.player_count = self.state.player_count.saturating_sub(1);
        self.touch();
        self.state.player_count
    }

    // -----------------------------------------------------------------------
    // Submissions (idempotent, player-facing)
    // -----------------------------------------------------------------------

    /// Submit a typed-in recovery code. Lookup is exact-case.
    ///
    /// Unknown or empty values report `success = false` with no state
    /// change; this is never an error. Re-submitting an already-entered
    /// code reports success without changing anything.
    pub fn submit_recovery_code(&mut self, code: &str) -> SubmitOutcome {
        let Some(entry) = self
            .state
            .recovery_codes
            .iter_mut()
            .find(|c| c.code == code)
        else {
            debug!(code, "rejected unknown recovery code");
            return SubmitOutcome {
                success: false,
                changed: false,
            };
        };

        let changed = !entry.entered;
        entry.entered = true;
        if changed {
            info!(code, "recovery code entered");
            self.touch();
        }
        SubmitOutcome {
            success: true,
            changed,
        }
    }

    /// Submit a scanned QR code. The value is uppercased before lookup.
    ///
    /// When this submission flips the last unscanned flag, the returned
    /// [`ScanOutcome::completion`] carries the registry's final hidden
    /// code; the latch guarantees that happens at most once per reset
    /// cycle.
    pub fn submit_scan_code(&mut self, code: &str) -> ScanOutcome {
        let needle = code.to_uppercase();
        let Some(entry) = self.state.qr_codes.iter_mut().find(|c| c.code == needle) else {
            debug!(code, "rejected unknown QR code");
            return ScanOutcome {
                success: false,
                changed: false,
                completion: None,
            };
        };

        let changed = !entry.scanned;
        entry.scanned = true;
        if !changed {
            return ScanOutcome {
                success: true,
                changed: false,
                completion: None,
            };
        }

        info!(code = %needle, "QR code scanned");
        self.touch();

        let completion = self.check_completion();
        ScanOutcome {
            success: true,
            changed: true,
            completion,
        }
    }

    // -----------------------------------------------------------------------
    // Admin toggles (non-idempotent, operator-facing)
    // -----------------------------------------------------------------------

    /// Unconditionally flip a recovery code's flag.
    ///
    /// Returns whether a matching entry was found. An unknown code is a
    /// no-op; the transport layer still reports success for it.
    pub fn toggle_recovery_code(&mut self, code: &str) -> bool {
        let Some(entry) = self
            .state
            .recovery_codes
            .iter_mut()
            .find(|c| c.code == code)
        else {
            return false;
        };
        entry.entered = !entry.entered;
        info!(code, entered = entry.entered, "recovery code toggled");
        self.touch();
        true
    }

    /// Unconditionally flip a QR code's flag. Exact-case lookup.
    ///
    /// Toggles never feed the completion detector: the notification
    /// fires only on the forward transition driven by a submission.
    pub fn toggle_scan_code(&mut self, code: &str) -> bool {
        let Some(entry) = self.state.qr_codes.iter_mut().find(|c| c.code == code) else {
            return false;
        };
        entry.scanned = !entry.scanned;
        info!(code, scanned = entry.scanned, "QR code toggled");
        self.touch();
        true
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Replace both collections with fresh all-false copies from the
    /// registry, zero the player counter, stamp a new timestamp, and
    /// clear the completion latch so a later completion announces again.
    pub fn reset(&mut self) {
        self.state.recovery_codes = self.registry.fresh_recovery_codes();
        self.state.qr_codes = self.registry.fresh_qr_codes();
        self.state.player_count = 0;
        self.all_qr_announced = false;
        self.touch();
        info!("game state reset to initial values");
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Edge-triggered completion check, called after an effective scan.
    fn check_completion(&mut self) -> Option<String> {
        if self.all_qr_announced || !self.state.all_qr_scanned() {
            return None;
        }
        self.all_qr_announced = true;
        let final_code = self.registry.final_hidden_code().to_owned();
        info!(final_code = %final_code, "all QR codes scanned");
        Some(final_code)
    }

    /// Refresh the state timestamp after an effective mutation.
    fn touch(&mut self) {
        self.state.timestamp = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_registry() -> CodeRegistry {
        CodeRegistry::new(
            vec![String::from("4821"), String::from("9153")],
            vec![String::from("AAA"), String::from("BBB")],
            String::from("6158"),
        )
    }

    fn store() -> GameStore {
        GameStore::new(small_registry())
    }

    #[test]
    fn submit_recovery_code_flips_flag_once() {
        let mut store = store();

        let first = store.submit_recovery_code("4821");
        assert!(first.success);
        assert!(first.changed);

        // Idempotent: second submission succeeds without changing state.
        let before = store.recovery_codes();
        let second = store.submit_recovery_code("4821");
        assert!(second.success);
        assert!(!second.changed);
        assert_eq!(store.recovery_codes(), before);
    }

    #[test]
    fn unknown_recovery_code_leaves_collection_untouched() {
        let mut store = store();
        let before = store.recovery_codes();

        let outcome = store.submit_recovery_code("0000");
        assert!(!outcome.success);
        assert!(!outcome.changed);
        assert_eq!(store.recovery_codes(), before);
    }

    #[test]
    fn empty_code_is_a_validation_failure_not_an_error() {
        let mut store = store();
        assert!(!store.submit_recovery_code("").success);
        assert!(!store.submit_scan_code("").success);
    }

    #[test]
    fn recovery_lookup_is_exact_case() {
        let mut store = GameStore::new(CodeRegistry::new(
            vec![String::from("ABCD")],
            Vec::new(),
            String::from("6158"),
        ));
        assert!(!store.submit_recovery_code("abcd").success);
        assert!(store.submit_recovery_code("ABCD").success);
    }

    #[test]
    fn scan_lookup_uppercases_input() {
        let mut store = store();
        let outcome = store.submit_scan_code("aaa");
        assert!(outcome.success);
        assert!(outcome.changed);
        assert!(store.qr_codes().iter().any(|c| c.code == "AAA" && c.scanned));
    }

    #[test]
    fn completion_fires_exactly_once_on_last_scan() {
        let mut store = store();

        let first = store.submit_scan_code("aaa");
        assert_eq!(first.completion, None);

        let last = store.submit_scan_code("bbb");
        assert_eq!(last.completion, Some(String::from("6158")));

        // Resubmission of an already-scanned code must not re-fire.
        let again = store.submit_scan_code("AAA");
        assert!(again.success);
        assert_eq!(again.completion, None);
    }

    #[test]
    fn completion_fires_again_after_reset() {
        let mut store = store();
        store.submit_scan_code("AAA");
        assert!(store.submit_scan_code("BBB").completion.is_some());

        store.reset();

        store.submit_scan_code("AAA");
        assert_eq!(
            store.submit_scan_code("BBB").completion,
            Some(String::from("6158"))
        );
    }

    #[test]
    fn toggle_never_fires_completion() {
        let mut store = store();
        assert!(store.toggle_scan_code("AAA"));
        assert!(store.toggle_scan_code("BBB"));
        assert!(store.state().all_qr_scanned());

        // Toggle one off and submit it again: this is the forward
        // transition, so the notification fires now.
        assert!(store.toggle_scan_code("AAA"));
        let outcome = store.submit_scan_code("aaa");
        assert_eq!(outcome.completion, Some(String::from("6158")));
    }

    #[test]
    fn toggle_unknown_code_is_a_noop() {
        let mut store = store();
        let before = store.state();
        assert!(!store.toggle_recovery_code("nope"));
        assert!(!store.toggle_scan_code("nope"));
        let after = store.state();
        assert_eq!(after.recovery_codes, before.recovery_codes);
        assert_eq!(after.qr_codes, before.qr_codes);
    }

    #[test]
    fn toggle_flips_both_ways() {
        let mut store = store();
        assert!(store.toggle_recovery_code("4821"));
        assert!(store.recovery_codes().iter().any(|c| c.code == "4821" && c.entered));
        assert!(store.toggle_recovery_code("4821"));
        assert!(store.recovery_codes().iter().all(|c| !c.entered));
    }

    #[test]
    fn player_count_clamps_at_zero() {
        let mut store = store();
        assert_eq!(store.decrement_players(), 0);
        assert_eq!(store.increment_players(), 1);
        assert_eq!(store.increment_players(), 2);
        assert_eq!(store.decrement_players(), 1);
        assert_eq!(store.decrement_players(), 0);
        assert_eq!(store.decrement_players(), 0);
    }

    #[test]
    fn reset_restores_initial_shape() {
        let mut store = store();
        store.increment_players();
        store.submit_recovery_code("4821");
        store.submit_scan_code("AAA");
        store.submit_scan_code("BBB");

        store.reset();
        let state = store.state();

        assert_eq!(state.player_count, 0);
        assert_eq!(state.recovery_codes.len(), 2);
        assert_eq!(state.qr_codes.len(), 2);
        assert!(state.recovery_codes.iter().all(|c| !c.entered));
        assert!(state.qr_codes.iter().all(|c| !c.scanned));
    }

    #[test]
    fn restore_adopts_collections_but_not_player_count() {
        let registry = small_registry();
        let mut donor = GameStore::new(registry.clone());
        donor.increment_players();
        donor.submit_scan_code("AAA");
        let snapshot = donor.state();

        let restored = GameStore::restore(
            registry,
            RestoredCollections {
                recovery_codes: snapshot.recovery_codes.clone(),
                qr_codes: snapshot.qr_codes.clone(),
            },
        );
        let state = restored.state();
        assert_eq!(state.player_count, 0);
        assert_eq!(state.recovery_codes, snapshot.recovery_codes);
        assert_eq!(state.qr_codes, snapshot.qr_codes);
    }

    #[test]
    fn restoring_a_completed_game_does_not_reannounce() {
        let registry = small_registry();
        let mut donor = GameStore::new(registry.clone());
        donor.submit_scan_code("AAA");
        donor.submit_scan_code("BBB");
        let snapshot = donor.state();

        let mut restored = GameStore::restore(
            registry,
            RestoredCollections {
                recovery_codes: snapshot.recovery_codes,
                qr_codes: snapshot.qr_codes,
            },
        );

        // Already complete: a resubmission must stay quiet.
        let outcome = restored.submit_scan_code("AAA");
        assert!(outcome.success);
        assert_eq!(outcome.completion, None);

        // But a reset re-arms the latch.
        restored.reset();
        restored.submit_scan_code("AAA");
        assert!(restored.submit_scan_code("BBB").completion.is_some());
    }

    #[test]
    fn state_returns_defensive_copy() {
        let mut store = store();
        let mut copy = store.state();
        if let Some(entry) = copy.qr_codes.first_mut() {
            entry.scanned = true;
        }
        assert!(store.qr_codes().iter().all(|c| !c.scanned));
        let _ = store.submit_scan_code("AAA");
    }
}
