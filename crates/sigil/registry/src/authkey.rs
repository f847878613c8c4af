//! Authorization key lifecycle.
//!
//! One token is live at a time; issuing a new one overwrites the previous.
//! The stored status never advances on its own as wall-clock time passes.
//! Expiry is computed at read time; mutating operations carry no hidden
//! time-triggered transitions.

use serde::{Deserialize, Serialize};

use sigil_types::{Address, AuthToken, Digest, Timestamp};

/// Stored lifecycle status.
///
/// The operations here only ever move between `Valid` and `Invalidated`;
/// `Used` and `Expired` are informational annotations for host-side tooling
/// and are never produced by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKeyStatus {
    Valid,
    Used,
    Expired,
    Invalidated,
}

/// The single active authorization token, stored as a digest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorizationKey {
    key_hash: Option<Digest>,
    status: AuthKeyStatus,
    generated_at: Timestamp,
}

/// Read-only status snapshot; `is_expired` is derived fresh per read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKeyStatusView {
    pub status: AuthKeyStatus,
    pub generated_at: Timestamp,
    pub is_expired: bool,
}

impl Default for AuthorizationKey {
    fn default() -> Self {
        Self {
            key_hash: None,
            status: AuthKeyStatus::Invalidated,
            generated_at: Timestamp::ZERO,
        }
    }
}

impl AuthorizationKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token, overwriting whatever was live before.
    ///
    /// The plaintext is returned to the issuing caller; only its digest is
    /// retained here, so the token can never be re-derived from state.
    pub fn issue(&mut self, caller: &Address, now: Timestamp) -> AuthToken {
        let nonce: [u8; 32] = rand::random();
        let token = AuthToken::derive(caller, now, &nonce);
        self.key_hash = Some(token.digest());
        self.status = AuthKeyStatus::Valid;
        self.generated_at = now;
        token
    }

    /// Mark the key invalidated. The digest is retained; verification now
    /// fails on the status check alone.
    pub fn invalidate(&mut self) {
        self.status = AuthKeyStatus::Invalidated;
    }

    pub fn is_expired(&self, now: Timestamp, expiry_secs: u64) -> bool {
        now.elapsed_since(self.generated_at) > expiry_secs
    }

    /// Non-consuming verification: true iff a digest is stored, it matches,
    /// the status is `Valid`, and the key has not passed its expiry window.
    pub fn verifies(&self, candidate: &str, now: Timestamp, expiry_secs: u64) -> bool {
        match self.key_hash {
            Some(stored) => {
                stored == Digest::of_token(candidate)
                    && self.status == AuthKeyStatus::Valid
                    && !self.is_expired(now, expiry_secs)
            }
            None => false,
        }
    }

    pub fn status(&self) -> AuthKeyStatus {
        self.status
    }

    pub fn generated_at(&self) -> Timestamp {
        self.generated_at
    }

    pub fn status_view(&self, now: Timestamp, expiry_secs: u64) -> AuthKeyStatusView {
        AuthKeyStatusView {
            status: self.status,
            generated_at: self.generated_at,
            is_expired: self.is_expired(now, expiry_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRY: u64 = 86_400;

    fn issuer() -> Address {
        Address::new("0xissuer")
    }

    #[test]
    fn starts_invalidated_and_unverifiable() {
        let key = AuthorizationKey::new();
        assert_eq!(key.status(), AuthKeyStatus::Invalidated);
        assert_eq!(key.generated_at(), Timestamp::ZERO);
        assert!(!key.verifies("anything", Timestamp::from_secs(10), EXPIRY));
    }

    #[test]
    fn issued_token_verifies_repeatedly() {
        let mut key = AuthorizationKey::new();
        let now = Timestamp::from_secs(1_000);
        let token = key.issue(&issuer(), now);

        assert_eq!(key.status(), AuthKeyStatus::Valid);
        for _ in 0..3 {
            assert!(key.verifies(token.as_str(), now.saturating_add(60), EXPIRY));
        }
        assert!(!key.verifies("some_other_token", now, EXPIRY));
    }

    #[test]
    fn expiry_is_derived_not_stored() {
        let mut key = AuthorizationKey::new();
        let now = Timestamp::from_secs(1_000);
        let token = key.issue(&issuer(), now);

        let at_limit = now.saturating_add(EXPIRY);
        assert!(key.verifies(token.as_str(), at_limit, EXPIRY));
        assert!(!key.status_view(at_limit, EXPIRY).is_expired);

        let past = now.saturating_add(EXPIRY + 1);
        assert!(!key.verifies(token.as_str(), past, EXPIRY));
        let view = key.status_view(past, EXPIRY);
        assert!(view.is_expired);
        assert_eq!(view.status, AuthKeyStatus::Valid);
    }

    #[test]
    fn invalidation_keeps_the_digest_but_blocks_verification() {
        let mut key = AuthorizationKey::new();
        let now = Timestamp::from_secs(1_000);
        let token = key.issue(&issuer(), now);

        key.invalidate();
        assert_eq!(key.status(), AuthKeyStatus::Invalidated);
        assert!(!key.verifies(token.as_str(), now, EXPIRY));
        assert_eq!(key.generated_at(), now);
    }

    #[test]
    fn reissue_supersedes_the_previous_token() {
        let mut key = AuthorizationKey::new();
        let first = key.issue(&issuer(), Timestamp::from_secs(1_000));
        let second = key.issue(&issuer(), Timestamp::from_secs(2_000));

        assert_ne!(first, second);
        assert!(!key.verifies(first.as_str(), Timestamp::from_secs(2_000), EXPIRY));
        assert!(key.verifies(second.as_str(), Timestamp::from_secs(2_000), EXPIRY));
    }

    #[test]
    fn reissue_after_invalidation_restores_the_cycle() {
        let mut key = AuthorizationKey::new();
        let _ = key.issue(&issuer(), Timestamp::from_secs(1_000));
        key.invalidate();

        let token = key.issue(&issuer(), Timestamp::from_secs(3_000));
        assert_eq!(key.status(), AuthKeyStatus::Valid);
        assert!(key.verifies(token.as_str(), Timestamp::from_secs(3_000), EXPIRY));
    }
}
