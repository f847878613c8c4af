//! Password guard — credential checks, failure counting, lockout.

use serde::{Deserialize, Serialize};

use sigil_types::{Digest, GuardPolicy, RegistryError, RegistryResult, Timestamp};

/// One password credential with brute-force lockout.
///
/// The lockout is purely time-based and self-clearing: there is no unlock
/// operation. A lock whose deadline has passed is treated as cleared on the
/// next evaluation, with the failure count restarting from zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PasswordGuard {
    digest: Digest,
    error_count: u32,
    locked_until: Timestamp,
    policy: GuardPolicy,
}

/// Read-only lockout snapshot. `is_locked` and the reported count are
/// derived against `now`, the same way key expiry is derived at read time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordLockInfo {
    pub is_locked: bool,
    pub error_count: u32,
    pub locked_until: Timestamp,
}

impl PasswordGuard {
    pub fn new(initial_password: &str, policy: GuardPolicy) -> Self {
        Self {
            digest: Digest::of_password(initial_password),
            error_count: 0,
            locked_until: Timestamp::ZERO,
            policy,
        }
    }

    /// Evaluate a candidate at `now`.
    ///
    /// A failing call is the one place a failed operation persists state:
    /// the error count increments, and the attempt that reaches the
    /// threshold starts the lockout. While locked, no attempt is consumed.
    pub fn check(&mut self, candidate: &str, now: Timestamp) -> RegistryResult<()> {
        if now < self.locked_until {
            return Err(RegistryError::PasswordLocked {
                locked_until: self.locked_until,
            });
        }
        if !self.locked_until.is_zero() {
            // Deadline passed: the lock clears implicitly and counting restarts.
            self.locked_until = Timestamp::ZERO;
            self.error_count = 0;
        }

        if Digest::of_password(candidate) == self.digest {
            self.error_count = 0;
            return Ok(());
        }

        self.error_count += 1;
        if self.error_count >= self.policy.max_errors {
            self.locked_until = now.saturating_add(self.policy.lockout_secs);
            Err(RegistryError::TooManyErrors {
                locked_until: self.locked_until,
            })
        } else {
            Err(RegistryError::InvalidPassword)
        }
    }

    /// Replace the stored credential. Lock state is untouched; a running
    /// lockout still has to expire on its own.
    pub fn replace(&mut self, new_password: &str) {
        self.digest = Digest::of_password(new_password);
    }

    pub fn lock_info(&self, now: Timestamp) -> PasswordLockInfo {
        let lock_expired = !self.locked_until.is_zero() && now >= self.locked_until;
        PasswordLockInfo {
            is_locked: now < self.locked_until,
            error_count: if lock_expired { 0 } else { self.error_count },
            locked_until: self.locked_until,
        }
    }
}
