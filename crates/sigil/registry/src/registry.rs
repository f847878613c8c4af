//! The registry facade.
//!
//! Composes the ownership ledger, password guard, authorization key, and
//! document store behind the operation surface the host environment calls.
//! Every mutating operation checks the pause switch and the caller's
//! authority first, then executes, then appends a receipt to the
//! caller-supplied journal.
//!
//! Caller identity is threaded in explicitly wherever the semantics use it
//! (owner checks, token derivation, verification receipts). Issuance and
//! invalidation are deliberately open to any caller who knows the password.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sigil_types::{
    Address, AgentProfile, AuthToken, Clock, DocField, EventJournal, GuardPolicy, RegistryError,
    RegistryEvent, RegistryResult, SystemParameters,
};

use crate::authkey::{AuthKeyStatusView, AuthorizationKey};
use crate::document::DocumentStore;
use crate::guard::{PasswordGuard, PasswordLockInfo};
use crate::ownership::OwnershipLedger;

/// The single persisted record: administrative identity, password
/// credential, authorization key, document map, and system parameters.
/// Nothing else is durable; journals and clocks belong to the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryState {
    pub ownership: OwnershipLedger,
    pub credential: PasswordGuard,
    pub auth_key: AuthorizationKey,
    pub document: DocumentStore,
    pub params: SystemParameters,
}

/// The identity and access-control engine for one agent.
pub struct AgentRegistry {
    state: RegistryState,
    clock: Arc<dyn Clock>,
}

impl AgentRegistry {
    /// Construct a fresh registry. The deployer becomes the owner;
    /// `agent_address` is the instance's own identity, from which the `did`
    /// field derives.
    pub fn new(
        profile: AgentProfile,
        initial_password: &str,
        deployer: Address,
        agent_address: Address,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = RegistryState {
            ownership: OwnershipLedger::new(deployer),
            credential: PasswordGuard::new(initial_password, GuardPolicy::default()),
            auth_key: AuthorizationKey::new(),
            document: DocumentStore::new(agent_address, &profile),
            params: SystemParameters::default(),
        };
        Self { state, clock }
    }

    /// Restore from a durable snapshot.
    pub fn from_state(state: RegistryState, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn owner(&self) -> &Address {
        self.state.ownership.owner()
    }

    pub fn pending_owner(&self) -> Option<&Address> {
        self.state.ownership.pending().map(|p| &p.to)
    }

    pub fn agent_address(&self) -> &Address {
        self.state.document.agent()
    }

    pub fn is_paused(&self) -> bool {
        self.state.params.is_paused
    }

    pub fn params(&self) -> &SystemParameters {
        &self.state.params
    }

    // ── authorization keys ──────────────────────────────────────────────

    /// Issue a fresh authorization token, gated by the pause switch and the
    /// password guard. Guard failures propagate unchanged, lock errors
    /// included, and a failed check still consumes an attempt.
    pub fn request_auth_key(
        &mut self,
        caller: &Address,
        password: &str,
        journal: &mut EventJournal,
    ) -> RegistryResult<AuthToken> {
        if self.state.params.is_paused {
            return Err(RegistryError::Paused);
        }
        let now = self.clock.now();
        self.state.credential.check(password, now)?;

        let token = self.state.auth_key.issue(caller, now);
        info!(caller = %caller, "authorization key issued");
        journal.record(
            now,
            RegistryEvent::AuthKeyGenerated {
                token: token.clone(),
            },
        );
        Ok(token)
    }

    /// Non-consuming verification, open to any caller. Emits a receipt for
    /// every attempt, successful or not.
    pub fn verify_agent_auth(
        &mut self,
        caller: &Address,
        candidate: &str,
        journal: &mut EventJournal,
    ) -> bool {
        let now = self.clock.now();
        let result =
            self.state
                .auth_key
                .verifies(candidate, now, self.state.params.auth_key_expiry_secs);
        journal.record(
            now,
            RegistryEvent::AuthKeyVerified {
                caller: caller.clone(),
                owner: self.owner().clone(),
                result,
            },
        );
        result
    }

    /// Invalidate the live key. Password-gated, not identity-gated.
    pub fn invalidate_auth_key(
        &mut self,
        password: &str,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        let now = self.clock.now();
        self.state.credential.check(password, now)?;

        self.state.auth_key.invalidate();
        info!("authorization key invalidated");
        journal.record(now, RegistryEvent::AuthKeyInvalidated);
        Ok(())
    }

    pub fn auth_key_status(&self) -> AuthKeyStatusView {
        self.state
            .auth_key
            .status_view(self.clock.now(), self.state.params.auth_key_expiry_secs)
    }

    // ── password management ─────────────────────────────────────────────

    /// Direct guard evaluation. Shares counting and lockout state with the
    /// gated operations.
    pub fn check_password(&mut self, candidate: &str) -> RegistryResult<()> {
        let now = self.clock.now();
        self.state.credential.check(candidate, now)
    }

    pub fn password_lock_info(&self) -> PasswordLockInfo {
        self.state.credential.lock_info(self.clock.now())
    }

    pub fn update_password(
        &mut self,
        caller: &Address,
        old: &str,
        new: &str,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        let now = self.clock.now();
        self.state.credential.check(old, now)?;

        self.state.credential.replace(new);
        info!("agent password updated");
        journal.record(now, RegistryEvent::PasswordUpdated);
        Ok(())
    }

    /// Recovery path: no old-password check. The lockout, if running, still
    /// expires on its own.
    pub fn reset_password(
        &mut self,
        caller: &Address,
        new: &str,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        let now = self.clock.now();

        self.state.credential.replace(new);
        warn!("agent password reset without old-password check");
        journal.record(now, RegistryEvent::PasswordReset);
        Ok(())
    }

    // ── document ────────────────────────────────────────────────────────

    pub fn get_field(&self, name: &str) -> RegistryResult<String> {
        let field = DocField::parse(name)
            .ok_or_else(|| RegistryError::InvalidFieldName(name.to_string()))?;
        Ok(self.state.document.get(field))
    }

    pub fn set_field(
        &mut self,
        caller: &Address,
        name: &str,
        value: &str,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        let field = writable_field(name)?;
        let now = self.clock.now();

        self.state.document.set(field, value)?;
        info!(field = name, "document field updated");
        journal.record(
            now,
            RegistryEvent::FieldUpdated {
                name: field.as_str().to_string(),
                value: value.to_string(),
            },
        );
        Ok(())
    }

    /// Batch update. Every name is validated before any write, so a batch
    /// with one bad name leaves the whole document untouched.
    pub fn set_fields(
        &mut self,
        caller: &Address,
        names: &[String],
        values: &[String],
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        if names.len() != values.len() {
            return Err(RegistryError::ArrayLengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        let max = self.state.params.max_batch_size;
        if names.len() > max {
            return Err(RegistryError::BatchTooLarge {
                len: names.len(),
                max,
            });
        }
        let fields = names
            .iter()
            .map(|name| writable_field(name))
            .collect::<RegistryResult<Vec<_>>>()?;

        let now = self.clock.now();
        for (field, value) in fields.into_iter().zip(values) {
            self.state.document.set(field, value.clone())?;
            journal.record(
                now,
                RegistryEvent::FieldUpdated {
                    name: field.as_str().to_string(),
                    value: value.clone(),
                },
            );
        }
        info!(count = names.len(), "document fields updated");
        Ok(())
    }

    pub fn get_all_fields(&self) -> Vec<(DocField, String)> {
        self.state.document.all()
    }

    pub fn allowed_field_names(&self) -> Vec<&'static str> {
        DocField::ALL.iter().map(|f| f.as_str()).collect()
    }

    pub fn did(&self) -> String {
        self.state.document.did()
    }

    // ── ownership ───────────────────────────────────────────────────────

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        let now = self.clock.now();
        self.state
            .ownership
            .initiate(caller, new_owner.clone(), now)?;

        info!(from = %caller, to = %new_owner, "ownership transfer initiated");
        journal.record(
            now,
            RegistryEvent::OwnershipTransferInitiated {
                previous_owner: caller.clone(),
                new_owner,
                at: now,
            },
        );
        Ok(())
    }

    pub fn accept_ownership(
        &mut self,
        caller: &Address,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        let now = self.clock.now();
        let (previous, new) = self.state.ownership.accept(caller, now)?;

        info!(from = %previous, to = %new, "ownership transferred");
        journal.record(
            now,
            RegistryEvent::OwnershipTransferred {
                previous_owner: previous,
                new_owner: new,
            },
        );
        Ok(())
    }

    // ── pause switch & parameters ───────────────────────────────────────

    pub fn pause(&mut self, caller: &Address, journal: &mut EventJournal) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        self.state.params.is_paused = true;
        warn!("registry paused");
        journal.record(self.clock.now(), RegistryEvent::Paused);
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Address, journal: &mut EventJournal) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        self.state.params.is_paused = false;
        info!("registry unpaused");
        journal.record(self.clock.now(), RegistryEvent::Unpaused);
        Ok(())
    }

    pub fn update_auth_key_expiry(
        &mut self,
        caller: &Address,
        secs: u64,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        let previous = std::mem::replace(&mut self.state.params.auth_key_expiry_secs, secs);
        info!(previous, next = secs, "auth key expiry updated");
        journal.record(
            self.clock.now(),
            RegistryEvent::AuthKeyExpiryUpdated {
                previous,
                next: secs,
            },
        );
        Ok(())
    }

    pub fn update_max_batch_size(
        &mut self,
        caller: &Address,
        max: usize,
        journal: &mut EventJournal,
    ) -> RegistryResult<()> {
        self.state.ownership.ensure_owner(caller)?;
        let previous = std::mem::replace(&mut self.state.params.max_batch_size, max);
        info!(previous, next = max, "max batch size updated");
        journal.record(
            self.clock.now(),
            RegistryEvent::MaxBatchSizeUpdated {
                previous,
                next: max,
            },
        );
        Ok(())
    }
}

fn writable_field(name: &str) -> RegistryResult<DocField> {
    match DocField::parse(name) {
        Some(field) if field.is_writable() => Ok(field),
        _ => Err(RegistryError::InvalidFieldName(name.to_string())),
    }
}
