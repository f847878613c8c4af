//! Two-phase ownership transfer with a bounded acceptance window.
//!
//! The pending owner must accept explicitly, and only within the window;
//! a transfer that is never accepted expires.

use serde::{Deserialize, Serialize};

use sigil_types::{Address, RegistryError, RegistryResult, Timestamp};

/// Seconds a pending transfer stays acceptable.
pub const TRANSFER_ACCEPT_WINDOW_SECS: u64 = 72 * 60 * 60;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransfer {
    pub to: Address,
    pub initiated_at: Timestamp,
}

/// Administrative identity and the pending-transfer record.
///
/// Invariant: a pending target is never the current owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnershipLedger {
    owner: Address,
    pending: Option<PendingTransfer>,
}

impl OwnershipLedger {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            pending: None,
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn pending(&self) -> Option<&PendingTransfer> {
        self.pending.as_ref()
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        caller == &self.owner
    }

    pub fn ensure_owner(&self, caller: &Address) -> RegistryResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(RegistryError::NotOwner)
        }
    }

    /// Start (or restart) a transfer. A later initiation overwrites an
    /// earlier pending record and restarts its window.
    pub fn initiate(
        &mut self,
        caller: &Address,
        new_owner: Address,
        now: Timestamp,
    ) -> RegistryResult<()> {
        self.ensure_owner(caller)?;
        if new_owner.is_null() || new_owner == self.owner {
            return Err(RegistryError::InvalidTarget);
        }
        self.pending = Some(PendingTransfer {
            to: new_owner,
            initiated_at: now,
        });
        Ok(())
    }

    /// Complete a transfer. Returns `(previous_owner, new_owner)`.
    pub fn accept(
        &mut self,
        caller: &Address,
        now: Timestamp,
    ) -> RegistryResult<(Address, Address)> {
        let pending = match &self.pending {
            Some(p) => p.clone(),
            None => return Err(RegistryError::TransferNotInitiated),
        };
        if caller != &pending.to {
            return Err(RegistryError::NotPendingOwner);
        }
        if now.elapsed_since(pending.initiated_at) > TRANSFER_ACCEPT_WINDOW_SECS {
            return Err(RegistryError::TransferExpired);
        }

        let previous = std::mem::replace(&mut self.owner, pending.to);
        self.pending = None;
        Ok((previous, self.owner.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::new("0xalice")
    }

    fn bob() -> Address {
        Address::new("0xbob")
    }

    #[test]
    fn only_the_owner_can_initiate() {
        let mut ledger = OwnershipLedger::new(alice());
        assert_eq!(
            ledger.initiate(&bob(), bob(), Timestamp::from_secs(1)),
            Err(RegistryError::NotOwner)
        );
    }

    #[test]
    fn null_and_self_targets_are_rejected() {
        let mut ledger = OwnershipLedger::new(alice());
        let now = Timestamp::from_secs(1);
        assert_eq!(
            ledger.initiate(&alice(), Address::null(), now),
            Err(RegistryError::InvalidTarget)
        );
        assert_eq!(
            ledger.initiate(&alice(), alice(), now),
            Err(RegistryError::InvalidTarget)
        );
        assert!(ledger.pending().is_none());
    }

    #[test]
    fn accept_requires_an_initiated_transfer() {
        let mut ledger = OwnershipLedger::new(alice());
        assert_eq!(
            ledger.accept(&bob(), Timestamp::from_secs(1)),
            Err(RegistryError::TransferNotInitiated)
        );
    }

    #[test]
    fn only_the_pending_owner_can_accept() {
        let mut ledger = OwnershipLedger::new(alice());
        let now = Timestamp::from_secs(1);
        ledger.initiate(&alice(), bob(), now).unwrap();

        assert_eq!(
            ledger.accept(&Address::new("0xcarol"), now),
            Err(RegistryError::NotPendingOwner)
        );
        assert_eq!(ledger.owner(), &alice());
    }

    #[test]
    fn accept_inside_the_window_transfers_exactly_once() {
        let mut ledger = OwnershipLedger::new(alice());
        ledger
            .initiate(&alice(), bob(), Timestamp::from_secs(1_000))
            .unwrap();

        let at_limit = Timestamp::from_secs(1_000 + TRANSFER_ACCEPT_WINDOW_SECS);
        let (previous, new) = ledger.accept(&bob(), at_limit).unwrap();
        assert_eq!(previous, alice());
        assert_eq!(new, bob());
        assert_eq!(ledger.owner(), &bob());
        assert!(ledger.pending().is_none());

        // No pending record is left to accept a second time.
        assert_eq!(
            ledger.accept(&bob(), at_limit),
            Err(RegistryError::TransferNotInitiated)
        );
    }

    #[test]
    fn accept_after_the_window_fails_and_leaves_the_owner() {
        let mut ledger = OwnershipLedger::new(alice());
        ledger
            .initiate(&alice(), bob(), Timestamp::from_secs(1_000))
            .unwrap();

        let late = Timestamp::from_secs(1_000 + TRANSFER_ACCEPT_WINDOW_SECS + 1);
        assert_eq!(
            ledger.accept(&bob(), late),
            Err(RegistryError::TransferExpired)
        );
        assert_eq!(ledger.owner(), &alice());
    }

    #[test]
    fn reinitiation_overwrites_the_pending_record() {
        let mut ledger = OwnershipLedger::new(alice());
        ledger
            .initiate(&alice(), bob(), Timestamp::from_secs(1_000))
            .unwrap();
        ledger
            .initiate(&alice(), Address::new("0xcarol"), Timestamp::from_secs(2_000))
            .unwrap();

        let pending = ledger.pending().unwrap();
        assert_eq!(pending.to, Address::new("0xcarol"));
        assert_eq!(pending.initiated_at, Timestamp::from_secs(2_000));
        assert_eq!(
            ledger.accept(&bob(), Timestamp::from_secs(2_001)),
            Err(RegistryError::NotPendingOwner)
        );
    }
}
