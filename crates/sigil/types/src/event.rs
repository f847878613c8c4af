//! Typed receipts for every observable state change.
//!
//! Mutating operations append a receipt to an [`EventJournal`] supplied by
//! the caller. The journal is observable output for the host environment,
//! not part of the persisted registry record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Address, AuthToken, Timestamp};

/// One notification per mutating operation, mirroring the operation surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    OwnershipTransferInitiated {
        previous_owner: Address,
        new_owner: Address,
        at: Timestamp,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    PasswordUpdated,
    PasswordReset,
    /// The only place the plaintext token is disclosed besides the issuing
    /// call's return value.
    AuthKeyGenerated {
        token: AuthToken,
    },
    AuthKeyVerified {
        caller: Address,
        owner: Address,
        result: bool,
    },
    AuthKeyInvalidated,
    FieldUpdated {
        name: String,
        value: String,
    },
    Paused,
    Unpaused,
    AuthKeyExpiryUpdated {
        previous: u64,
        next: u64,
    },
    MaxBatchSizeUpdated {
        previous: usize,
        next: usize,
    },
}

impl RegistryEvent {
    /// Stable label for logs and filtering.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryEvent::OwnershipTransferInitiated { .. } => "ownership_transfer_initiated",
            RegistryEvent::OwnershipTransferred { .. } => "ownership_transferred",
            RegistryEvent::PasswordUpdated => "password_updated",
            RegistryEvent::PasswordReset => "password_reset",
            RegistryEvent::AuthKeyGenerated { .. } => "auth_key_generated",
            RegistryEvent::AuthKeyVerified { .. } => "auth_key_verified",
            RegistryEvent::AuthKeyInvalidated => "auth_key_invalidated",
            RegistryEvent::FieldUpdated { .. } => "field_updated",
            RegistryEvent::Paused => "paused",
            RegistryEvent::Unpaused => "unpaused",
            RegistryEvent::AuthKeyExpiryUpdated { .. } => "auth_key_expiry_updated",
            RegistryEvent::MaxBatchSizeUpdated { .. } => "max_batch_size_updated",
        }
    }
}

/// A single journal entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub at: Timestamp,
    pub event: RegistryEvent,
}

/// Append-only journal of receipts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventJournal {
    records: Vec<EventRecord>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: Timestamp, event: RegistryEvent) {
        self.records.push(EventRecord {
            id: Uuid::new_v4(),
            at,
            event,
        });
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one kind, in emission order.
    pub fn of_kind(&self, kind: &str) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|r| r.event.kind() == kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_in_order() {
        let mut journal = EventJournal::new();
        assert!(journal.is_empty());

        journal.record(Timestamp::from_secs(1), RegistryEvent::Paused);
        journal.record(Timestamp::from_secs(2), RegistryEvent::Unpaused);

        assert_eq!(journal.count(), 2);
        assert_eq!(journal.last().unwrap().event.kind(), "unpaused");
        assert_eq!(journal.of_kind("paused").len(), 1);
    }

    #[test]
    fn kinds_are_distinct_per_variant() {
        let a = RegistryEvent::PasswordUpdated;
        let b = RegistryEvent::PasswordReset;
        assert_ne!(a.kind(), b.kind());
    }
}
