//! Sigil shared types.
//!
//! Addresses, the time oracle seam, credential digests, the document field
//! allow-list, system parameters, receipts, and the error taxonomy used by
//! every registry operation.

#![deny(unsafe_code)]

pub mod address;
pub mod crypto;
pub mod error;
pub mod event;
pub mod fields;
pub mod params;
pub mod temporal;

pub use address::Address;
pub use crypto::{AuthToken, Digest};
pub use error::{RegistryError, RegistryResult};
pub use event::{EventJournal, EventRecord, RegistryEvent};
pub use fields::DocField;
pub use params::{
    AgentProfile, GuardPolicy, SystemParameters, DEFAULT_AUTH_KEY_EXPIRY_SECS,
    DEFAULT_LOCKOUT_SECS, DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_PASSWORD_ERRORS,
};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
