//! Sigil registry — the identity and access-control state machine for a
//! single autonomous agent.
//!
//! The host execution environment supplies serialized invocation, a
//! current-time oracle, and an unforgeable caller identity per call; this
//! crate supplies the semantics: the password guard with brute-force
//! lockout, the authorization key lifecycle, the allow-listed DID document,
//! and two-phase ownership transfer.

#![deny(unsafe_code)]

pub mod authkey;
pub mod document;
pub mod guard;
pub mod ownership;
pub mod registry;

pub use authkey::{AuthKeyStatus, AuthKeyStatusView, AuthorizationKey};
pub use document::{DocumentStore, DID_SCHEME_PREFIX};
pub use guard::{PasswordGuard, PasswordLockInfo};
pub use ownership::{OwnershipLedger, PendingTransfer, TRANSFER_ACCEPT_WINDOW_SECS};
pub use registry::{AgentRegistry, RegistryState};
