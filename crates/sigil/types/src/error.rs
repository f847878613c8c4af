//! Error taxonomy for registry operations.
//!
//! All failures are synchronous failures of the single call that triggered
//! them, and every one is recoverable by a later well-formed call. The only
//! state change that survives a failed call is the password guard's
//! error-count increment.

use thiserror::Error;

use crate::Timestamp;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("caller is not the current owner")]
    NotOwner,

    #[error("agent password is invalid")]
    InvalidPassword,

    #[error("too many password errors; guard locked until {locked_until}")]
    TooManyErrors { locked_until: Timestamp },

    #[error("password guard is locked until {locked_until}")]
    PasswordLocked { locked_until: Timestamp },

    #[error("registry is paused")]
    Paused,

    #[error("invalid document field name: {0}")]
    InvalidFieldName(String),

    #[error("batch arrays differ in length: {names} names vs {values} values")]
    ArrayLengthMismatch { names: usize, values: usize },

    #[error("batch of {len} fields exceeds the maximum of {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("transfer target is the null address or the current owner")]
    InvalidTarget,

    #[error("no ownership transfer has been initiated")]
    TransferNotInitiated,

    #[error("caller is not the pending owner")]
    NotPendingOwner,

    #[error("ownership transfer acceptance window has expired")]
    TransferExpired,
}
