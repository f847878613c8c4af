//! Construction profile and owner-tunable parameters.

use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTH_KEY_EXPIRY_SECS: u64 = 86_400;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;
pub const DEFAULT_MAX_PASSWORD_ERRORS: u32 = 5;
pub const DEFAULT_LOCKOUT_SECS: u64 = 3_600;

/// Descriptive profile the agent is constructed with. These seed the
/// document store; later edits go through the field-update operations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agent_name: String,
    pub function_type: String,
    pub version: String,
}

impl AgentProfile {
    pub fn new(
        agent_name: impl Into<String>,
        function_type: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            function_type: function_type.into(),
            version: version.into(),
        }
    }
}

/// Owner-tunable runtime parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemParameters {
    /// Seconds a freshly issued authorization key stays verifiable.
    pub auth_key_expiry_secs: u64,
    /// Upper bound on one batch document update.
    pub max_batch_size: usize,
    /// Global pause switch; only key issuance consults it.
    pub is_paused: bool,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            auth_key_expiry_secs: DEFAULT_AUTH_KEY_EXPIRY_SECS,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            is_paused: false,
        }
    }
}

/// Password-guard policy. The deployed defaults are data, not constants
/// baked into the guard logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardPolicy {
    /// Consecutive failures that trigger a lockout.
    pub max_errors: u32,
    /// How long a lockout lasts once triggered.
    pub lockout_secs: u64,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_PASSWORD_ERRORS,
            lockout_secs: DEFAULT_LOCKOUT_SECS,
        }
    }
}
