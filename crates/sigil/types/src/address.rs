use serde::{Deserialize, Serialize};

/// Caller identity as supplied by the host execution environment.
///
/// The registry never mints addresses; it only compares the identities the
/// host hands it per invocation. The empty string is the null address and is
/// never a valid transfer target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Wrap a host-supplied identity string.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// The null address.
    pub fn null() -> Self {
        Self(String::new())
    }

    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form (first 10 chars).
    pub fn short(&self) -> String {
        self.0.chars().take(10).collect()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
