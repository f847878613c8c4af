//! The DID document field allow-list.
//!
//! No field outside this set can ever be stored or read. `did` is derived
//! from the agent's own address at read time and is never writable.

use serde::{Deserialize, Serialize};

/// The fixed set of document fields, in declared order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocField {
    AgentName,
    FunctionType,
    Version,
    ServiceUrl,
    Description,
    Did,
}

impl DocField {
    /// Allow-listed fields in their declared order.
    pub const ALL: [DocField; 6] = [
        DocField::AgentName,
        DocField::FunctionType,
        DocField::Version,
        DocField::ServiceUrl,
        DocField::Description,
        DocField::Did,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocField::AgentName => "agentName",
            DocField::FunctionType => "functionType",
            DocField::Version => "version",
            DocField::ServiceUrl => "serviceUrl",
            DocField::Description => "description",
            DocField::Did => "did",
        }
    }

    /// Parse an external field name. `None` for anything outside the
    /// allow-list.
    pub fn parse(name: &str) -> Option<Self> {
        DocField::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn is_writable(self) -> bool {
        !matches!(self, DocField::Did)
    }
}

impl std::fmt::Display for DocField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_every_field() {
        for field in DocField::ALL {
            assert_eq!(DocField::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn unknown_names_do_not_parse() {
        assert_eq!(DocField::parse("invalidField"), None);
        assert_eq!(DocField::parse("AgentName"), None);
        assert_eq!(DocField::parse(""), None);
    }

    #[test]
    fn did_is_the_only_read_only_field() {
        let writable: Vec<_> = DocField::ALL.into_iter().filter(|f| f.is_writable()).collect();
        assert_eq!(writable.len(), 5);
        assert!(!DocField::Did.is_writable());
    }

    #[test]
    fn serializes_as_external_name() {
        assert_eq!(
            serde_json::to_string(&DocField::ServiceUrl).unwrap(),
            "\"serviceUrl\""
        );
    }
}
