//! Document store — the allow-listed self-description of the agent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sigil_types::{Address, AgentProfile, DocField, RegistryError, RegistryResult};

/// Fixed scheme prefix for the derived `did` field.
pub const DID_SCHEME_PREFIX: &str = "did:ethr:";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentStore {
    /// The instance's own identity; the `did` field derives from it.
    agent: Address,
    values: BTreeMap<DocField, String>,
}

impl DocumentStore {
    /// Seed the store with the construction profile.
    pub fn new(agent: Address, profile: &AgentProfile) -> Self {
        let mut values = BTreeMap::new();
        values.insert(DocField::AgentName, profile.agent_name.clone());
        values.insert(DocField::FunctionType, profile.function_type.clone());
        values.insert(DocField::Version, profile.version.clone());
        Self { agent, values }
    }

    pub fn agent(&self) -> &Address {
        &self.agent
    }

    /// Derived decentralized identifier — computed on every read, never
    /// stored, independent of any write attempt.
    pub fn did(&self) -> String {
        format!("{}{}", DID_SCHEME_PREFIX, self.agent.as_str().to_lowercase())
    }

    /// Current value of a field; empty string for fields never set.
    pub fn get(&self, field: DocField) -> String {
        if field == DocField::Did {
            return self.did();
        }
        self.values.get(&field).cloned().unwrap_or_default()
    }

    /// Write one field. The derived `did` field is rejected.
    pub fn set(&mut self, field: DocField, value: impl Into<String>) -> RegistryResult<()> {
        if !field.is_writable() {
            return Err(RegistryError::InvalidFieldName(field.as_str().to_string()));
        }
        self.values.insert(field, value.into());
        Ok(())
    }

    /// Full allow-list paired with current values, in declared order.
    pub fn all(&self) -> Vec<(DocField, String)> {
        DocField::ALL.into_iter().map(|f| (f, self.get(f))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::new(
            Address::new("0xAbCd00Ef"),
            &AgentProfile::new("Test AI Agent", "Test Assistant", "1.0.0"),
        )
    }

    #[test]
    fn construction_seeds_the_profile_fields() {
        let store = store();
        assert_eq!(store.get(DocField::AgentName), "Test AI Agent");
        assert_eq!(store.get(DocField::FunctionType), "Test Assistant");
        assert_eq!(store.get(DocField::Version), "1.0.0");
        assert_eq!(store.get(DocField::ServiceUrl), "");
    }

    #[test]
    fn did_is_derived_and_lower_cased() {
        let store = store();
        assert_eq!(store.did(), "did:ethr:0xabcd00ef");
        assert_eq!(store.get(DocField::Did), "did:ethr:0xabcd00ef");
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut store = store();
        store
            .set(DocField::ServiceUrl, "https://api.example.com")
            .unwrap();
        assert_eq!(store.get(DocField::ServiceUrl), "https://api.example.com");
    }

    #[test]
    fn did_rejects_writes() {
        let mut store = store();
        assert_eq!(
            store.set(DocField::Did, "did:ethr:0xhacked"),
            Err(RegistryError::InvalidFieldName("did".to_string()))
        );
        assert_eq!(store.get(DocField::Did), "did:ethr:0xabcd00ef");
    }

    #[test]
    fn all_returns_declared_order() {
        let store = store();
        let names: Vec<_> = store.all().into_iter().map(|(f, _)| f).collect();
        assert_eq!(names, DocField::ALL.to_vec());
    }
}
