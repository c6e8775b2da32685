//! Named identity lookup.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::keys::identity::Identity;

/// Holds every configured identity, derived eagerly at construction.
///
/// Eager derivation means a malformed mnemonic in the key table fails the
/// process at startup instead of in the middle of a workflow.
#[derive(Debug)]
pub struct KeyStore {
    identities: BTreeMap<String, Identity>,
}

impl KeyStore {
    /// Derive all identities from a `name → mnemonic` key table.
    pub fn from_table(table: &BTreeMap<String, String>, prefix: &str) -> Result<Self> {
        let mut identities = BTreeMap::new();
        for (name, phrase) in table {
            let identity = Identity::from_mnemonic(name, phrase, prefix)?;
            tracing::info!(name = %name, address = %identity.address(), "identity derived");
            identities.insert(name.clone(), identity);
        }
        Ok(Self { identities })
    }

    /// Look up an identity by its configured name.
    ///
    /// Pure lookup; fails with a configuration error if the name is absent.
    pub fn identity(&self, name: &str) -> Result<&Identity> {
        self.identities.get(name).ok_or_else(|| {
            Error::Configuration(format!("no key named '{}' in the key table", name))
        })
    }

    /// Names of all configured identities.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.identities.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
         abandon abandon abandon abandon abandon about";

    fn test_table() -> BTreeMap<String, String> {
        let mut table = BTreeMap::new();
        table.insert("admin".to_string(), TEST_MNEMONIC.to_string());
        table
    }

    #[test]
    fn test_lookup() {
        let store = KeyStore::from_table(&test_table(), "terra").unwrap();
        let identity = store.identity("admin").unwrap();
        assert_eq!(identity.name(), "admin");
        assert!(identity.address().starts_with("terra1"));
    }

    #[test]
    fn test_missing_identity_is_configuration_error() {
        let store = KeyStore::from_table(&test_table(), "terra").unwrap();
        let result = store.identity("unknown");
        // Distinct from any network-related failure kind.
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_bad_mnemonic_fails_at_construction() {
        let mut table = test_table();
        table.insert("broken".to_string(), "twelve bogus words".to_string());
        assert!(matches!(
            KeyStore::from_table(&table, "terra"),
            Err(Error::Signing(_))
        ));
    }
}
