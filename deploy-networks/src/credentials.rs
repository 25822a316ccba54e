//! Credential snapshot used when building wallet-backed providers.
//!
//! Credentials are captured once at startup and passed explicitly to
//! [`DeferredDescriptor::build_provider`](crate::network::DeferredDescriptor::build_provider).
//! Nothing here validates a value; an absent or empty variable is only
//! reported when a provider that needs it is actually built.

use std::collections::BTreeMap;
use std::fmt;

use crate::network::NetworkDescriptor;

/// Environment variable holding the BIP-39 seed phrase.
pub const DEV_MNEMONIC: &str = "DEV_MNEMONIC";

/// Environment variable holding the Infura project identifier.
pub const INFURA_PROJECT_ID: &str = "INFURA_PROJECT_ID";

/// Source of named secrets consulted during provider construction.
pub trait CredentialSource {
    /// Returns the value for `name`, or `None` if it is unset or empty.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Immutable snapshot of credential values keyed by variable name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    values: BTreeMap<String, String>,
}

impl Credentials {
    /// Captures [`DEV_MNEMONIC`] and [`INFURA_PROJECT_ID`] from the process
    /// environment, loading a `.env` file first if one exists.
    #[must_use]
    pub fn from_env() -> Self {
        Self::capture([DEV_MNEMONIC, INFURA_PROJECT_ID])
    }

    /// Captures only the variables `network` reads when its provider is built.
    ///
    /// Direct networks capture nothing.
    #[must_use]
    pub fn from_env_for(network: &NetworkDescriptor) -> Self {
        Self::capture(network.kind.credential_variables())
    }

    /// Builds a snapshot from literal pairs. Empty values are dropped.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| -> (String, String) { (k.into(), v.into()) })
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self { values }
    }

    fn capture<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        dotenvy::dotenv().ok();
        let values: BTreeMap<String, String> = names
            .into_iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_owned(), v)))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        tracing::debug!(captured = ?values.keys().collect::<Vec<_>>(), "credentials loaded");
        Self { values }
    }

    /// Returns `true` if a non-empty value is held for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl CredentialSource for Credentials {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.keys().map(|k| (k, "<redacted>")))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkRegistry;

    #[test]
    fn empty_values_are_treated_as_absent() {
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, "  "), (INFURA_PROJECT_ID, "abc")]);
        assert_eq!(creds.lookup(DEV_MNEMONIC), None);
        assert_eq!(creds.lookup(INFURA_PROJECT_ID).as_deref(), Some("abc"));
        assert!(!creds.contains(DEV_MNEMONIC));
    }

    #[test]
    fn direct_network_captures_nothing() {
        let registry = NetworkRegistry::builtin();
        let creds = Credentials::from_env_for(registry.resolve("development").unwrap());
        assert_eq!(creds, Credentials::default());
    }

    #[test]
    fn debug_output_hides_values() {
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, "super secret words")]);
        let rendered = format!("{creds:?}");
        assert!(rendered.contains(DEV_MNEMONIC));
        assert!(!rendered.contains("super secret words"));
    }
}
