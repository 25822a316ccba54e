//! Immutable, insertion-ordered network registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::descriptor::{
    DeferredDescriptor, DirectDescriptor, NetworkDescriptor, NetworkId, NetworkKind,
};
use crate::error::Error;

/// Read-only mapping from network name to [`NetworkDescriptor`].
///
/// Built once and then shared by reference; lookups never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRegistry(Vec<NetworkDescriptor>);

impl NetworkRegistry {
    /// Builds a registry, rejecting duplicate names and malformed deferred entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNetwork`] if a name repeats, or
    /// [`Error::Config`] if a deferred entry fails validation.
    pub fn new(networks: Vec<NetworkDescriptor>) -> Result<Self, Error> {
        for (i, network) in networks.iter().enumerate() {
            if networks[..i].iter().any(|n| n.name == network.name) {
                return Err(Error::DuplicateNetwork(network.name.clone()));
            }
            if let NetworkKind::Deferred(deferred) = &network.kind {
                deferred.validate(&network.name)?;
            }
        }
        tracing::debug!(count = networks.len(), "network registry built");
        Ok(Self(networks))
    }

    /// The built-in development, Ropsten and mainnet table.
    #[must_use]
    pub fn builtin() -> Self {
        Self(vec![
            NetworkDescriptor::direct(
                "development",
                DirectDescriptor {
                    protocol: "http".to_owned(),
                    host: "localhost".to_owned(),
                    port: 8545,
                    gas_limit: Some(5_000_000),
                    gas_price: Some(5_000_000_000),
                    network_id: NetworkId::Any,
                },
            ),
            NetworkDescriptor::deferred(
                "ropsten",
                DeferredDescriptor::new(
                    NetworkId::Id(3),
                    "https://ropsten.infura.io/v3/{project_id}",
                ),
            ),
            NetworkDescriptor::deferred(
                "mainnet",
                DeferredDescriptor::new(
                    NetworkId::Id(1),
                    "https://mainnet.infura.io/v3/{project_id}",
                ),
            ),
        ])
    }

    /// Looks up a network by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNetwork`] if no entry has that name.
    pub fn resolve(&self, name: &str) -> Result<&NetworkDescriptor, Error> {
        self.0.iter().find(|n| n.name == name).ok_or_else(|| {
            tracing::warn!(network = name, "unknown network requested");
            Error::UnknownNetwork(name.to_owned())
        })
    }

    /// Returns `true` if a network with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.name == name)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        self.0.iter()
    }

    /// Network names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|n| n.name.as_str())
    }

    /// Number of networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the registry holds no networks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a NetworkRegistry {
    type Item = &'a NetworkDescriptor;
    type IntoIter = std::slice::Iter<'a, NetworkDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for NetworkRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for network in &self.0 {
            map.serialize_entry(&network.name, &network.kind)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NetworkRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct NetworksVisitor;

        impl<'de> Visitor<'de> for NetworksVisitor {
            type Value = NetworkRegistry;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of network names to network descriptors")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut networks = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(name) = access.next_key::<String>()? {
                    let kind: NetworkKind = access.next_value().map_err(|e| {
                        <M::Error as serde::de::Error>::custom(format!("network '{name}': {e}"))
                    })?;
                    networks.push(NetworkDescriptor { name, kind });
                }
                NetworkRegistry::new(networks).map_err(<M::Error as serde::de::Error>::custom)
            }
        }

        deserializer.deserialize_map(NetworksVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_networks_resolve() {
        let registry = NetworkRegistry::builtin();
        for name in ["development", "ropsten", "mainnet"] {
            assert!(registry.resolve(name).is_ok(), "{name} should resolve");
        }
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["development", "ropsten", "mainnet"]
        );
    }

    #[test]
    fn development_is_direct() {
        let registry = NetworkRegistry::builtin();
        let network = registry.resolve("development").unwrap();
        let NetworkKind::Direct(direct) = &network.kind else {
            panic!("development should be direct");
        };
        assert_eq!(direct.protocol, "http");
        assert_eq!(direct.host, "localhost");
        assert_eq!(direct.port, 8545);
        assert_eq!(direct.gas_limit, Some(5_000_000));
        assert_eq!(direct.gas_price, Some(5_000_000_000));
        assert_eq!(direct.network_id, NetworkId::Any);
    }

    #[test]
    fn remote_networks_carry_ids_and_templates() {
        let registry = NetworkRegistry::builtin();
        for (name, id, host) in [
            ("ropsten", 3, "ropsten.infura.io"),
            ("mainnet", 1, "mainnet.infura.io"),
        ] {
            let network = registry.resolve(name).unwrap();
            assert_eq!(network.network_id(), NetworkId::Id(id));
            let NetworkKind::Deferred(deferred) = &network.kind else {
                panic!("{name} should be deferred");
            };
            assert_eq!(
                deferred.endpoint_for("p"),
                format!("https://{host}/v3/p")
            );
        }
    }

    #[test]
    fn unknown_network_fails_without_changing_registry() {
        let registry = NetworkRegistry::builtin();
        let before = registry.clone();
        let err = registry.resolve("unknown").unwrap_err();
        assert!(matches!(err, Error::UnknownNetwork(ref name) if name == "unknown"));
        assert_eq!(registry, before);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut networks: Vec<_> = NetworkRegistry::builtin().iter().cloned().collect();
        networks.push(networks[1].clone());
        let err = NetworkRegistry::new(networks).unwrap_err();
        assert!(matches!(err, Error::DuplicateNetwork(ref name) if name == "ropsten"));
    }

    #[test]
    fn registry_deserializes_from_toml_table() {
        let registry: NetworkRegistry = toml::from_str(
            r#"
[local]
host = "127.0.0.1"
port = 7545

[sepolia]
network_id = 11155111
endpoint = "https://sepolia.infura.io/v3/{project_id}"
"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("local"));
        assert_eq!(
            registry.resolve("sepolia").unwrap().network_id(),
            NetworkId::Id(11_155_111)
        );
    }

    #[test]
    fn invalid_deferred_entry_fails_deserialization() {
        let result: Result<NetworkRegistry, _> = toml::from_str(
            r#"
[broken]
network_id = 1
endpoint = "https://mainnet.infura.io/v3/"
"#,
        );
        assert!(result.is_err());
    }
}
