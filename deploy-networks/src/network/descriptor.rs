//! Network descriptor types and their TOML/JSON representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Placeholder substituted with the project identifier in endpoint templates.
pub const PROJECT_ID_PLACEHOLDER: &str = "{project_id}";

/// BIP-44 account prefix used by `MetaMask` and `truffle-hdwallet-provider`.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0";

/// Network identifier accepted by a descriptor.
///
/// Serialised as `"*"` for [`NetworkId::Any`] and as an integer otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkId {
    /// Matches whatever network the node reports.
    #[default]
    Any,
    /// A concrete network id.
    Id(u64),
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(Self::Any),
            other => other
                .parse()
                .map(Self::Id)
                .map_err(|e| Error::config_with(format!("invalid network id '{other}'"), e)),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct NetworkIdVisitor;

        impl Visitor<'_> for NetworkIdVisitor {
            type Value = NetworkId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("\"*\" or a non-negative integer network id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(NetworkId::Id(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(NetworkId::Id)
                    .map_err(|_| E::custom(format!("network id must not be negative: {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NetworkIdVisitor)
    }
}

/// Literal connection parameters for a locally reachable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectDescriptor {
    /// URL scheme used to reach the node (default: `http`).
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Node host name.
    pub host: String,
    /// Node port.
    pub port: u16,
    /// Gas limit for deployment transactions. `None` defers to the consuming tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// Gas price in wei. `None` defers to the consuming tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    /// Accepted network id (default: any).
    #[serde(default)]
    pub network_id: NetworkId,
}

fn default_protocol() -> String {
    "http".to_owned()
}

impl DirectDescriptor {
    /// Returns `protocol://host:port`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Parameters for a provider that is only built when the network is selected.
///
/// Holds the names of the variables to read rather than their values, so
/// describing a remote network never touches secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeferredDescriptor {
    /// Network id of the remote chain.
    pub network_id: NetworkId,
    /// RPC endpoint URL containing the `{project_id}` placeholder.
    #[serde(rename = "endpoint")]
    pub endpoint_template: String,
    /// Variable holding the seed phrase (default: `DEV_MNEMONIC`).
    #[serde(default = "default_mnemonic_env")]
    pub mnemonic_env: String,
    /// Variable holding the project id (default: `INFURA_PROJECT_ID`).
    #[serde(default = "default_project_id_env")]
    pub project_id_env: String,
    /// First account index to derive (default: 0).
    #[serde(default)]
    pub address_index: u32,
    /// Number of consecutive accounts to derive (default: 1).
    #[serde(default = "default_num_addresses")]
    pub num_addresses: u32,
    /// BIP-44 path prefix; the account index is appended as the last segment.
    #[serde(default = "default_derivation_path")]
    pub derivation_path: String,
}

fn default_mnemonic_env() -> String {
    crate::credentials::DEV_MNEMONIC.to_owned()
}

fn default_project_id_env() -> String {
    crate::credentials::INFURA_PROJECT_ID.to_owned()
}

const fn default_num_addresses() -> u32 {
    1
}

fn default_derivation_path() -> String {
    DEFAULT_DERIVATION_PATH.to_owned()
}

impl DeferredDescriptor {
    /// Creates a descriptor with default credential variables and a single account.
    #[must_use]
    pub fn new(network_id: NetworkId, endpoint_template: impl Into<String>) -> Self {
        Self {
            network_id,
            endpoint_template: endpoint_template.into(),
            mnemonic_env: default_mnemonic_env(),
            project_id_env: default_project_id_env(),
            address_index: 0,
            num_addresses: default_num_addresses(),
            derivation_path: default_derivation_path(),
        }
    }

    /// Substitutes `project_id` into the endpoint template.
    #[must_use]
    pub fn endpoint_for(&self, project_id: &str) -> String {
        self.endpoint_template
            .replace(PROJECT_ID_PLACEHOLDER, project_id)
    }

    /// Full derivation paths of every account this descriptor yields.
    #[must_use]
    pub fn derivation_paths(&self) -> Vec<String> {
        let prefix = self.derivation_path.trim_end_matches('/');
        (0..self.num_addresses)
            .map(|offset| format!("{prefix}/{}", u64::from(self.address_index) + u64::from(offset)))
            .collect()
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), Error> {
        if !self.endpoint_template.contains(PROJECT_ID_PLACEHOLDER) {
            return Err(Error::config(format!(
                "endpoint for network '{name}' must contain {PROJECT_ID_PLACEHOLDER}"
            )));
        }
        if self.num_addresses == 0 {
            return Err(Error::config(format!(
                "network '{name}' must derive at least one address"
            )));
        }
        Ok(())
    }
}

/// How a network is reached.
///
/// A table with a `host` key is [`NetworkKind::Direct`]; any other table is
/// read as [`NetworkKind::Deferred`], so field errors name the offending key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NetworkKind {
    /// Remote network reached through a wallet-backed provider built on demand.
    Deferred(DeferredDescriptor),
    /// Literal host and port.
    Direct(DirectDescriptor),
}

impl<'de> Deserialize<'de> for NetworkKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let table = toml::Table::deserialize(deserializer)?;
        let kind = if table.contains_key("host") {
            toml::Value::Table(table).try_into().map(Self::Direct)
        } else {
            toml::Value::Table(table).try_into().map(Self::Deferred)
        };
        kind.map_err(D::Error::custom)
    }
}

impl NetworkKind {
    /// Environment variables read when this network's provider is built.
    #[must_use]
    pub fn credential_variables(&self) -> Vec<&str> {
        match self {
            Self::Direct(_) => Vec::new(),
            Self::Deferred(deferred) => {
                vec![deferred.mnemonic_env.as_str(), deferred.project_id_env.as_str()]
            }
        }
    }

    /// Network id accepted by this descriptor.
    #[must_use]
    pub const fn network_id(&self) -> NetworkId {
        match self {
            Self::Direct(direct) => direct.network_id,
            Self::Deferred(deferred) => deferred.network_id,
        }
    }

    /// Short label used in listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct(_) => "direct",
            Self::Deferred(_) => "deferred",
        }
    }
}

/// A named network entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    /// Unique registry key.
    pub name: String,
    /// Connection parameters.
    #[serde(flatten)]
    pub kind: NetworkKind,
}

impl NetworkDescriptor {
    /// Creates a direct entry.
    #[must_use]
    pub fn direct(name: impl Into<String>, direct: DirectDescriptor) -> Self {
        Self {
            name: name.into(),
            kind: NetworkKind::Direct(direct),
        }
    }

    /// Creates a deferred entry.
    #[must_use]
    pub fn deferred(name: impl Into<String>, deferred: DeferredDescriptor) -> Self {
        Self {
            name: name.into(),
            kind: NetworkKind::Deferred(deferred),
        }
    }

    /// Network id accepted by this entry.
    #[must_use]
    pub const fn network_id(&self) -> NetworkId {
        self.kind.network_id()
    }
}
