//! `deploy-networks provider` command — build a network's provider on demand.
//!
//! This is the only command that reads credentials, and it captures only the
//! variables the selected network refers to.

use std::path::Path;

use serde::Serialize;

use crate::config::registry_from;
use crate::credentials::{CredentialSource, Credentials};
use crate::error::Error;
use crate::network::{NetworkDescriptor, NetworkId, NetworkKind};

/// Connection summary printed by the `provider` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    /// Network name.
    pub network: String,
    /// Accepted network id.
    pub network_id: NetworkId,
    /// `direct` or `deferred`.
    pub kind: &'static str,
    /// Endpoint URL, with any project id masked.
    pub endpoint: String,
    /// Derived account addresses; empty for direct networks.
    pub addresses: Vec<String>,
}

/// Resolve the connection for `network`, building its provider if deferred.
///
/// # Errors
///
/// Propagates any error from [`DeferredDescriptor::build_provider`](crate::network::DeferredDescriptor::build_provider).
pub fn summarize(
    network: &NetworkDescriptor,
    credentials: &dyn CredentialSource,
) -> Result<ProviderSummary, Error> {
    let summary = match &network.kind {
        NetworkKind::Direct(direct) => ProviderSummary {
            network: network.name.clone(),
            network_id: direct.network_id,
            kind: network.kind.label(),
            endpoint: direct.url(),
            addresses: Vec::new(),
        },
        NetworkKind::Deferred(deferred) => {
            let provider = deferred.build_provider(&network.name, credentials)?;
            ProviderSummary {
                network: network.name.clone(),
                network_id: provider.network_id(),
                kind: network.kind.label(),
                endpoint: provider.redacted_endpoint().to_owned(),
                addresses: provider.signer_addresses().to_vec(),
            }
        }
    };
    Ok(summary)
}

/// Execute the `provider` command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the network is
/// unknown, or its provider cannot be built.
#[allow(clippy::print_stdout)]
pub fn run(name: &str, config: Option<&Path>) -> Result<(), Error> {
    let registry = registry_from(config)?;
    let network = registry.resolve(name)?;
    let credentials = Credentials::from_env_for(network);
    let summary = summarize(network, &credentials)?;
    let rendered = serde_json::to_string_pretty(&summary)
        .map_err(|e| Error::config_with("failed to serialise provider summary", e))?;
    println!("{rendered}");
    Ok(())
}
