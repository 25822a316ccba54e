//! `deploy-networks show` command — print a descriptor without touching credentials.

use std::path::Path;

use crate::config::registry_from;
use crate::error::Error;
use crate::network::NetworkDescriptor;

/// Serialise a descriptor as pretty JSON.
///
/// # Errors
///
/// Returns [`Error::Config`] if serialisation fails.
pub fn render(network: &NetworkDescriptor) -> Result<String, Error> {
    serde_json::to_string_pretty(network)
        .map_err(|e| Error::config_with(format!("failed to serialise '{}'", network.name), e))
}

/// Execute the `show` command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the network is unknown.
#[allow(clippy::print_stdout)]
pub fn run(name: &str, config: Option<&Path>) -> Result<(), Error> {
    let registry = registry_from(config)?;
    let network = registry.resolve(name)?;
    println!("{}", render(network)?);
    Ok(())
}
