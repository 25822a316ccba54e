//! `deploy-networks list` command — print every configured network.

use std::path::Path;

use crate::config::registry_from;
use crate::error::Error;
use crate::network::{NetworkKind, NetworkRegistry};

/// Render one line per network: name, kind, network id and target.
#[must_use]
pub fn render(registry: &NetworkRegistry) -> String {
    let width = registry.names().map(str::len).max().unwrap_or(0);
    registry
        .iter()
        .map(|network| {
            let target = match &network.kind {
                NetworkKind::Direct(direct) => direct.url(),
                NetworkKind::Deferred(deferred) => deferred.endpoint_template.clone(),
            };
            format!(
                "{:width$}  {:8}  {:>8}  {target}\n",
                network.name,
                network.kind.label(),
                network.network_id().to_string(),
            )
        })
        .collect()
}

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn run(config: Option<&Path>) -> Result<(), Error> {
    let registry = registry_from(config)?;
    print!("{}", render(&registry));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_builtin_networks_in_order() {
        let output = render(&NetworkRegistry::builtin());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("development"));
        assert!(lines[0].contains("http://localhost:8545"));
        assert!(lines[1].starts_with("ropsten"));
        assert!(lines[1].contains("deferred"));
        assert!(lines[2].starts_with("mainnet"));
        assert!(lines[2].contains("https://mainnet.infura.io/v3/{project_id}"));
    }
}
