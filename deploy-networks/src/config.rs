//! Configuration loading and default template generation.
//!
//! This module provides:
//!
//! - [`ConfigFile`] — Top-level TOML document holding the `[networks]` table.
//! - [`load_registry`] — Reads and parses a TOML configuration file.
//! - [`generate_default_config`] — Produces a commented TOML template
//!   equivalent to [`NetworkRegistry::builtin`].
//!
//! # Configuration File Format
//!
//! ```toml
//! [networks.development]
//! host = "localhost"
//! port = 8545
//! network_id = "*"
//!
//! [networks.ropsten]
//! network_id = 3
//! endpoint = "https://ropsten.infura.io/v3/{project_id}"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::network::NetworkRegistry;

/// Parsed configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Networks keyed by name.
    pub networks: NetworkRegistry,
}

/// Parse a configuration document.
///
/// # Errors
///
/// Returns [`Error::Config`] if the TOML is malformed or any network entry is
/// invalid.
pub fn parse_registry(content: &str) -> Result<NetworkRegistry, Error> {
    let config: ConfigFile =
        toml::from_str(content).map_err(|e| Error::config_with("failed to parse TOML config", e))?;
    Ok(config.networks)
}

/// Load the network registry from a TOML file at the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed.
pub fn load_registry(path: &Path) -> Result<NetworkRegistry, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::config_with(
            format!("failed to resolve config path '{}'", path.display()),
            e,
        )
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let registry = parse_registry(&content).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("'{}': {msg}", config_path.display())),
        other => other,
    })?;
    tracing::info!(
        path = %config_path.display(),
        networks = registry.len(),
        "configuration loaded"
    );
    Ok(registry)
}

/// Use the file at `path` if given, otherwise the built-in table.
///
/// # Errors
///
/// Returns an error if a path is given and [`load_registry`] fails.
pub fn registry_from(path: Option<&Path>) -> Result<NetworkRegistry, Error> {
    path.map_or_else(|| Ok(NetworkRegistry::builtin()), load_registry)
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    String::from(
        r#"# Deployment network configuration

# ── Local node ──────────────────────────────────────────────────────
# Reached directly; no credentials are read.
# network_id = "*" accepts whatever id the node reports.

[networks.development]
protocol = "http"
host = "localhost"
port = 8545
gas_limit = 5000000
gas_price = 5000000000
network_id = "*"

# ── Remote networks ─────────────────────────────────────────────────
# The provider is only built when the network is selected.
# {project_id} is replaced with the value of project_id_env.
# Optional keys: mnemonic_env (default "DEV_MNEMONIC"),
# project_id_env (default "INFURA_PROJECT_ID"), address_index (default 0),
# num_addresses (default 1), derivation_path (default "m/44'/60'/0'/0").

[networks.ropsten]
network_id = 3
endpoint = "https://ropsten.infura.io/v3/{project_id}"

[networks.mainnet]
network_id = 1
endpoint = "https://mainnet.infura.io/v3/{project_id}"
"#,
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn default_template_matches_builtin_table() {
        let registry = parse_registry(&generate_default_config()).unwrap();
        let builtin = NetworkRegistry::builtin();
        assert_eq!(registry.len(), builtin.len());
        for network in &builtin {
            assert_eq!(registry.resolve(&network.name).unwrap(), network);
        }
    }

    #[test]
    fn load_registry_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[networks.ganache]
host = "127.0.0.1"
port = 7545
network_id = 5777
"#
        )
        .unwrap();
        let registry = load_registry(file.path()).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["ganache"]);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_registry(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_registry(
            r#"
[networks.development]
host = "localhost"
port = 8545
gas = 100
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
