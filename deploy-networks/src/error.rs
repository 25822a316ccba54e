//! Unified error types for network resolution and provider construction.

use thiserror::Error;

/// Top-level error type for the network registry.
#[derive(Debug, Error)]
pub enum Error {
    /// No network with the requested name exists in the registry.
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    /// A network name appears more than once.
    #[error("duplicate network '{0}'")]
    DuplicateNetwork(String),

    /// A provider was requested while a required credential is unset or empty.
    #[error("network '{network}' requires environment variable '{variable}' to be set")]
    MissingCredential {
        /// Network whose provider was being built.
        network: String,
        /// Name of the absent environment variable.
        variable: String,
    },

    /// Configuration file could not be resolved, read, or parsed.
    #[error("config: {0}")]
    Config(String),

    /// Mnemonic parsing or key derivation failed.
    #[error("signer: {0}")]
    Signer(String),

    /// Provider endpoint could not be built.
    #[error("provider: {0}")]
    Provider(String),
}

impl Error {
    /// Creates an [`Error::Config`] from a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an [`Error::Config`] from a message and an underlying cause.
    #[must_use]
    pub fn config_with(msg: impl AsRef<str>, source: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {source}", msg.as_ref()))
    }

    /// Creates an [`Error::Signer`] from a message and an underlying cause.
    #[must_use]
    pub fn signer_with(msg: impl AsRef<str>, source: impl std::fmt::Display) -> Self {
        Self::Signer(format!("{}: {source}", msg.as_ref()))
    }

    /// Creates an [`Error::Provider`] from a message and an underlying cause.
    #[must_use]
    pub fn provider_with(msg: impl AsRef<str>, source: impl std::fmt::Display) -> Self {
        Self::Provider(format!("{}: {source}", msg.as_ref()))
    }
}
