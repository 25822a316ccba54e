//! CLI definitions and command implementations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod init;
pub mod list;
pub mod provider;
pub mod show;

/// Network registry for contract deployments.
#[derive(Debug, Parser)]
#[command(name = "deploy-networks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter implied by `--verbose`.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a default TOML configuration file.
    Init {
        /// Output path for the configuration file.
        #[arg(short, long, default_value = "networks.toml")]
        output: PathBuf,

        /// Overwrite the file if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// List configured networks.
    List {
        /// TOML configuration file; the built-in table is used when omitted.
        #[arg(short, long, env = "NETWORKS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print a network's descriptor as JSON without reading credentials.
    Show {
        /// Network name.
        network: String,

        /// TOML configuration file; the built-in table is used when omitted.
        #[arg(short, long, env = "NETWORKS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Build a network's provider from the environment and print its summary.
    Provider {
        /// Network name.
        network: String,

        /// TOML configuration file; the built-in table is used when omitted.
        #[arg(short, long, env = "NETWORKS_CONFIG")]
        config: Option<PathBuf>,
    },
}
