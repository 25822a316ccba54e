//! Network registry for contract deployments.
//!
//! Maps a network name to either literal connection parameters or a
//! wallet-backed provider that is only built when the network is selected.
//!
//! ```no_run
//! use deploy_networks::credentials::Credentials;
//! use deploy_networks::network::{NetworkKind, NetworkRegistry};
//!
//! # fn main() -> Result<(), deploy_networks::error::Error> {
//! let registry = NetworkRegistry::builtin();
//! if let NetworkKind::Deferred(remote) = &registry.resolve("ropsten")?.kind {
//!     let provider = remote.build_provider("ropsten", &Credentials::from_env())?;
//!     println!("{}", provider.redacted_endpoint());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod config;
pub mod credentials;
pub mod error;
pub mod network;
pub mod telemetry;
