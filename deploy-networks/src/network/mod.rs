//! Network descriptors, the registry that holds them, and provider construction.
//!
//! - [`descriptor`] — [`NetworkDescriptor`] and its direct/deferred variants.
//! - [`registry`] — [`NetworkRegistry`], the immutable name → descriptor map.
//! - [`provider`] — [`HdWalletProvider`] built on demand from a deferred entry.

mod descriptor;
mod provider;
mod registry;

pub use self::descriptor::*;
pub use self::provider::*;
pub use self::registry::*;
