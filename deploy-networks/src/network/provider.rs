//! Wallet-backed provider construction for deferred networks.

use std::fmt;

use alloy_network::EthereumWallet;
use alloy_signer_local::PrivateKeySigner;
use url::Url;

use super::descriptor::{DeferredDescriptor, NetworkId};
use crate::credentials::CredentialSource;
use crate::error::Error;

const REDACTED: &str = "***";

/// Signing wallet paired with the RPC endpoint of one network.
///
/// Produced only by [`DeferredDescriptor::build_provider`]; holding one
/// implies the credentials for that network were present and valid.
#[derive(Clone)]
pub struct HdWalletProvider {
    network_id: NetworkId,
    endpoint: Url,
    redacted_endpoint: String,
    addresses: Vec<String>,
    wallet: EthereumWallet,
}

impl HdWalletProvider {
    /// Network id of the target chain.
    #[must_use]
    pub const fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Fully resolved RPC endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Checksummed addresses of the derived accounts, default sender first.
    #[must_use]
    pub fn signer_addresses(&self) -> &[String] {
        &self.addresses
    }

    /// The signing wallet holding every derived account.
    #[must_use]
    pub const fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }

    /// Endpoint template with `***` in place of the project id.
    #[must_use]
    pub fn redacted_endpoint(&self) -> &str {
        &self.redacted_endpoint
    }
}

impl fmt::Debug for HdWalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdWalletProvider")
            .field("network_id", &self.network_id)
            .field("endpoint", &self.redacted_endpoint)
            .field("addresses", &self.addresses)
            .finish_non_exhaustive()
    }
}

impl DeferredDescriptor {
    /// Builds the provider for this network from `credentials`.
    ///
    /// `name` is only used to label errors and log records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if the mnemonic or project id is
    /// unset, [`Error::Signer`] if the mnemonic is invalid or derivation fails,
    /// and [`Error::Provider`] if the endpoint is not a valid URL.
    pub fn build_provider(
        &self,
        name: &str,
        credentials: &dyn CredentialSource,
    ) -> Result<HdWalletProvider, Error> {
        let require = |variable: &str| {
            credentials
                .lookup(variable)
                .ok_or_else(|| Error::MissingCredential {
                    network: name.to_owned(),
                    variable: variable.to_owned(),
                })
        };
        let mnemonic = require(&self.mnemonic_env)?;
        let project_id = require(&self.project_id_env)?;

        let endpoint = Url::parse(&self.endpoint_for(&project_id))
            .map_err(|e| Error::provider_with(format!("invalid endpoint for network '{name}'"), e))?;

        let signers = derive_signers(&mnemonic, &self.derivation_paths())?;
        let addresses: Vec<String> = signers.iter().map(|s| s.address().to_checksum(None)).collect();

        let mut iter = signers.into_iter();
        let first = iter.next().ok_or_else(|| {
            Error::Signer(format!("no accounts derived for network '{name}'"))
        })?;
        let mut wallet = EthereumWallet::from(first);
        for signer in iter {
            wallet.register_signer(signer);
        }

        tracing::info!(
            network = name,
            network_id = %self.network_id,
            host = endpoint.host_str().unwrap_or_default(),
            accounts = addresses.len(),
            "provider built"
        );

        Ok(HdWalletProvider {
            network_id: self.network_id,
            endpoint,
            redacted_endpoint: self.endpoint_for(REDACTED),
            addresses,
            wallet,
        })
    }
}

/// Derive one signer per BIP-44 path from a mnemonic phrase.
fn derive_signers(mnemonic: &str, paths: &[String]) -> Result<Vec<PrivateKeySigner>, Error> {
    let wallet = kobe::Wallet::from_mnemonic(mnemonic, None)
        .map_err(|e| Error::signer_with("mnemonic parse error", e))?;
    let deriver = kobe_eth::Deriver::new(&wallet);
    paths
        .iter()
        .map(|path| {
            let derived = deriver
                .derive_path(path)
                .map_err(|e| Error::signer_with(format!("key derivation error at {path}"), e))?;
            format!("0x{}", &*derived.private_key_hex)
                .parse::<PrivateKeySigner>()
                .map_err(|e| Error::signer_with("failed to parse derived key", e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloy_network::TxSigner;

    use super::*;
    use crate::credentials::{Credentials, DEV_MNEMONIC, INFURA_PROJECT_ID};
    use crate::network::{NetworkKind, NetworkRegistry};

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";
    const FIRST_ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const SECOND_ACCOUNT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    fn deferred(registry: &NetworkRegistry, name: &str) -> DeferredDescriptor {
        match &registry.resolve(name).unwrap().kind {
            NetworkKind::Deferred(deferred) => deferred.clone(),
            NetworkKind::Direct(_) => panic!("{name} should be deferred"),
        }
    }

    #[test]
    fn ropsten_provider_uses_project_id_and_mnemonic() {
        let registry = NetworkRegistry::builtin();
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, TEST_MNEMONIC), (INFURA_PROJECT_ID, "p")]);
        let provider = deferred(&registry, "ropsten")
            .build_provider("ropsten", &creds)
            .unwrap();
        assert_eq!(provider.network_id(), NetworkId::Id(3));
        assert_eq!(provider.endpoint().as_str(), "https://ropsten.infura.io/v3/p");
        assert_eq!(provider.signer_addresses(), [FIRST_ACCOUNT]);
    }

    #[test]
    fn mainnet_provider_uses_mainnet_endpoint() {
        let registry = NetworkRegistry::builtin();
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, TEST_MNEMONIC), (INFURA_PROJECT_ID, "p")]);
        let provider = deferred(&registry, "mainnet")
            .build_provider("mainnet", &creds)
            .unwrap();
        assert_eq!(provider.network_id(), NetworkId::Id(1));
        assert_eq!(provider.endpoint().as_str(), "https://mainnet.infura.io/v3/p");
        assert_eq!(provider.redacted_endpoint(), "https://mainnet.infura.io/v3/***");
    }

    #[test]
    fn project_id_is_masked_wherever_the_template_puts_it() {
        let creds = Credentials::from_pairs([
            (DEV_MNEMONIC, TEST_MNEMONIC),
            (INFURA_PROJECT_ID, "SECRETPID"),
        ]);
        for (template, expected) in [
            (
                "https://rpc.ankr.com/eth/{project_id}/",
                "https://rpc.ankr.com/eth/***/",
            ),
            (
                "https://eth.example.com/rpc?apikey={project_id}",
                "https://eth.example.com/rpc?apikey=***",
            ),
            (
                "https://{project_id}.example.com/v1",
                "https://***.example.com/v1",
            ),
        ] {
            let provider = DeferredDescriptor::new(NetworkId::Id(1), template)
                .build_provider("custom", &creds)
                .unwrap();
            assert_eq!(provider.redacted_endpoint(), expected);
            let debug = format!("{provider:?}").to_lowercase();
            assert!(!debug.contains("secretpid"), "{template} leaked in {debug}");
        }
    }

    #[test]
    fn address_index_shifts_first_account() {
        let mut descriptor =
            DeferredDescriptor::new(NetworkId::Id(3), "https://ropsten.infura.io/v3/{project_id}");
        descriptor.address_index = 1;
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, TEST_MNEMONIC), (INFURA_PROJECT_ID, "p")]);
        let provider = descriptor.build_provider("ropsten", &creds).unwrap();
        assert_eq!(provider.signer_addresses(), [SECOND_ACCOUNT]);
        assert_eq!(
            provider.wallet().default_signer().address().to_checksum(None),
            SECOND_ACCOUNT
        );
    }

    #[test]
    fn missing_project_id_is_reported_and_isolated() {
        let registry = NetworkRegistry::builtin();
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, TEST_MNEMONIC)]);
        let err = deferred(&registry, "ropsten")
            .build_provider("ropsten", &creds)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredential { ref network, ref variable }
                if network == "ropsten" && variable == INFURA_PROJECT_ID
        ));

        assert!(registry.resolve("development").is_ok());
        assert!(registry.resolve("mainnet").is_ok());
    }

    #[test]
    fn missing_mnemonic_is_reported() {
        let registry = NetworkRegistry::builtin();
        let creds = Credentials::from_pairs([(INFURA_PROJECT_ID, "p")]);
        let err = deferred(&registry, "mainnet")
            .build_provider("mainnet", &creds)
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredential { ref variable, .. } if variable == DEV_MNEMONIC));
    }

    #[test]
    fn invalid_mnemonic_is_a_signer_error() {
        let registry = NetworkRegistry::builtin();
        let creds = Credentials::from_pairs([
            (DEV_MNEMONIC, "not a real seed phrase"),
            (INFURA_PROJECT_ID, "p"),
        ]);
        let err = deferred(&registry, "ropsten")
            .build_provider("ropsten", &creds)
            .unwrap_err();
        assert!(matches!(err, Error::Signer(_)));
    }

    #[test]
    fn derives_consecutive_accounts() {
        let mut descriptor =
            DeferredDescriptor::new(NetworkId::Id(3), "https://ropsten.infura.io/v3/{project_id}");
        descriptor.num_addresses = 2;
        let creds = Credentials::from_pairs([(DEV_MNEMONIC, TEST_MNEMONIC), (INFURA_PROJECT_ID, "p")]);
        let provider = descriptor.build_provider("ropsten", &creds).unwrap();
        assert_eq!(provider.signer_addresses(), [FIRST_ACCOUNT, SECOND_ACCOUNT]);
        assert_eq!(
            provider.wallet().default_signer().address().to_checksum(None),
            FIRST_ACCOUNT
        );
    }

    #[test]
    fn custom_variable_names_are_honoured() {
        let mut descriptor =
            DeferredDescriptor::new(NetworkId::Id(5), "https://goerli.infura.io/v3/{project_id}");
        descriptor.mnemonic_env = "GOERLI_MNEMONIC".to_owned();
        descriptor.project_id_env = "GOERLI_PROJECT".to_owned();
        let creds = Credentials::from_pairs([("GOERLI_MNEMONIC", TEST_MNEMONIC), ("GOERLI_PROJECT", "g")]);
        let provider = descriptor.build_provider("goerli", &creds).unwrap();
        assert_eq!(provider.endpoint().as_str(), "https://goerli.infura.io/v3/g");
    }
}
