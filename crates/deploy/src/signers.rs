//! Signing identities available to the deployer.

use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};
use tracing::debug;

use crate::DeployError;

/// Source of signing identities, ordered by preference.
pub trait SignerSource {
    /// Returns every configured identity. An empty list is not an error here;
    /// the caller decides whether it needs one.
    fn signers(&self) -> Result<Vec<PrivateKeySigner>, DeployError>;
}

impl SignerSource for Vec<PrivateKeySigner> {
    fn signers(&self) -> Result<Vec<PrivateKeySigner>, DeployError> {
        Ok(self.clone())
    }
}

impl<T: SignerSource + ?Sized> SignerSource for &T {
    fn signers(&self) -> Result<Vec<PrivateKeySigner>, DeployError> {
        (**self).signers()
    }
}

/// Identities built from raw private keys and an optional BIP-39 mnemonic.
///
/// Private keys come first, followed by `mnemonic_accounts` accounts derived
/// from the mnemonic along the default Ethereum path.
#[derive(Clone, Default)]
pub struct ConfiguredSigners {
    private_keys: Vec<String>,
    mnemonic: Option<String>,
    mnemonic_accounts: u32,
}

impl ConfiguredSigners {
    pub fn new(private_keys: Vec<String>) -> Self {
        Self {
            private_keys,
            mnemonic: None,
            mnemonic_accounts: 0,
        }
    }

    pub fn with_mnemonic(mut self, phrase: impl Into<String>, accounts: u32) -> Self {
        self.mnemonic = Some(phrase.into());
        self.mnemonic_accounts = accounts;
        self
    }
}

// Keys and phrases must never reach logs.
impl std::fmt::Debug for ConfiguredSigners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredSigners")
            .field("private_keys", &self.private_keys.len())
            .field("mnemonic", &self.mnemonic.is_some())
            .field("mnemonic_accounts", &self.mnemonic_accounts)
            .finish()
    }
}

impl SignerSource for ConfiguredSigners {
    fn signers(&self) -> Result<Vec<PrivateKeySigner>, DeployError> {
        let mut signers = self
            .private_keys
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(DeployError::InvalidSigner)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let phrase = self
            .mnemonic
            .as_deref()
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty());
        if let Some(phrase) = phrase {
            for index in 0..self.mnemonic_accounts {
                let signer = MnemonicBuilder::<English>::default()
                    .phrase(phrase)
                    .index(index)
                    .and_then(|builder| builder.build())
                    .map_err(DeployError::InvalidSigner)?;
                signers.push(signer);
            }
        }

        debug!(count = signers.len(), "loaded signing identities");
        Ok(signers)
    }
}
