use std::{fmt::Display, path::PathBuf};

use alloy::signers::local::LocalSignerError;

/// Errors raised while deploying a contract.
///
/// None of these are recovered from locally; they surface at the process
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// No signing identity is configured.
    #[error("no signing identity available: configure a private key or mnemonic")]
    IdentityUnavailable,

    /// A configured private key or mnemonic could not be turned into a signer.
    #[error("invalid signer configuration")]
    InvalidSigner(#[source] LocalSignerError),

    /// No compiled artifact carries the requested contract name.
    #[error("artifact for contract `{name}` not found in {}", dir.display())]
    ArtifactNotFound { name: String, dir: PathBuf },

    /// More than one compiled artifact carries the requested contract name.
    #[error(
        "contract name `{name}` is ambiguous, found {} artifacts: {candidates:?}",
        candidates.len()
    )]
    ArtifactAmbiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },

    /// An artifact file exists but cannot be used to deploy.
    #[error("invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    /// The deployment was refused by the network or failed on-chain.
    #[error("deployment of `{contract}` rejected: {reason}")]
    DeploymentRejected { contract: String, reason: String },

    /// The deployment succeeded but the report could not be written.
    #[error("failed to write deployment report")]
    Report(#[from] std::io::Error),
}

impl DeployError {
    pub(crate) fn rejected(contract: &str, reason: impl Display) -> Self {
        Self::DeploymentRejected {
            contract: contract.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_artifact(path: impl Into<PathBuf>, reason: impl Display) -> Self {
        Self::InvalidArtifact {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
