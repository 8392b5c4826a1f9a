//! Deployment of the `VirtualsSniper` contract.
//!
//! The [`Orchestrator`] takes a signing identity from a [`SignerSource`], the
//! compiled contract from an [`ArtifactSource`] and hands the resulting
//! creation transaction to a [`ContractDeployer`]. Each collaborator is a
//! trait so the sequence can run against mocks.

mod artifacts;
mod deployer;
mod error;
mod factory;
mod orchestrator;
mod signers;

pub use artifacts::{ArtifactDir, ArtifactSource};
pub use deployer::{ContractDeployer, RpcDeployer};
pub use error::DeployError;
pub use factory::{ContractFactory, DeployedContract, DeploymentRequest};
pub use orchestrator::{
    CONTRACT_NAME, Orchestrator, UNISWAP_V2_ROUTER, WRAPPED_NATIVE_TOKEN, constructor_args,
};
pub use signers::{ConfiguredSigners, SignerSource};
