use std::io::Write;

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, address},
};
use tracing::info;

use crate::{ArtifactSource, ContractDeployer, DeployError, DeployedContract, SignerSource};

/// Name of the compiled contract to deploy.
pub const CONTRACT_NAME: &str = "VirtualsSniper";

/// Uniswap V2 router, first constructor argument.
pub const UNISWAP_V2_ROUTER: Address = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");

/// Wrapped native token on OP-stack chains, second constructor argument.
pub const WRAPPED_NATIVE_TOKEN: Address = address!("4200000000000000000000000000000000000006");

/// Constructor arguments in declaration order.
pub fn constructor_args() -> Vec<DynSolValue> {
    vec![
        DynSolValue::Address(UNISWAP_V2_ROUTER),
        DynSolValue::Address(WRAPPED_NATIVE_TOKEN),
    ]
}

/// Runs a single deployment: identity, artifact, submission, report.
///
/// There is no retry and no deduplication; every call to [`Self::deploy`]
/// sends a new creation transaction.
#[derive(Debug)]
pub struct Orchestrator<S, A, D> {
    signers: S,
    artifacts: A,
    deployer: D,
}

impl<S, A, D> Orchestrator<S, A, D>
where
    S: SignerSource,
    A: ArtifactSource,
    D: ContractDeployer,
{
    pub const fn new(signers: S, artifacts: A, deployer: D) -> Self {
        Self {
            signers,
            artifacts,
            deployer,
        }
    }

    /// Deploys [`CONTRACT_NAME`] and writes `Deployed to: <address>` to `out`.
    pub async fn deploy<W: Write>(&self, out: &mut W) -> Result<DeployedContract, DeployError> {
        let identity = self
            .signers
            .signers()?
            .into_iter()
            .next()
            .ok_or(DeployError::IdentityUnavailable)?;
        info!(deployer = %identity.address(), "using signing identity");

        let factory = self.artifacts.contract_factory(CONTRACT_NAME)?;
        let request = factory.deploy_request(constructor_args())?;

        let deployed = self.deployer.deploy(&identity, &request).await?;

        writeln!(out, "Deployed to: {}", deployed.address())?;
        Ok(deployed)
    }
}
