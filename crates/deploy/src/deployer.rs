//! Submission of contract creations to a JSON-RPC node.

use std::time::Duration;

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::{DeployError, DeployedContract, DeploymentRequest};

/// Sends a deployment and resolves once it is mined.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    async fn deploy(
        &self,
        identity: &PrivateKeySigner,
        request: &DeploymentRequest,
    ) -> Result<DeployedContract, DeployError>;
}

#[async_trait]
impl<T: ContractDeployer + ?Sized> ContractDeployer for &T {
    async fn deploy(
        &self,
        identity: &PrivateKeySigner,
        request: &DeploymentRequest,
    ) -> Result<DeployedContract, DeployError> {
        (**self).deploy(identity, request).await
    }
}

/// Deployer backed by an HTTP JSON-RPC endpoint.
///
/// Gas, nonce and chain id are filled by the provider's recommended fillers.
#[derive(Debug, Clone)]
pub struct RpcDeployer {
    rpc_url: Url,
    confirmations: u64,
    receipt_timeout: Option<Duration>,
}

impl RpcDeployer {
    pub const fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            confirmations: 1,
            receipt_timeout: None,
        }
    }

    /// Number of blocks to wait for before the deployment counts as mined.
    pub const fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Upper bound on the wait for the receipt. Unbounded by default.
    pub const fn with_receipt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.receipt_timeout = timeout;
        self
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    async fn deploy(
        &self,
        identity: &PrivateKeySigner,
        request: &DeploymentRequest,
    ) -> Result<DeployedContract, DeployError> {
        let contract = request.contract.as_str();
        let rejected = |err: &dyn std::fmt::Display| DeployError::rejected(contract, err);
        let deployer = identity.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(identity.clone()))
            .connect_http(self.rpc_url.clone());

        let chain_id = provider.get_chain_id().await.map_err(|err| rejected(&err))?;
        let balance = provider
            .get_balance(deployer)
            .await
            .map_err(|err| rejected(&err))?;
        info!(
            %deployer,
            chain_id,
            %balance,
            contract,
            code_len = request.code.len(),
            "submitting deployment"
        );

        let tx = TransactionRequest::default()
            .with_from(deployer)
            .with_deploy_code(request.code.clone());
        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|err| rejected(&err))?;
        let tx_hash = *pending.tx_hash();
        debug!(
            %tx_hash,
            confirmations = self.confirmations,
            "deployment sent, waiting for receipt"
        );

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.receipt_timeout)
            .get_receipt()
            .await
            .map_err(|err| rejected(&err))?;

        if !receipt.status() {
            return Err(rejected(&format!("transaction {tx_hash} reverted")));
        }

        let address = receipt
            .contract_address
            .ok_or_else(|| rejected(&format!("no contract address in receipt of {tx_hash}")))?;

        info!(
            %address,
            %tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "deployment mined"
        );

        Ok(DeployedContract {
            contract: request.contract.clone(),
            address,
            transaction_hash: tx_hash,
            block_number: receipt.block_number,
        })
    }
}
