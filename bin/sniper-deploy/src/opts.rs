use std::{path::PathBuf, time::Duration};

use clap::Parser;
use eyre::{Result, WrapErr as _};
use sniper_deploy::{ArtifactDir, ConfiguredSigners, Orchestrator, RpcDeployer};
use url::Url;

#[derive(Parser)]
#[command(name = "sniper-deploy")]
#[command(
    version,
    about = "Deploy the VirtualsSniper contract and print its address",
    long_about = None
)]
pub(crate) struct DeployCli {
    /// JSON-RPC endpoint of the target network
    #[arg(long, env = "RPC_URL", default_value = "http://localhost:8545")]
    rpc_url: Url,

    /// Deployer private key(s), comma separated; the first one signs
    #[arg(long, env = "PRIVATE_KEY", value_delimiter = ',', hide_env_values = true)]
    private_key: Vec<String>,

    /// BIP-39 mnemonic to derive deployer accounts from
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,

    /// Number of accounts to derive from the mnemonic
    #[arg(long, env = "MNEMONIC_ACCOUNTS", default_value_t = 1)]
    mnemonic_accounts: u32,

    /// Directory holding compiled contract artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = "artifacts")]
    artifacts: PathBuf,

    /// Seconds to wait for the deployment receipt (unbounded if unset)
    #[arg(long, env = "RECEIPT_TIMEOUT")]
    receipt_timeout: Option<u64>,

    /// Blocks to wait for before the deployment counts as mined
    #[arg(
        long,
        env = "CONFIRMATIONS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    confirmations: u64,
}

// Keeps keys and the mnemonic out of any debug output.
impl std::fmt::Debug for DeployCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployCli")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("artifacts", &self.artifacts)
            .field("receipt_timeout", &self.receipt_timeout)
            .field("confirmations", &self.confirmations)
            .finish_non_exhaustive()
    }
}

impl DeployCli {
    pub(crate) async fn run(self) -> Result<()> {
        tracing::debug!(args = ?self, "starting deployment");

        let mut signers = ConfiguredSigners::new(self.private_key);
        if let Some(mnemonic) = self.mnemonic {
            signers = signers.with_mnemonic(mnemonic, self.mnemonic_accounts);
        }

        let deployer = RpcDeployer::new(self.rpc_url)
            .with_confirmations(self.confirmations)
            .with_receipt_timeout(self.receipt_timeout.map(Duration::from_secs));

        let orchestrator = Orchestrator::new(signers, ArtifactDir::new(self.artifacts), deployer);

        orchestrator
            .deploy(&mut std::io::stdout())
            .await
            .wrap_err("deployment failed")?;

        Ok(())
    }
}
