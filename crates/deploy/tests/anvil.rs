//! Deploys against a local Anvil node.
//!
//! Requires the `anvil` binary on `PATH`, hence `#[ignore]`.

use std::{
    fs,
    path::Path,
    process::{Child, Command, Stdio},
    time::Duration,
};

use alloy::providers::{Provider, ProviderBuilder};
use sniper_deploy::{ArtifactDir, ConfiguredSigners, DeployError, Orchestrator, RpcDeployer};

/// Anvil's first default account.
const ANVIL_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Creation code returning a one-byte `STOP` runtime. Constructor arguments
/// appended to it are ignored.
const STOP_CREATION_CODE: &str = "0x6001600c60003960016000f300";

/// Creation code that reverts with empty data: `REVERT(0, 0)`.
const REVERTING_CREATION_CODE: &str = "0x60006000fd";

/// Anvil instance wrapper with automatic cleanup.
struct AnvilInstance {
    child: Child,
    rpc_url: String,
}

impl AnvilInstance {
    async fn start() -> eyre::Result<Self> {
        Self::start_with(&[]).await
    }

    async fn start_with(extra_args: &[&str]) -> eyre::Result<Self> {
        let port = portpicker::pick_unused_port().expect("no free port");

        let child = Command::new("anvil")
            .args(["--port", &port.to_string()])
            .args(extra_args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let rpc_url = format!("http://127.0.0.1:{port}");

        // Wait for anvil to be ready
        tokio::time::sleep(Duration::from_secs(2)).await;

        let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
        provider.get_block_number().await?;

        Ok(Self { child, rpc_url })
    }

    fn deployer(&self) -> eyre::Result<RpcDeployer> {
        Ok(RpcDeployer::new(self.rpc_url.parse()?))
    }
}

impl Drop for AnvilInstance {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

fn write_artifact(root: &Path, creation_code: &str) -> eyre::Result<()> {
    let dir = root.join("contracts/VirtualsSniper.sol");
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("VirtualsSniper.json"),
        format!(
            r#"{{"_format":"hh-sol-artifact-1","contractName":"VirtualsSniper",
            "sourceName":"contracts/VirtualsSniper.sol",
            "abi":[{{"type":"constructor","stateMutability":"nonpayable","inputs":[
                {{"name":"_router","type":"address","internalType":"address"}},
                {{"name":"_weth","type":"address","internalType":"address"}}]}}],
            "bytecode":"{creation_code}","deployedBytecode":"0x00",
            "linkReferences":{{}},"deployedLinkReferences":{{}}}}"#
        ),
    )?;
    Ok(())
}

fn anvil_signer() -> ConfiguredSigners {
    ConfiguredSigners::new(vec![ANVIL_KEY_0.to_string()])
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn deploys_to_anvil() -> eyre::Result<()> {
    let anvil = AnvilInstance::start().await?;
    let artifacts = tempfile::tempdir()?;
    write_artifact(artifacts.path(), STOP_CREATION_CODE)?;

    let orchestrator = Orchestrator::new(
        anvil_signer(),
        ArtifactDir::new(artifacts.path()),
        anvil
            .deployer()?
            .with_receipt_timeout(Some(Duration::from_secs(30))),
    );

    let mut out = Vec::new();
    let first = orchestrator.deploy(&mut out).await?;
    let second = orchestrator.deploy(&mut Vec::new()).await?;

    assert_eq!(
        String::from_utf8(out)?,
        format!("Deployed to: {}\n", first.address)
    );
    assert_ne!(first.address, second.address);

    let provider = ProviderBuilder::new().connect_http(anvil.rpc_url.parse()?);
    let code = provider.get_code_at(first.address).await?;
    assert_eq!(code.as_ref(), &[0x00]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn unfunded_identity_is_rejected() -> eyre::Result<()> {
    let anvil = AnvilInstance::start().await?;
    let artifacts = tempfile::tempdir()?;
    write_artifact(artifacts.path(), STOP_CREATION_CODE)?;

    // Not one of Anvil's prefunded accounts.
    let unfunded = "0x0123456789012345678901234567890123456789012345678901234567890123";
    let orchestrator = Orchestrator::new(
        ConfiguredSigners::new(vec![unfunded.to_string()]),
        ArtifactDir::new(artifacts.path()),
        anvil.deployer()?,
    );

    let err = orchestrator.deploy(&mut Vec::new()).await.unwrap_err();
    assert!(
        matches!(err, DeployError::DeploymentRejected { .. }),
        "unexpected error: {err}"
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn reverting_constructor_is_rejected() -> eyre::Result<()> {
    let anvil = AnvilInstance::start().await?;
    let artifacts = tempfile::tempdir()?;
    write_artifact(artifacts.path(), REVERTING_CREATION_CODE)?;

    let orchestrator = Orchestrator::new(
        anvil_signer(),
        ArtifactDir::new(artifacts.path()),
        anvil.deployer()?,
    );

    let mut out = Vec::new();
    let err = orchestrator.deploy(&mut out).await.unwrap_err();

    // Either gas estimation or the receipt status reports the revert.
    let DeployError::DeploymentRejected { reason, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert!(reason.contains("revert"), "unexpected reason: {reason}");
    assert!(out.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn receipt_timeout_is_rejected() -> eyre::Result<()> {
    // Without mining the transaction stays pending forever.
    let anvil = AnvilInstance::start_with(&["--no-mining"]).await?;
    let artifacts = tempfile::tempdir()?;
    write_artifact(artifacts.path(), STOP_CREATION_CODE)?;

    let orchestrator = Orchestrator::new(
        anvil_signer(),
        ArtifactDir::new(artifacts.path()),
        anvil
            .deployer()?
            .with_receipt_timeout(Some(Duration::from_secs(1))),
    );

    let mut out = Vec::new();
    let err = tokio::time::timeout(Duration::from_secs(30), orchestrator.deploy(&mut out))
        .await?
        .unwrap_err();

    assert!(
        matches!(err, DeployError::DeploymentRejected { .. }),
        "unexpected error: {err}"
    );
    assert!(out.is_empty());

    Ok(())
}
