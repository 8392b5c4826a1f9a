use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    primitives::{Address, B256, Bytes},
};

use crate::DeployError;

/// A compiled contract that knows how to build its own creation transaction.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

impl ContractFactory {
    pub const fn new(name: String, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            name,
            abi,
            bytecode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub const fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Builds the creation code for the given constructor arguments.
    ///
    /// Arguments are type-checked against the constructor in the ABI; a
    /// contract without a constructor only accepts an empty argument list.
    pub fn deploy_request(&self, args: Vec<DynSolValue>) -> Result<DeploymentRequest, DeployError> {
        let encoded_args = match self.abi.constructor() {
            Some(constructor) => constructor.abi_encode_input(&args).map_err(|err| {
                DeployError::rejected(&self.name, format!("invalid constructor arguments: {err}"))
            })?,
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(DeployError::rejected(
                    &self.name,
                    format!(
                        "contract has no constructor but {} arguments were given",
                        args.len()
                    ),
                ));
            }
        };

        let code: Bytes = self
            .bytecode
            .iter()
            .copied()
            .chain(encoded_args)
            .collect::<Vec<u8>>()
            .into();

        Ok(DeploymentRequest {
            contract: self.name.clone(),
            args,
            code,
        })
    }
}

/// A fully built contract creation: bytecode followed by the ABI-encoded
/// constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRequest {
    pub contract: String,
    pub args: Vec<DynSolValue>,
    pub code: Bytes,
}

/// A contract instance that has been mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub contract: String,
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
}

impl DeployedContract {
    pub const fn address(&self) -> Address {
        self.address
    }
}
