//! Compiled contract artifacts on disk.
//!
//! Understands the Hardhat layout (`artifacts/contracts/<File>.sol/<Name>.json`,
//! with `build-info/` and `*.dbg.json` alongside) and the Foundry layout
//! (`out/<File>.sol/<Name>.json`, where `bytecode` is an object).

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use tracing::debug;

use crate::{ContractFactory, DeployError};

/// Registry resolving contract names to deployable factories.
pub trait ArtifactSource {
    fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeployError>;
}

impl<T: ArtifactSource + ?Sized> ArtifactSource for &T {
    fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeployError> {
        (**self).contract_factory(name)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: Option<String>,
    abi: JsonAbi,
    bytecode: ArtifactBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

impl ArtifactBytecode {
    fn into_bytes(self) -> Bytes {
        match self {
            Self::Hex(bytes) | Self::Object { object: bytes } => bytes,
        }
    }
}

/// Artifacts read from a build output directory.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collects every `<name>.json` below the root, skipping build info and
    /// debug files. Symlinked directories are not followed.
    fn candidates(&self, name: &str) -> Result<Vec<PathBuf>, DeployError> {
        let file_name = format!("{name}.json");
        let mut found = Vec::new();
        let mut pending = vec![self.root().to_path_buf()];

        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) if err.kind() == ErrorKind::NotFound && dir == self.root => break,
                Err(err) => return Err(DeployError::invalid_artifact(dir, err)),
            };

            for entry in entries {
                let entry = entry.map_err(|err| DeployError::invalid_artifact(&dir, err))?;
                let file_type = entry
                    .file_type()
                    .map_err(|err| DeployError::invalid_artifact(entry.path(), err))?;
                if file_type.is_dir() {
                    if entry.file_name() != "build-info" {
                        pending.push(entry.path());
                    }
                } else if entry.file_name() == file_name.as_str() {
                    found.push(entry.path());
                }
            }
        }

        found.sort();
        Ok(found)
    }

    fn load(path: &Path, name: &str) -> Result<Option<ContractFactory>, DeployError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| DeployError::invalid_artifact(path, err))?;
        let artifact: ArtifactFile = serde_json::from_str(&raw)
            .map_err(|err| DeployError::invalid_artifact(path, err))?;

        // Hardhat records the name explicitly; a mismatch means the file name
        // only coincides.
        if artifact
            .contract_name
            .as_deref()
            .is_some_and(|recorded| recorded != name)
        {
            return Ok(None);
        }

        let bytecode = artifact.bytecode.into_bytes();
        if bytecode.is_empty() {
            return Err(DeployError::invalid_artifact(
                path,
                "no deployable bytecode (interface or abstract contract)",
            ));
        }

        Ok(Some(ContractFactory::new(name.to_string(), artifact.abi, bytecode)))
    }
}

impl ArtifactSource for ArtifactDir {
    fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeployError> {
        let mut matches = Vec::new();
        for path in self.candidates(name)? {
            if let Some(factory) = Self::load(&path, name)? {
                matches.push((path, factory));
            }
        }

        match matches.len() {
            0 => Err(DeployError::ArtifactNotFound {
                name: name.to_string(),
                dir: self.root().to_path_buf(),
            }),
            1 => {
                let (path, factory) = matches.remove(0);
                debug!(
                    contract = name,
                    path = %path.display(),
                    bytecode_len = factory.bytecode().len(),
                    "loaded artifact"
                );
                Ok(factory)
            }
            _ => Err(DeployError::ArtifactAmbiguous {
                name: name.to_string(),
                candidates: matches.into_iter().map(|(path, _)| path).collect(),
            }),
        }
    }
}
