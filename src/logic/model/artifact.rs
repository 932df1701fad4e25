//! Model Artifact - Read and verify the serialized classifier on disk
//!
//! Optional integrity check against a `sha256sum`-style sidecar
//! (`<hex digest> [file name]`). Any failure here is a deployment error.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::logic::error::{ScoringError, ScoringResult};

#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    /// Lowercase hex SHA-256 of `bytes`
    pub sha256: String,
    /// Whether a sidecar checksum was present and matched
    pub verified: bool,
}

/// Default sidecar location: `model.json` → `model.json.sha256`
pub fn default_checksum_path(model_path: &Path) -> PathBuf {
    let mut name = model_path.as_os_str().to_os_string();
    name.push(".sha256");
    PathBuf::from(name)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Read the artifact and verify it.
///
/// An explicit `checksum_path` must exist. Without one, the default sidecar
/// is verified when present and skipped otherwise.
pub fn read_artifact(model_path: &Path, checksum_path: Option<&Path>) -> ScoringResult<ModelArtifact> {
    log::info!("Loading model artifact from: {}", model_path.display());

    let bytes = fs::read(model_path).map_err(|e| {
        ScoringError::ModelUnavailable(format!("cannot read {}: {}", model_path.display(), e))
    })?;
    let digest = sha256_hex(&bytes);

    let sidecar = match checksum_path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(default_checksum_path(model_path)).filter(|p| p.exists()),
    };

    let verified = match sidecar {
        Some(path) => {
            let expected = read_checksum(&path)?;
            if !expected.eq_ignore_ascii_case(&digest) {
                return Err(ScoringError::ModelUnavailable(format!(
                    "checksum mismatch for {}: expected {}, got {}",
                    model_path.display(),
                    expected,
                    digest
                )));
            }
            log::info!("Model checksum verified ({})", &digest[..12]);
            true
        }
        None => {
            log::debug!("No checksum sidecar for {}, skipping verification", model_path.display());
            false
        }
    };

    Ok(ModelArtifact {
        path: model_path.to_path_buf(),
        bytes,
        sha256: digest,
        verified,
    })
}

fn read_checksum(path: &Path) -> ScoringResult<String> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScoringError::ModelUnavailable(format!("cannot read checksum {}: {}", path.display(), e))
    })?;

    content
        .split_whitespace()
        .next()
        .map(|s| s.to_string())
        .ok_or_else(|| ScoringError::ModelUnavailable(format!("empty checksum file {}", path.display())))
}
