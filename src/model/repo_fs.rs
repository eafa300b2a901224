//! Filesystem repository for model artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::common::error::{HouseError, HouseResult};
use crate::common::time;

use super::artifact::ModelArtifact;
use super::domain::{LoadedModel, ModelVersion};

/// Repository contract for model artifacts.
pub trait ModelRepo {
    fn put_artifact(&self, artifact: &ModelArtifact) -> HouseResult<()>;
    fn load(&self) -> HouseResult<LoadedModel>;
}

/// A single JSON artifact at a fixed path.
pub struct FsModelRepo {
    path: PathBuf,
}

impl FsModelRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelRepo for FsModelRepo {
    fn put_artifact(&self, artifact: &ModelArtifact) -> HouseResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(artifact)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn load(&self) -> HouseResult<LoadedModel> {
        let start = Instant::now();
        let bytes = fs::read(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => HouseError::model_missing(self.path.display().to_string()),
            _ => HouseError::Io(err),
        })?;

        let fingerprint = hex::encode(Sha256::digest(&bytes));
        let artifact: ModelArtifact = serde_json::from_slice(&bytes).map_err(|err| {
            HouseError::model_invalid(format!("{}: {err}", self.path.display()))
        })?;
        let kind = artifact.kind();
        let regressor = artifact.compile()?;

        let version = ModelVersion {
            kind,
            fingerprint,
            artefact_path: Some(self.path.clone()),
        };
        info!(
            ev = "model_loaded",
            kind = kind.as_str(),
            model = version.short_fingerprint(),
            path = %self.path.display(),
            dur_ms = time::elapsed_ms(start),
            "loaded model artifact"
        );
        Ok(LoadedModel::new(version, regressor))
    }
}
