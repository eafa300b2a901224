//! Model abstractions: the black-box regressor and its version metadata.

use std::fmt;
use std::path::PathBuf;

use crate::common::error::HouseResult;
use crate::data::domain::FeatureRecord;

/// Anything that maps feature rows to predicted prices.
///
/// Implementations return exactly one value per input row.
pub trait Regressor: Send + Sync {
    fn predict(&self, rows: &[FeatureRecord]) -> HouseResult<Vec<f64>>;
}

/// Family of the loaded model.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ModelKind {
    RandomForest,
    Linear,
    /// A regressor supplied in code rather than read from an artifact.
    Embedded,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::Linear => "linear",
            ModelKind::Embedded => "embedded",
        }
    }
}

/// Where a model came from and which bytes it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelVersion {
    pub kind: ModelKind,
    /// Hex SHA-256 of the artifact bytes.
    pub fingerprint: String,
    pub artefact_path: Option<PathBuf>,
}

impl ModelVersion {
    /// First 12 characters, enough to tell artifacts apart in logs.
    pub fn short_fingerprint(&self) -> &str {
        match self.fingerprint.char_indices().nth(12) {
            Some((end, _)) => &self.fingerprint[..end],
            None => self.fingerprint.as_str(),
        }
    }
}

/// A model ready for inference. Immutable once built.
pub struct LoadedModel {
    pub version: ModelVersion,
    regressor: Box<dyn Regressor>,
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl LoadedModel {
    pub fn new(version: ModelVersion, regressor: Box<dyn Regressor>) -> Self {
        Self { version, regressor }
    }

    /// Wrap an in-code regressor, e.g. a fixture or a model built by another crate.
    pub fn embedded(label: impl Into<String>, regressor: impl Regressor + 'static) -> Self {
        Self::new(
            ModelVersion {
                kind: ModelKind::Embedded,
                fingerprint: label.into(),
                artefact_path: None,
            },
            Box::new(regressor),
        )
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }
}
