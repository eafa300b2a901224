//! Model domain: artifact format, loading, and the regressor abstraction.

pub mod artifact;
pub mod domain;
pub mod repo_fs;
pub mod service;

pub use artifact::ModelArtifact;
pub use domain::{LoadedModel, ModelKind, ModelVersion, Regressor};
