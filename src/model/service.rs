//! Model lifecycle entry points used by the binary and the HTTP layer.

use std::sync::Arc;

use crate::common::config::AppCfg;
use crate::common::error::HouseResult;

use super::domain::LoadedModel;
use super::repo_fs::{FsModelRepo, ModelRepo};

/// Load the configured artifact once; the result is shared read-only.
pub fn load_model(cfg: &AppCfg) -> HouseResult<Arc<LoadedModel>> {
    FsModelRepo::new(&cfg.model_path).load().map(Arc::new)
}
