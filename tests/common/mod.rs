#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use houseprice::model::domain::LoadedModel;
use houseprice::model::repo_fs::{FsModelRepo, ModelRepo};
use houseprice::{FeatureRecord, HouseResult, Regressor};
use serde_json::json;
use tempfile::TempDir;

/// Regressor that ignores its input.
pub struct Constant(pub f64);

impl Regressor for Constant {
    fn predict(&self, rows: &[FeatureRecord]) -> HouseResult<Vec<f64>> {
        Ok(vec![self.0; rows.len()])
    }
}

pub fn constant_model(value: f64) -> Arc<LoadedModel> {
    Arc::new(LoadedModel::embedded("constant-fixture", Constant(value)))
}

/// Temp dir holding a two-tree forest split on sqft_living and waterfront.
pub struct ModelDir {
    _tmp: TempDir,
    pub path: PathBuf,
}

impl ModelDir {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("forest_model.json");
        write_forest(&path);
        Self { _tmp: tmp, path }
    }

    pub fn load(&self) -> Arc<LoadedModel> {
        Arc::new(FsModelRepo::new(&self.path).load().expect("fixture model loads"))
    }
}

fn write_forest(path: &Path) {
    let artifact = json!({
        "kind": "random_forest",
        "feature_names": ["sqft_living", "waterfront"],
        "trees": [
            { "nodes": [
                { "feature": 0, "threshold": 2000.0, "left": 1, "right": 2 },
                { "value": 400000.0 },
                { "value": 700000.0 }
            ]},
            { "nodes": [
                { "feature": 1, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": 500000.0 },
                { "value": 1500000.0 }
            ]}
        ]
    });
    fs::write(path, serde_json::to_vec_pretty(&artifact).unwrap()).expect("write fixture model");
}

/// Urlencoded body for a fully filled form.
pub fn form_body(n_clicks: u32, waterfront: &str) -> String {
    format!(
        "bedrooms-dropdown=3&bathrooms-dropdown=2&sqft-interior-input=1500&sqft-land-input=5000\
         &floors-dropdown=1&waterfront-dropdown={waterfront}&view-dropdown=0&condition-dropdown=3\
         &grade-dropdown=7&latitude=47.5112&longitude=-122.257&n_clicks={n_clicks}"
    )
}
