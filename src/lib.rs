// lib.rs - house price prediction form
pub mod api;
pub mod cli;
pub mod common;
pub mod data;
pub mod inference;
pub mod model;

pub use common::{HouseError, HouseResult};
pub use data::{FeatureRecord, FormInput, HouseAttributes};
pub use model::{LoadedModel, Regressor};
