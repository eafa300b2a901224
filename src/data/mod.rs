//! Data domain: house attributes, raw form input and the feature record.

pub mod domain;
pub mod input;

pub use domain::{FeatureRecord, HouseAttributes, FEATURE_NAMES};
pub use input::FormInput;
