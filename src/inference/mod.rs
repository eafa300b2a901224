//! Inference domain: the prediction handler behind the form.

pub mod domain;
pub mod service;

pub use domain::Prediction;
pub use service::{predict, update_prediction};
