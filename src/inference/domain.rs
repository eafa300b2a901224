//! Result type of a single prediction.

use serde::Serialize;

/// Predicted price plus the text shown on the page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub price: f64,
    pub text: String,
    /// Fingerprint of the model that produced the value.
    pub model: String,
    pub latency_ms: u64,
}
