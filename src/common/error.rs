//! Error handling primitives shared across the crate.

use thiserror::Error;

/// Stable error codes carried in log events and API error bodies.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Input failed validation.
    InvalidInput = 1,
    /// Model artifact was not found on disk.
    ModelMissing = 2,
    /// Model artifact could not be parsed or does not match the feature schema.
    ModelInvalid = 3,
    /// The model failed to produce a usable value.
    Inference = 4,
    /// Configuration could not be resolved.
    Config = 5,
    /// Other filesystem failures.
    Io = 6,
}

/// Canonical error type for the crate.
#[derive(Debug, Error)]
pub enum HouseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("model artifact not found: {0}")]
    ModelMissing(String),

    #[error("invalid model artifact: {0}")]
    ModelInvalid(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type HouseResult<T> = Result<T, HouseError>;

impl HouseError {
    /// Validation helper.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Model missing helper.
    pub fn model_missing(msg: impl Into<String>) -> Self {
        Self::ModelMissing(msg.into())
    }

    /// Malformed artifact helper.
    pub fn model_invalid(msg: impl Into<String>) -> Self {
        Self::ModelInvalid(msg.into())
    }

    /// Inference helper.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Machine parsable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::ModelMissing(_) => ErrorCode::ModelMissing,
            Self::ModelInvalid(_) => ErrorCode::ModelInvalid,
            Self::Inference(_) => ErrorCode::Inference,
            Self::Config(_) => ErrorCode::Config,
            Self::Io(_) => ErrorCode::Io,
        }
    }

    /// True when the caller sent something we refuse to evaluate.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<serde_json::Error> for HouseError {
    fn from(err: serde_json::Error) -> Self {
        Self::ModelInvalid(err.to_string())
    }
}
