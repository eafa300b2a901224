//! Shared utilities that glue the different domains together.
pub mod config;
pub mod error;
pub mod log;
pub mod money;
pub mod time;

pub use error::{ErrorCode, HouseError, HouseResult};
