//! Runtime configuration loaded from the environment, then overridden by CLI flags.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use super::error::{HouseError, HouseResult};

pub const DEFAULT_MODEL_PATH: &str = "model/forest_model.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8050";

/// Output format of the log subscriber.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    fn parse(raw: &str) -> HouseResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "pretty" => Ok(Self::Text),
            other => Err(HouseError::config(format!(
                "unknown log format `{other}` (expected json or text)"
            ))),
        }
    }
}

/// Snapshot of configuration values consumed by the service.
#[derive(Clone, Debug)]
pub struct AppCfg {
    pub model_path: PathBuf,
    pub bind: SocketAddr,
    /// `EnvFilter` directive, e.g. `info` or `houseprice=debug`.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> HouseResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> HouseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_raw = env_or("HOUSEPRICE_BIND", DEFAULT_BIND);
        Ok(Self {
            model_path: PathBuf::from(env_or("HOUSEPRICE_MODEL_PATH", DEFAULT_MODEL_PATH)),
            bind: parse_bind(&bind_raw)?,
            log_filter: env_or("HOUSEPRICE_LOG", "info"),
            log_format: LogFormat::parse(&env_or("HOUSEPRICE_LOG_FORMAT", "text"))?,
        })
    }

    pub fn with_model_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.model_path = path;
        }
        self
    }

    pub fn with_bind(mut self, bind: Option<&str>) -> HouseResult<Self> {
        if let Some(raw) = bind {
            self.bind = parse_bind(raw)?;
        }
        Ok(self)
    }
}

fn parse_bind(raw: &str) -> HouseResult<SocketAddr> {
    raw.parse()
        .map_err(|_| HouseError::config(format!("invalid bind address `{raw}`")))
}
