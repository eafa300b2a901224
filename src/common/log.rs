//! Log subscriber setup.
//!
//! Events are emitted with `tracing` macros carrying `ev`, `code` and `dur_ms`
//! fields; in json mode each event becomes one line on stderr, keeping stdout
//! free for command output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::config::{AppCfg, LogFormat};
use super::error::{HouseError, HouseResult};

/// Install the global subscriber. Fails if one is already installed.
pub fn init(cfg: &AppCfg) -> HouseResult<()> {
    let filter = EnvFilter::try_new(&cfg.log_filter)
        .map_err(|e| HouseError::config(format!("invalid log filter `{}`: {e}", cfg.log_filter)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match cfg.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| HouseError::config(format!("log subscriber: {e}")))
}
