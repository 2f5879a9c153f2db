// src/logging.rs

//! `tracing` subscriber setup.
//!
//! The filter comes from `--log-level` when given, else from `DEVLOOP_LOG`
//! (any `EnvFilter` directive string, e.g. `devloop::engine=trace,info`),
//! else `info`. Logs go to STDERR so decision reports on STDOUT stay clean.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "DEVLOOP_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let directives = filter_directives(cli_level, env.as_deref());
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid {LOG_ENV_VAR} value {directives:?}: {e}"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Filter directives for the given CLI level and `DEVLOOP_LOG` value.
///
/// A CLI level wins over the environment; a blank variable counts as unset.
pub fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return level_directive(lvl).to_string();
    }
    match env.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn level_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
