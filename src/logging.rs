// src/logging.rs

//! Logging setup for `qwix` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen in this order:
//! 1. `--log-level` CLI flag, applied to every target
//! 2. `QWIX_LOG` as `EnvFilter` directives, e.g. `warn,qwix::dag=debug`
//! 3. `info`
//!
//! Logs go to stderr so stdout carries only command output.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "QWIX_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directives = filter_directives(cli_level, std::env::var(LOG_ENV).ok().as_deref());

    fmt()
        .with_env_filter(EnvFilter::try_new(&directives)?)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Directives for the subscriber's filter.
///
/// Malformed `QWIX_LOG` values are ignored rather than failing startup.
fn filter_directives(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return level_directive(lvl).to_string();
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) if EnvFilter::try_new(raw).is_ok() => raw.to_string(),
        Some(raw) => {
            eprintln!("qwix: ignoring malformed {LOG_ENV}={raw:?}");
            DEFAULT_DIRECTIVES.to_string()
        }
        None => DEFAULT_DIRECTIVES.to_string(),
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
