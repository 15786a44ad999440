// src/logging.rs

//! Diagnostics go to stderr through a `tracing-subscriber` fmt layer; stdout
//! is reserved for the validation report.
//!
//! `--log-level` wins over `CONFCHECK_LOG`. The environment variable takes a
//! full filter directive (`confcheck::schema=debug,warn`), not just a level.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "CONFCHECK_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(cli_level, env.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("ignoring {LOG_ENV}={directive:?}: {e}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_ids(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

/// Pick the filter directive: flag, then environment, then `info`.
fn filter_directive(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level_name(level).to_string();
    }
    env.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        assert_eq!(filter_directive(Some(LogLevel::Trace), Some("warn")), "trace");
    }

    #[test]
    fn environment_directive_is_passed_through() {
        let directive = filter_directive(None, Some(" confcheck::schema=debug,warn "));
        assert_eq!(directive, "confcheck::schema=debug,warn");
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn blank_or_missing_environment_means_info() {
        assert_eq!(filter_directive(None, None), "info");
        assert_eq!(filter_directive(None, Some("  ")), "info");
    }
}
