// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Format;
use crate::schema::SchemaName;

/// Command-line arguments for `confcheck`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "confcheck",
    version,
    about = "Load YAML/TOML config files and validate them against the demo schemas.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CONFCHECK_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// What to run. Defaults to `demo`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate the built-in example configs and print each outcome.
    Demo,

    /// Load a config file and validate it against a schema.
    Check {
        /// Path to the config file.
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Document format. Inferred from the file extension if omitted.
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Schema to validate against.
        #[arg(long, value_enum, default_value = "config")]
        schema: SchemaName,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
