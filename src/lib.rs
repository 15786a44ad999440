// src/lib.rs

pub mod cli;
pub mod config;
pub mod demo;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod schema;
pub mod value;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{Format, Loader};
use crate::errors::{ConfcheckError, LoadError};
use crate::schema::{SchemaName, Validator};

pub use crate::config::RawConfig;
pub use crate::errors::{FieldError, ValidationErrors};
pub use crate::schema::{NormalizedConfig, ValidationResult};
pub use crate::value::{Mapping, Value};

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            let existing = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("Cargo.toml"));
            let surprises = demo::run_demo(&Validator::default(), &existing, &mut out)?;
            debug!(surprises, "demo complete");
            Ok(())
        }
        Command::Check { path, format, schema } => {
            check_file(&path, format, schema, &mut out)
                .map(|_| ())
                .map_err(|e| match e {
                    ConfcheckError::Validation(errors) => anyhow!(
                        "{} failed validation against {} ({} error(s))",
                        path.display(),
                        schema,
                        errors.len()
                    ),
                    other => anyhow!(other),
                })
        }
    }
}

/// Load `path`, validate it against `schema`, and print the report.
pub fn check_file<W: Write>(
    path: &Path,
    format: Option<Format>,
    schema: SchemaName,
    out: &mut W,
) -> errors::Result<NormalizedConfig> {
    let format = match format.or_else(|| Format::from_path(path)) {
        Some(format) => format,
        None => {
            return Err(LoadError::UnknownFormat {
                path: path.to_path_buf(),
            }
            .into());
        }
    };

    let raw = Loader::default().load(path, format)?;
    let schema = schema.schema();
    let result = Validator::default().validate(&raw, &schema);
    demo::write_report(out, schema.name(), &raw, None, &result)?;

    let normalized = result?;
    info!(path = %path.display(), schema = schema.name(), "config is valid");
    Ok(normalized)
}
