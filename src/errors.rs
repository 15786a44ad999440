// src/errors.rs

//! Crate-wide error types.
//!
//! Loading fails fast with a [`LoadError`]. Validation never fails fast: it
//! returns every [`FieldError`] it found, bundled in [`ValidationErrors`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("invalid YAML in {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid TOML in {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("{origin}: document root must be a mapping, found {found}")]
    NotAMapping { origin: String, found: &'static str },

    #[error("{origin}: unsupported mapping key {key}")]
    UnsupportedKey { origin: String, key: String },

    #[error("cannot infer config format from {}; expected .yaml, .yml or .toml", .path.display())]
    UnknownFormat { path: PathBuf },
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted path to the field, e.g. `servers.alpha.ip` or `ports.3`.
    pub path: String,
    /// The offending value; `None` when the field was missing.
    pub value: Option<Value>,
    pub reason: String,
}

impl FieldError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: None,
            reason: "field required".to_string(),
        }
    }

    pub fn invalid(path: impl Into<String>, value: Value, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: Some(value),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {} (value: {value})", self.path, self.reason),
            None => write!(f, "{}: {}", self.path, self.reason),
        }
    }
}

/// Every field error found while validating against one schema, in schema
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    pub schema: String,
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(schema: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            schema: schema.into(),
            errors,
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Errors whose path is exactly `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.path == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.errors.len() == 1 { "" } else { "s" };
        write!(
            f,
            "{} validation error{plural} for {}",
            self.errors.len(),
            self.schema
        )?;
        for error in &self.errors {
            write!(f, "\n{}\n  {}", error.path, error.reason)?;
            if let Some(value) = &error.value {
                write!(f, " (value: {value})")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Error, Debug)]
pub enum ConfcheckError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ConfcheckError>;
