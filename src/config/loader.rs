// src/config/loader.rs

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::debug;

use crate::config::RawConfig;
use crate::errors::LoadError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::value::{Value, from_toml, from_yaml};

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    /// Infer the format from a file extension (`.yaml`, `.yml`, `.toml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(format!(
                "invalid config format: {other} (expected \"yaml\" or \"toml\")"
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => f.write_str("yaml"),
            Format::Toml => f.write_str("toml"),
        }
    }
}

/// Reads config documents through a [`FileSystem`].
#[derive(Debug, Clone, Copy)]
pub struct Loader<'a> {
    fs: &'a dyn FileSystem,
}

impl Default for Loader<'static> {
    fn default() -> Self {
        Self { fs: &RealFileSystem }
    }
}

impl<'a> Loader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Load the whole document at `path` as `format`.
    ///
    /// YAML is read as text. TOML is read as raw bytes and must be valid
    /// UTF-8, as TOML 1.0 requires.
    pub fn load(&self, path: impl AsRef<Path>, format: Format) -> Result<RawConfig, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), %format, "loading config");

        let contents = match format {
            Format::Yaml => self.fs.read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?,
            Format::Toml => {
                let bytes = self.fs.read(path).map_err(|source| LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                String::from_utf8(bytes).map_err(|source| LoadError::Utf8 {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };

        let config = parse_str(&contents, format, &path.display().to_string())?;
        debug!(path = %path.display(), keys = config.len(), "config loaded");
        Ok(config)
    }

    /// Load a file, inferring the format from its extension.
    pub fn load_detected(&self, path: impl AsRef<Path>) -> Result<RawConfig, LoadError> {
        let path = path.as_ref();
        let format = Format::from_path(path).ok_or_else(|| LoadError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        self.load(path, format)
    }
}

/// Load a config file from disk.
pub fn load(path: impl AsRef<Path>, format: Format) -> Result<RawConfig, LoadError> {
    Loader::default().load(path, format)
}

/// Read a YAML file from disk.
pub fn read_yaml(path: impl AsRef<Path>) -> Result<RawConfig, LoadError> {
    load(path, Format::Yaml)
}

/// Read a TOML file from disk.
pub fn read_toml(path: impl AsRef<Path>) -> Result<RawConfig, LoadError> {
    load(path, Format::Toml)
}

/// Parse an in-memory document. `origin` names the source in error messages.
pub fn parse_str(contents: &str, format: Format, origin: &str) -> Result<RawConfig, LoadError> {
    let root = match format {
        Format::Yaml => {
            let node: serde_yaml::Value =
                serde_yaml::from_str(contents).map_err(|source| LoadError::Yaml {
                    origin: origin.to_string(),
                    source,
                })?;
            from_yaml(node, origin)?
        }
        Format::Toml => {
            let table: toml::Table =
                toml::from_str(contents).map_err(|source| LoadError::Toml {
                    origin: origin.to_string(),
                    source,
                })?;
            from_toml(toml::Value::Table(table))
        }
    };

    match root {
        Value::Mapping(map) => Ok(map),
        other => Err(LoadError::NotAMapping {
            origin: origin.to_string(),
            found: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/config.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("config.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("config.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("config.json")), None);
        assert_eq!(Format::from_path(Path::new("config")), None);
    }

    #[test]
    fn yaml_scalar_root_is_rejected() {
        let err = parse_str("just a string\n", Format::Yaml, "<scalar>").unwrap_err();
        assert!(matches!(err, LoadError::NotAMapping { found: "str", .. }));
    }

    #[test]
    fn yaml_list_root_is_rejected() {
        let err = parse_str("- a\n- b\n", Format::Yaml, "<list>").unwrap_err();
        assert!(matches!(err, LoadError::NotAMapping { found: "list", .. }));
    }

    #[test]
    fn malformed_toml_reports_origin() {
        let err = parse_str("title = \n", Format::Toml, "broken.toml").unwrap_err();
        assert!(matches!(err, LoadError::Toml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
