// src/config/mod.rs

//! Configuration file loading.
//!
//! Responsibilities:
//! - Detect the document format (`Format`).
//! - Read a YAML or TOML file into a generic [`RawConfig`] mapping
//!   (`loader.rs`). No schema awareness lives here.

pub mod loader;

pub use loader::{Format, Loader, load, parse_str, read_toml, read_yaml};

/// Generic mapping produced by the loader, before any validation.
pub type RawConfig = crate::value::Mapping;
