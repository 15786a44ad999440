#![allow(dead_code)]

use confcheck::value::{Mapping, Value};

/// Builder for raw config mappings to simplify test setup.
#[derive(Debug, Clone, Default)]
pub struct MappingBuilder {
    map: Mapping,
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    pub fn str(self, key: &str, value: &str) -> Self {
        self.with(key, value)
    }

    pub fn int(self, key: &str, value: i64) -> Self {
        self.with(key, value)
    }

    pub fn float(self, key: &str, value: f64) -> Self {
        self.with(key, value)
    }

    pub fn bool(self, key: &str, value: bool) -> Self {
        self.with(key, value)
    }

    pub fn map(self, key: &str, nested: MappingBuilder) -> Self {
        self.with(key, nested.build())
    }

    pub fn build(self) -> Mapping {
        self.map
    }
}

/// A complete `Config` document that validates when `log_path` does not
/// exist.
pub fn valid_config(log_path: &str) -> Mapping {
    MappingBuilder::new()
        .str("title", "Example config")
        .map(
            "owner",
            MappingBuilder::new()
                .str("name", "matt price")
                .str("dob", "1901-01-01T00:00:00"),
        )
        .map(
            "database",
            MappingBuilder::new()
                .str("server", "192.168.1.1")
                .with("ports", vec![8001_i64, 8002])
                .int("connection_max", 5000)
                .bool("enabled", true),
        )
        .map(
            "servers",
            MappingBuilder::new()
                .map(
                    "alpha",
                    MappingBuilder::new().str("ip", "10.0.0.1").str("dc", "eqdc10"),
                )
                .map(
                    "beta",
                    MappingBuilder::new().str("ip", "10.0.0.2").str("dc", "eqdc10"),
                ),
        )
        .map(
            "clients",
            MappingBuilder::new()
                .with(
                    "data",
                    vec![
                        Value::from(vec!["gamma", "delta"]),
                        Value::from(vec![1_i64, 2]),
                    ],
                )
                .with("hosts", vec!["alpha", "omega"]),
        )
        .map(
            "logs",
            MappingBuilder::new().bool("save", true).str("path", log_path),
        )
        .build()
}
