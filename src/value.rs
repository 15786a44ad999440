// src/value.rs

//! Generic, dynamically typed configuration values.
//!
//! Both YAML and TOML documents decode into the same [`Value`] tree so that
//! equivalent documents compare equal regardless of their source format.
//! The `DateTime`, `Ipv4` and `Path` variants are never produced by the
//! loader; they only appear after schema coercion.

use std::fmt;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::LoadError;

/// String-keyed mapping of values. Keys iterate in insertion order, so a
/// loaded document keeps its source order and a validated one follows the
/// schema's field order. Equality ignores order.
pub type Mapping = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(Timestamp),
    Ipv4(Ipv4Addr),
    Path(PathBuf),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// A coerced date-time, keeping whether the input carried a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Timestamp::Offset(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Value {
    /// Short type name used in error messages and logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "str",
            Value::DateTime(_) => "datetime",
            Value::Ipv4(_) => "IPv4 address",
            Value::Path(_) => "path",
            Value::Sequence(_) => "list",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Look up a dotted path such as `servers.alpha.ip` or `ports.0`.
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |current, segment| match current {
            Value::Mapping(map) => map.get(segment),
            Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::DateTime(ts) => write!(f, "{ts}"),
            Value::Ipv4(ip) => write!(f, "{ip}"),
            Value::Path(p) => write!(f, "{:?}", p.display().to_string()),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Convert a parsed YAML node into a [`Value`].
///
/// YAML tags are ignored and the tagged node is used as-is. Integers that do
/// not fit in `i64` degrade to floats. The YAML 1.1 boolean words
/// (`yes`/`no`/`on`/`off` in lower, title or upper case) load as booleans.
/// Scalar keys are stringified; sequence or mapping keys are rejected.
pub(crate) fn from_yaml(node: serde_yaml::Value, origin: &str) -> Result<Value, LoadError> {
    use serde_yaml::Value as Yaml;

    Ok(match node {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Yaml::String(s) => match yaml11_bool(&s) {
            Some(b) => Value::Bool(b),
            None => Value::String(s),
        },
        Yaml::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| from_yaml(item, origin))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut map = Mapping::new();
            for (key, item) in entries {
                let key = yaml_key(key, origin)?;
                map.insert(key, from_yaml(item, origin)?);
            }
            Value::Mapping(map)
        }
        Yaml::Tagged(tagged) => from_yaml(tagged.value, origin)?,
    })
}

fn yaml11_bool(s: &str) -> Option<bool> {
    match s {
        "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
        "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

fn yaml_key(key: serde_yaml::Value, origin: &str) -> Result<String, LoadError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value, origin),
        other => Err(LoadError::UnsupportedKey {
            origin: origin.to_string(),
            key: format!("{other:?}"),
        }),
    }
}

/// Convert a parsed TOML node into a [`Value`].
///
/// TOML datetimes become their canonical string form, which is what an
/// equivalent YAML document decodes to.
pub(crate) fn from_toml(node: toml::Value) -> Value {
    match node {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(x) => Value::Float(x),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(key, item)| (key, from_toml(item)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_tree_converts_to_values() {
        let node: serde_yaml::Value =
            serde_yaml::from_str("a: 1\nb: [x, 2.5, true]\nc: ~\n8080: port\n").unwrap();
        let value = from_yaml(node, "<test>").unwrap();

        assert_eq!(value.pointer("a"), Some(&Value::Integer(1)));
        assert_eq!(value.pointer("b.0"), Some(&Value::from("x")));
        assert_eq!(value.pointer("b.1"), Some(&Value::Float(2.5)));
        assert_eq!(value.pointer("b.2"), Some(&Value::Bool(true)));
        assert_eq!(value.pointer("c"), Some(&Value::Null));
        assert_eq!(value.pointer("8080"), Some(&Value::from("port")));
    }

    #[test]
    fn yaml_11_boolean_words_load_as_bools() {
        let node: serde_yaml::Value =
            serde_yaml::from_str("a: yes\nb: Off\nc: ON\nd: yEs\ne: y\n").unwrap();
        let value = from_yaml(node, "<test>").unwrap();

        assert_eq!(value.pointer("a"), Some(&Value::Bool(true)));
        assert_eq!(value.pointer("b"), Some(&Value::Bool(false)));
        assert_eq!(value.pointer("c"), Some(&Value::Bool(true)));
        assert_eq!(value.pointer("d"), Some(&Value::from("yEs")));
        assert_eq!(value.pointer("e"), Some(&Value::from("y")));
    }

    #[test]
    fn mappings_keep_insertion_order() {
        let node: serde_yaml::Value = serde_yaml::from_str("z: 1\na: 2\nm: 3\n").unwrap();
        let Value::Mapping(map) = from_yaml(node, "<test>").unwrap() else {
            panic!("expected a mapping");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn yaml_sequence_keys_are_rejected() {
        let node: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: value\n").unwrap();
        let err = from_yaml(node, "<test>").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedKey { .. }));
    }

    #[test]
    fn toml_datetime_becomes_string() {
        let table: toml::Table = toml::from_str("dob = 1901-01-01T00:00:00\n").unwrap();
        let value = from_toml(toml::Value::Table(table));
        assert_eq!(value.pointer("dob"), Some(&Value::from("1901-01-01T00:00:00")));
    }

    #[test]
    fn display_is_compact() {
        let value = Value::from(vec![Value::from("a"), Value::Integer(2), Value::Float(3.0)]);
        assert_eq!(value.to_string(), r#"["a", 2, 3.0]"#);
    }
}
