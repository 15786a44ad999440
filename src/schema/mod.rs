// src/schema/mod.rs

//! Declarative schemas and the generic routine that interprets them.
//!
//! A [`Schema`] is a named, ordered table of [`Field`] descriptors. Each
//! field names a target [`Kind`] to coerce into, an optional default used
//! when the field is absent, and an optional [`Check`] that runs once
//! coercion has succeeded.
//!
//! - `coerce.rs`: scalar conversions from raw values.
//! - `checks.rs`: field constraints used by the built-in schemas.
//! - `catalog.rs`: the built-in schemas (`Owner`, `Database`, ...).
//! - `validate.rs`: the [`Validator`] that walks a schema over a mapping.

pub mod catalog;
pub mod checks;
pub mod coerce;
pub mod validate;

use std::fmt;

use crate::fs::FileSystem;
use crate::value::Value;

pub use catalog::SchemaName;
pub use validate::{NormalizedConfig, ValidationResult, Validator, validate};

/// State available to field checks.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub fs: &'a dyn FileSystem,
}

/// A field constraint. Receives the coerced value and returns the value to
/// store (possibly rewritten), or a human-readable reason for rejecting it.
pub type CheckFn = fn(&Value, &Context<'_>) -> Result<Value, String>;

#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Run once against the whole coerced field.
    Whole(CheckFn),
    /// Run against every element of a coerced sequence.
    EachItem(CheckFn),
}

/// Target type of a field.
#[derive(Debug, Clone)]
pub enum Kind {
    Str,
    Integer,
    Float,
    Bool,
    DateTime,
    Ipv4,
    Path,
    /// A sequence of `item`. With `wrap_scalar`, a lone scalar is accepted
    /// as a one-element sequence.
    List { item: Box<Kind>, wrap_scalar: bool },
    /// The first alternative the value coerces into. An alternative whose
    /// type matches the raw value exactly is preferred.
    AnyOf(Vec<Kind>),
    Nested(Box<Schema>),
}

impl Kind {
    pub fn list_of(item: Kind) -> Self {
        Kind::List {
            item: Box::new(item),
            wrap_scalar: false,
        }
    }

    pub fn wrapped_list_of(item: Kind) -> Self {
        Kind::List {
            item: Box::new(item),
            wrap_scalar: true,
        }
    }

    pub fn nested(schema: Schema) -> Self {
        Kind::Nested(Box::new(schema))
    }

    /// Whether `value` already has this kind's raw representation.
    pub(crate) fn matches_exactly(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Kind::Str, Value::String(_))
                | (Kind::Integer, Value::Integer(_))
                | (Kind::Float, Value::Float(_))
                | (Kind::Bool, Value::Bool(_))
                | (Kind::DateTime, Value::DateTime(_))
                | (Kind::Ipv4, Value::Ipv4(_))
                | (Kind::Path, Value::Path(_))
                | (Kind::List { .. }, Value::Sequence(_))
                | (Kind::Nested(_), Value::Mapping(_))
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Str => f.write_str("str"),
            Kind::Integer => f.write_str("int"),
            Kind::Float => f.write_str("float"),
            Kind::Bool => f.write_str("bool"),
            Kind::DateTime => f.write_str("datetime"),
            Kind::Ipv4 => f.write_str("IPv4 address"),
            Kind::Path => f.write_str("path"),
            Kind::List { item, .. } => write!(f, "list[{item}]"),
            Kind::AnyOf(kinds) => {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                write!(f, "{}", names.join(" | "))
            }
            Kind::Nested(schema) => f.write_str(schema.name()),
        }
    }
}

/// One field descriptor.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: Kind,
    default: Option<Value>,
    check: Option<Check>,
}

impl Field {
    /// A field that must be present unless a default is attached.
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            default: None,
            check: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn check(mut self, check: CheckFn) -> Self {
        self.check = Some(Check::Whole(check));
        self
    }

    pub fn check_each(mut self, check: CheckFn) -> Self {
        self.check = Some(Check::EachItem(check));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn constraint(&self) -> Option<Check> {
        self.check
    }
}

/// A named, ordered set of field descriptors.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
