// src/schema/validate.rs

use tracing::{debug, info};

use crate::errors::{FieldError, ValidationErrors};
use crate::fs::{FileSystem, RealFileSystem};
use crate::schema::{Check, CheckFn, Context, Kind, Schema, coerce};
use crate::value::{Mapping, Value};

/// Validated, coerced and default-filled mapping.
pub type NormalizedConfig = Mapping;

pub type ValidationResult = Result<NormalizedConfig, ValidationErrors>;

/// Interprets a [`Schema`] against a raw mapping.
///
/// Fields are processed in declaration order and every error is collected;
/// validation never stops at the first failure. Unknown input fields are
/// dropped from the result.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    ctx: Context<'a>,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self {
            ctx: Context {
                fs: &RealFileSystem,
            },
        }
    }
}

/// Validate `raw` against `schema`, consulting the real filesystem.
pub fn validate(raw: &Mapping, schema: &Schema) -> ValidationResult {
    Validator::default().validate(raw, schema)
}

impl<'a> Validator<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            ctx: Context { fs },
        }
    }

    pub fn validate(&self, raw: &Mapping, schema: &Schema) -> ValidationResult {
        debug!(schema = schema.name(), keys = raw.len(), "validating config");

        let mut errors = Vec::new();
        let normalized = self.validate_mapping(schema, raw, "", &mut errors);

        if errors.is_empty() {
            info!(schema = schema.name(), "validation successful");
            Ok(normalized)
        } else {
            info!(schema = schema.name(), errors = errors.len(), "validation failed");
            Err(ValidationErrors::new(schema.name(), errors))
        }
    }

    fn validate_mapping(
        &self,
        schema: &Schema,
        raw: &Mapping,
        prefix: &str,
        errors: &mut Vec<FieldError>,
    ) -> Mapping {
        for key in raw.keys().filter(|key| schema.get(key).is_none()) {
            debug!(schema = schema.name(), field = %join(prefix, key), "dropping unknown field");
        }

        let mut out = Mapping::new();
        for field in schema.fields() {
            let path = join(prefix, field.name());
            match (raw.get(field.name()), field.default()) {
                (Some(value), _) => {
                    let checked =
                        self.validate_field(field.kind(), field.constraint(), value, &path, errors);
                    if let Some(value) = checked {
                        out.insert(field.name().to_string(), value);
                    }
                }
                (None, Some(default)) => {
                    out.insert(field.name().to_string(), default.clone());
                }
                (None, None) => errors.push(FieldError::missing(path)),
            }
        }
        out
    }

    fn validate_field(
        &self,
        kind: &Kind,
        check: Option<Check>,
        value: &Value,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        // Item checks run on every element that coerced, even when a sibling
        // did not.
        if let (Some(Check::EachItem(check)), Kind::List { item, wrap_scalar }) = (check, kind) {
            if !matches!(value, Value::Null) {
                return self.coerce_list(item, *wrap_scalar, Some(check), value, path, errors);
            }
        }

        let coerced = self.coerce(kind, value, path, errors)?;
        match check {
            None => Some(coerced),
            Some(Check::Whole(check) | Check::EachItem(check)) => {
                self.run_check(check, coerced, path, errors)
            }
        }
    }

    fn run_check(
        &self,
        check: CheckFn,
        value: Value,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        match check(&value, &self.ctx) {
            Ok(checked) => Some(checked),
            Err(reason) => {
                errors.push(FieldError::invalid(path, value, reason));
                None
            }
        }
    }

    /// Convert `value` into `kind`. Returns `None` after recording at least
    /// one error; partial results are never returned.
    fn coerce(
        &self,
        kind: &Kind,
        value: &Value,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        if matches!(value, Value::Null) {
            errors.push(FieldError::invalid(path, Value::Null, "none is not an allowed value"));
            return None;
        }

        let scalar = match kind {
            Kind::Str => coerce::to_str(value),
            Kind::Integer => coerce::to_int(value),
            Kind::Float => coerce::to_float(value),
            Kind::Bool => coerce::to_bool(value),
            Kind::DateTime => coerce::to_datetime(value),
            Kind::Ipv4 => coerce::to_ipv4(value),
            Kind::Path => coerce::to_path(value),
            Kind::List { item, wrap_scalar } => {
                return self.coerce_list(item, *wrap_scalar, None, value, path, errors);
            }
            Kind::AnyOf(kinds) => return self.coerce_any_of(kind, kinds, value, path, errors),
            Kind::Nested(schema) => {
                let Value::Mapping(map) = value else {
                    let reason = "value is not a valid mapping";
                    errors.push(FieldError::invalid(path, value.clone(), reason));
                    return None;
                };
                let before = errors.len();
                let nested = self.validate_mapping(schema, map, path, errors);
                return (errors.len() == before).then_some(Value::Mapping(nested));
            }
        };

        match scalar {
            Ok(value) => Some(value),
            Err(reason) => {
                errors.push(FieldError::invalid(path, value.clone(), reason));
                None
            }
        }
    }

    fn coerce_list(
        &self,
        item: &Kind,
        wrap_scalar: bool,
        each: Option<CheckFn>,
        value: &Value,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        let items: &[Value] = match value {
            Value::Sequence(items) => items,
            scalar if wrap_scalar && scalar.is_scalar() => std::slice::from_ref(scalar),
            other => {
                errors.push(FieldError::invalid(path, other.clone(), "value is not a valid list"));
                return None;
            }
        };

        let before = errors.len();
        let coerced: Vec<Value> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item_value)| {
                let item_path = join(path, i);
                let coerced = self.coerce(item, item_value, &item_path, errors)?;
                match each {
                    Some(check) => self.run_check(check, coerced, &item_path, errors),
                    None => Some(coerced),
                }
            })
            .collect();
        (errors.len() == before).then_some(Value::Sequence(coerced))
    }

    fn coerce_any_of(
        &self,
        kind: &Kind,
        kinds: &[Kind],
        value: &Value,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        let preferred = kinds.iter().filter(|k| k.matches_exactly(value));
        let rest = kinds.iter().filter(|k| !k.matches_exactly(value));

        for candidate in preferred.chain(rest) {
            if let Some(coerced) = self.coerce(candidate, value, path, &mut Vec::new()) {
                return Some(coerced);
            }
        }

        errors.push(FieldError::invalid(
            path,
            value.clone(),
            format!("value does not match any of: {kind}"),
        ));
        None
    }
}

fn join(prefix: &str, segment: impl std::fmt::Display) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::schema::Field;

    fn map(entries: &[(&str, Value)]) -> Mapping {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn errors_follow_declaration_order() {
        let schema = Schema::new("Pair")
            .field(Field::new("first", Kind::Integer))
            .field(Field::new("second", Kind::Integer));
        let fs = MockFileSystem::new();

        let err = Validator::new(&fs)
            .validate(&map(&[("second", Value::from("x"))]), &schema)
            .unwrap_err();

        let paths: Vec<&str> = err.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["first", "second"]);
        assert_eq!(err.errors[0].reason, "field required");
        assert_eq!(err.errors[1].value, Some(Value::from("x")));
    }

    #[test]
    fn checks_do_not_run_after_failed_coercion() {
        fn always_fails(_: &Value, _: &Context<'_>) -> Result<Value, String> {
            Err("check ran".to_string())
        }
        let schema = Schema::new("One").field(Field::new("n", Kind::Integer).check(always_fails));
        let fs = MockFileSystem::new();

        let err = Validator::new(&fs)
            .validate(&map(&[("n", Value::from("not a number"))]), &schema)
            .unwrap_err();

        assert_eq!(err.len(), 1);
        assert_eq!(err.errors[0].reason, "value is not a valid integer");
    }

    #[test]
    fn item_checks_run_on_every_coerced_element() {
        fn small(value: &Value, _: &Context<'_>) -> Result<Value, String> {
            match value {
                Value::Integer(n) if *n < 10 => Ok(value.clone()),
                other => Err(format!("{other} is too big")),
            }
        }
        let schema = Schema::new("Digits")
            .field(Field::new("digits", Kind::list_of(Kind::Integer)).check_each(small));
        let fs = MockFileSystem::new();

        let raw = map(&[(
            "digits",
            Value::from(vec![Value::from("x"), Value::Integer(42), Value::Integer(3)]),
        )]);
        let err = Validator::new(&fs).validate(&raw, &schema).unwrap_err();

        let paths: Vec<&str> = err.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["digits.0", "digits.1"]);
        assert_eq!(err.errors[1].reason, "42 is too big");
    }

    #[test]
    fn output_follows_declaration_order() {
        let schema = Schema::new("Pair")
            .field(Field::new("zeta", Kind::Integer))
            .field(Field::new("alpha", Kind::Integer));
        let fs = MockFileSystem::new();

        let raw = map(&[("alpha", Value::Integer(1)), ("zeta", Value::Integer(2))]);
        let ok = Validator::new(&fs).validate(&raw, &schema).unwrap();

        let keys: Vec<&str> = ok.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn null_is_rejected_even_with_default() {
        let schema = Schema::new("Flag").field(Field::new("on", Kind::Bool).with_default(false));
        let fs = MockFileSystem::new();

        let err = Validator::new(&fs)
            .validate(&map(&[("on", Value::Null)]), &schema)
            .unwrap_err();
        assert_eq!(err.errors[0].reason, "none is not an allowed value");
    }

    #[test]
    fn any_of_prefers_exact_type() {
        let schema = Schema::new("Cell").field(Field::new(
            "cells",
            Kind::list_of(Kind::AnyOf(vec![Kind::Str, Kind::Integer])),
        ));
        let fs = MockFileSystem::new();

        let raw = map(&[(
            "cells",
            Value::from(vec![Value::from("a"), Value::Integer(2), Value::Float(3.0)]),
        )]);
        let ok = Validator::new(&fs).validate(&raw, &schema).unwrap();

        assert_eq!(
            ok["cells"],
            Value::from(vec![Value::from("a"), Value::Integer(2), Value::from("3.0")])
        );
    }

    #[test]
    fn any_of_reports_one_error_per_value() {
        let schema = Schema::new("Cell")
            .field(Field::new("cell", Kind::AnyOf(vec![Kind::Str, Kind::Integer])));
        let fs = MockFileSystem::new();

        let err = Validator::new(&fs)
            .validate(&map(&[("cell", Value::Bool(true))]), &schema)
            .unwrap_err();

        assert_eq!(err.len(), 1);
        assert_eq!(err.errors[0].reason, "value does not match any of: str | int");
    }

    #[test]
    fn unwrapped_list_rejects_scalar() {
        let schema = Schema::new("Rows").field(Field::new("rows", Kind::list_of(Kind::Str)));
        let fs = MockFileSystem::new();

        let err = Validator::new(&fs)
            .validate(&map(&[("rows", Value::from("solo"))]), &schema)
            .unwrap_err();
        assert_eq!(err.errors[0].reason, "value is not a valid list");
    }

    #[test]
    fn join_paths() {
        assert_eq!(join("", "owner"), "owner");
        assert_eq!(join("servers.alpha", "ip"), "servers.alpha.ip");
        assert_eq!(join("ports", 3), "ports.3");
    }
}
