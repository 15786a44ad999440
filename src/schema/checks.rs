// src/schema/checks.rs

//! Field constraints used by the built-in schemas.

use std::ops::RangeInclusive;

use crate::schema::Context;
use crate::value::Value;

pub const PORT_RANGE: RangeInclusive<i64> = 8001..=8080;
pub const VALID_HOSTS: &[&str] = &["alpha", "omega"];

/// Owner names need at least two words; the stored name is title-cased.
pub fn name_has_space(value: &Value, _ctx: &Context<'_>) -> Result<Value, String> {
    let Value::String(name) = value else {
        return Err("str type expected".to_string());
    };
    if !name.contains(' ') {
        return Err("must contain a space".to_string());
    }
    Ok(Value::String(title_case(name)))
}

pub fn port_in_range(value: &Value, _ctx: &Context<'_>) -> Result<Value, String> {
    match value {
        Value::Integer(port) if PORT_RANGE.contains(port) => Ok(value.clone()),
        other => Err(format!("{other} not a valid port number")),
    }
}

pub fn known_host(value: &Value, _ctx: &Context<'_>) -> Result<Value, String> {
    match value {
        Value::String(host) if VALID_HOSTS.contains(&host.as_str()) => Ok(value.clone()),
        other => Err(format!(
            "{other} not one of valid host: {}",
            VALID_HOSTS.join(", ")
        )),
    }
}

/// Rejects paths that already exist. This consults the filesystem at
/// validation time, so the result depends on disk state.
pub fn path_does_not_exist(value: &Value, ctx: &Context<'_>) -> Result<Value, String> {
    let Value::Path(path) = value else {
        return Err("value is not a valid path".to_string());
    };
    if ctx.fs.exists(path) {
        return Err(format!("{} already exists", path.display()));
    }
    Ok(value.clone())
}

/// Upper-case the first letter of every run of letters and lower-case the
/// rest, e.g. `"matt o'brien"` -> `"Matt O'Brien"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_letter = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
