// src/schema/coerce.rs

//! Scalar coercions.
//!
//! These are deliberately lenient in the same places most config tooling
//! is: numeric strings become numbers, integers widen to floats, and the
//! usual boolean words (`yes`, `off`, `1`, ...) become booleans. Anything
//! else yields the reason string reported in a `FieldError`.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime};

use crate::value::{Timestamp, Value};

const TRUE_WORDS: &[&str] = &["1", "on", "t", "true", "y", "yes"];
const FALSE_WORDS: &[&str] = &["0", "off", "f", "false", "n", "no"];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn to_str(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Integer(i) => Ok(Value::String(i.to_string())),
        Value::Float(x) => Ok(Value::String(format!("{x:?}"))),
        _ => Err("str type expected".to_string()),
    }
}

pub fn to_int(value: &Value) -> Result<Value, String> {
    let invalid = || "value is not a valid integer".to_string();
    match value {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < i64::MAX as f64 => {
            Ok(Value::Integer(*x as i64))
        }
        Value::String(s) => s.trim().parse::<i64>().map(Value::Integer).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub fn to_float(value: &Value) -> Result<Value, String> {
    let invalid = || "value is not a valid float".to_string();
    match value {
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Integer(i) => Ok(Value::Float(*i as f64)),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub fn to_bool(value: &Value) -> Result<Value, String> {
    let invalid = || "value could not be parsed to a boolean".to_string();
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Integer(0) => Ok(Value::Bool(false)),
        Value::Integer(1) => Ok(Value::Bool(true)),
        Value::String(s) => {
            let word = s.trim().to_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(true))
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(false))
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

/// Accepts ISO 8601 date-times (with `T` or a space between date and time,
/// optional fractional seconds, optional `Z`/offset) and integer Unix
/// timestamps in seconds. A bare date is not a date-time.
pub fn to_datetime(value: &Value) -> Result<Value, String> {
    let invalid = || "invalid datetime format".to_string();
    match value {
        Value::DateTime(ts) => Ok(Value::DateTime(*ts)),
        Value::String(s) => parse_datetime(s).map(Value::DateTime).ok_or_else(invalid),
        Value::Integer(secs) => DateTime::from_timestamp(*secs, 0)
            .map(|dt| Value::DateTime(Timestamp::Offset(dt.fixed_offset())))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

pub fn parse_datetime(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    // Allow "YYYY-MM-DD HH:MM:SS" by normalising the separator.
    let normalized = match input.as_bytes().get(10) {
        Some(b' ') | Some(b't') => format!("{}T{}", &input[..10], &input[11..]),
        _ => input.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(Timestamp::Offset(dt));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .map(Timestamp::Naive)
}

pub fn to_ipv4(value: &Value) -> Result<Value, String> {
    let invalid = || "value is not a valid IPv4 address".to_string();
    match value {
        Value::Ipv4(ip) => Ok(Value::Ipv4(*ip)),
        Value::String(s) => s.trim().parse::<Ipv4Addr>().map(Value::Ipv4).map_err(|_| invalid()),
        Value::Integer(i) => u32::try_from(*i)
            .map(|n| Value::Ipv4(Ipv4Addr::from(n)))
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub fn to_path(value: &Value) -> Result<Value, String> {
    match value {
        Value::Path(p) => Ok(Value::Path(p.clone())),
        Value::String(s) => Ok(Value::Path(PathBuf::from(s))),
        _ => Err("value is not a valid path".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_accept_numbers_but_not_bools() {
        assert_eq!(to_str(&Value::Integer(5)), Ok(Value::from("5")));
        assert_eq!(to_str(&Value::Float(5000.1)), Ok(Value::from("5000.1")));
        assert!(to_str(&Value::Bool(true)).is_err());
        assert!(to_str(&Value::from(vec!["a"])).is_err());
    }

    #[test]
    fn integers_from_strings_and_whole_floats() {
        assert_eq!(to_int(&Value::from(" 8080 ")), Ok(Value::Integer(8080)));
        assert_eq!(to_int(&Value::Float(8001.0)), Ok(Value::Integer(8001)));
        assert!(to_int(&Value::Float(8001.5)).is_err());
        assert!(to_int(&Value::from("eighty")).is_err());
        assert!(to_int(&Value::Bool(true)).is_err());
    }

    #[test]
    fn integer_widens_to_float() {
        assert_eq!(to_float(&Value::Integer(5000)), Ok(Value::Float(5000.0)));
        assert_eq!(to_float(&Value::from("2.5")), Ok(Value::Float(2.5)));
    }

    #[test]
    fn boolean_words() {
        for word in ["yes", "On", "TRUE", "1", "t", "y"] {
            assert_eq!(to_bool(&Value::from(word)), Ok(Value::Bool(true)), "{word}");
        }
        for word in ["no", "off", "False", "0", "f", "n"] {
            assert_eq!(to_bool(&Value::from(word)), Ok(Value::Bool(false)), "{word}");
        }
        assert_eq!(to_bool(&Value::Integer(1)), Ok(Value::Bool(true)));
        assert!(to_bool(&Value::Integer(2)).is_err());
        assert!(to_bool(&Value::from("maybe")).is_err());
    }

    #[test]
    fn datetime_formats() {
        let naive = parse_datetime("1901-01-01T00:00:00").unwrap();
        assert!(matches!(naive, Timestamp::Naive(_)));
        assert_eq!(naive.to_string(), "1901-01-01T00:00:00");

        assert!(matches!(
            parse_datetime("1901-01-01 12:30:00.25"),
            Some(Timestamp::Naive(_))
        ));
        assert!(matches!(parse_datetime("1901-01-01T12:30"), Some(Timestamp::Naive(_))));
        assert!(matches!(
            parse_datetime("2024-05-01T10:00:00+02:00"),
            Some(Timestamp::Offset(_))
        ));
        assert!(matches!(parse_datetime("2024-05-01T10:00:00Z"), Some(Timestamp::Offset(_))));

        assert_eq!(parse_datetime("1901-01-01"), None);
        assert_eq!(parse_datetime("not a date"), None);
    }

    #[test]
    fn unix_timestamp_becomes_datetime() {
        let Ok(Value::DateTime(ts)) = to_datetime(&Value::Integer(0)) else {
            panic!("expected a datetime");
        };
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn ipv4_from_dotted_quad_or_integer() {
        assert_eq!(
            to_ipv4(&Value::from("192.168.1.1")),
            Ok(Value::Ipv4(Ipv4Addr::new(192, 168, 1, 1)))
        );
        assert_eq!(
            to_ipv4(&Value::Integer(3_232_235_777)),
            Ok(Value::Ipv4(Ipv4Addr::new(192, 168, 1, 1)))
        );
        assert!(to_ipv4(&Value::from("256.0.0.1")).is_err());
        assert!(to_ipv4(&Value::from("::1")).is_err());
        assert!(to_ipv4(&Value::Integer(-1)).is_err());
    }
}
