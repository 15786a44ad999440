// src/demo.rs

//! The built-in walkthrough: a list of example inputs, each validated and
//! printed with its expected outcome.

use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::schema::{SchemaName, ValidationResult, Validator};
use crate::value::{Mapping, Value};

const RULE: &str = "=====================";

/// One example input for the walkthrough.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub schema: SchemaName,
    /// What the input is expected to do, printed before the outcome.
    pub outcome: &'static str,
    pub expect_valid: bool,
    pub input: Mapping,
}

fn mapping<const N: usize>(entries: [(&str, Value); N]) -> Mapping {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// The example inputs, in presentation order.
///
/// `existing_file` must name a file that exists; it drives the "path already
/// exists" example.
pub fn scenarios(existing_file: &Path) -> Vec<Scenario> {
    vec![
        Scenario {
            schema: SchemaName::Owner,
            outcome: "Valid configuration.",
            expect_valid: true,
            input: mapping([
                ("name", Value::from("Matt Price")),
                ("dob", Value::from("1901-01-01T00:00:00")),
            ]),
        },
        Scenario {
            schema: SchemaName::Owner,
            outcome: "Valid configuration: location field not in schema so not present after validation.",
            expect_valid: true,
            input: mapping([
                ("name", Value::from("Matt Price")),
                ("dob", Value::from("1901-01-01T00:00:00")),
                ("location", Value::from("Home")),
            ]),
        },
        Scenario {
            schema: SchemaName::Owner,
            outcome: "Invalid configuration: both fields fail checks.",
            expect_valid: false,
            input: mapping([("name", Value::from("Matt")), ("dob", Value::from("1901-01-01"))]),
        },
        Scenario {
            schema: SchemaName::Database,
            outcome: "Valid configuration: server converted to an IPv4 address, ports converted to a list.",
            expect_valid: true,
            input: mapping([
                ("server", Value::from("192.168.1.1")),
                ("ports", Value::Integer(8080)),
                ("connection_max", Value::Float(5000.1)),
                ("enabled", Value::Bool(true)),
            ]),
        },
        Scenario {
            schema: SchemaName::Database,
            outcome: "Valid configuration: enabled not specified so set to default, connection_max converted to a float.",
            expect_valid: true,
            input: mapping([
                ("server", Value::from("192.168.1.1")),
                ("ports", Value::from(vec![8001_i64, 8001, 8002])),
                ("connection_max", Value::Integer(5000)),
            ]),
        },
        Scenario {
            schema: SchemaName::Database,
            outcome: "Invalid configuration: one entry in ports is not in range.",
            expect_valid: false,
            input: mapping([
                ("server", Value::from("192.168.1.1")),
                ("ports", Value::from(vec![8001_i64, 8001, 8002, 8081])),
                ("connection_max", Value::Integer(5000)),
                ("enabled", Value::Bool(true)),
            ]),
        },
        Scenario {
            schema: SchemaName::Logs,
            outcome: "Valid configuration: path converted to a filesystem path.",
            expect_valid: true,
            input: mapping([("save", Value::Bool(true)), ("path", Value::from("./my/logs.json"))]),
        },
        Scenario {
            schema: SchemaName::Logs,
            outcome: "Invalid configuration: file at path already exists.",
            expect_valid: false,
            input: mapping([
                ("save", Value::Bool(true)),
                ("path", Value::from(existing_file.display().to_string())),
            ]),
        },
    ]
}

/// Validate every scenario and print the report to `out`.
///
/// Returns the number of scenarios whose outcome differed from the
/// expectation.
pub fn run_demo<W: Write>(
    validator: &Validator<'_>,
    existing_file: &Path,
    out: &mut W,
) -> Result<usize> {
    let mut surprises = 0;
    for scenario in scenarios(existing_file) {
        let schema = scenario.schema.schema();
        let result = validator.validate(&scenario.input, &schema);
        if result.is_ok() != scenario.expect_valid {
            let outcome = scenario.outcome;
            tracing::warn!(schema = schema.name(), outcome, "unexpected validation outcome");
            surprises += 1;
        }
        write_report(out, schema.name(), &scenario.input, Some(scenario.outcome), &result)?;
    }
    Ok(surprises)
}

/// Print the raw input, the optional expected outcome, and either the
/// normalized config or the field errors.
pub fn write_report<W: Write>(
    out: &mut W,
    schema: &str,
    raw: &Mapping,
    outcome: Option<&str>,
    result: &ValidationResult,
) -> Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Validating config against {schema}:")?;
    out.write_all(to_yaml(raw)?.as_bytes())?;
    writeln!(out)?;

    if let Some(outcome) = outcome {
        writeln!(out, "This will be a: {outcome}")?;
        writeln!(out)?;
    }

    match result {
        Ok(normalized) => {
            writeln!(out, "Validation successful")?;
            writeln!(out)?;
            writeln!(out, "Validated config:")?;
            out.write_all(to_yaml(normalized)?.as_bytes())?;
        }
        Err(errors) => {
            writeln!(out, "Validation failed")?;
            writeln!(out)?;
            writeln!(out, "Error:")?;
            writeln!(out, "{errors}")?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn to_yaml(map: &Mapping) -> Result<String> {
    serde_yaml::to_string(map).context("rendering config as YAML")
}
