//! A loosely typed entry point for parameter mappings lifted from settings
//! files, validated against the types the builder's setters expect.

use serde_json::Value;

use crate::{Error, Pragmas, Result, Tusq};

impl Tusq {
    /// Build `Self` from a loosely typed parameter mapping.
    ///
    /// `params` must be a mapping with a required `directory` string; every
    /// other parameter accepted by the [`Tusq`] setters is optional. Each
    /// entry is checked against the type its setter expects, and mode names
    /// are matched case-insensitively against the accepted set. Unrecognized
    /// parameter names are rejected, except inside `pragmas`, whose entries
    /// pass through to the generated command untouched.
    pub fn from_params(params: &Value) -> Result<Self> {
        let Some(map) = params.as_object() else {
            return Err(Error::ParameterType {
                parameter: "params".into(),
                expected: "a mapping".into(),
                actual: type_name(params).into(),
            });
        };

        let directory = match map.get("directory") {
            Some(value) => string_param("directory", value)?,
            None => return Err(Error::MissingParameter("directory".into())),
        };

        let mut options = Tusq::new(directory);
        for (name, value) in map {
            match name.as_str() {
                // consumed above
                "directory" => {}
                "file_name" => options = options.file_name(string_param(name, value)?),
                "engine" => options = options.engine(string_param(name, value)?),
                "transaction_mode" => {
                    options = options.transaction_mode(string_param(name, value)?.parse()?);
                }
                "timeout" => options = options.timeout(timeout_param(name, value)?),
                "init_command" => options = options.init_command(string_param(name, value)?),
                "cache_size" => options = options.cache_size(integer_param(name, value)?),
                "journal_mode" => {
                    options = options.journal_mode(string_param(name, value)?.parse()?);
                }
                "synchronous" => {
                    options = options.synchronous(string_param(name, value)?.parse()?);
                }
                "mmap_size" => options = options.mmap_size(integer_param(name, value)?),
                "journal_size_limit" => {
                    options = options.journal_size_limit(integer_param(name, value)?);
                }
                "pragmas" => options = options.pragmas(pragmas_param(value)?),
                _ => return Err(Error::UnknownParameter(name.clone())),
            }
        }

        Ok(options)
    }
}

/// Human-readable name for a JSON value's type, as reported in errors.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(number) if number.is_f64() => "a number",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

fn string_param<'a>(parameter: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| Error::ParameterType {
        parameter: parameter.into(),
        expected: "a string".into(),
        actual: type_name(value).into(),
    })
}

fn integer_param(parameter: &str, value: &Value) -> Result<i64> {
    if let Value::Number(number) = value {
        if !number.is_f64() {
            return number.as_i64().ok_or_else(|| Error::ParameterValue {
                parameter: parameter.into(),
                expected: "an integer within the signed 64-bit range".into(),
                value: number.to_string(),
            });
        }
    }
    Err(Error::ParameterType {
        parameter: parameter.into(),
        expected: "an integer".into(),
        actual: type_name(value).into(),
    })
}

fn timeout_param(parameter: &str, value: &Value) -> Result<u64> {
    if let Value::Number(number) = value {
        if !number.is_f64() {
            return number.as_u64().ok_or_else(|| Error::ParameterValue {
                parameter: parameter.into(),
                expected: "a non-negative integer".into(),
                value: number.to_string(),
            });
        }
    }
    Err(Error::ParameterType {
        parameter: parameter.into(),
        expected: "an integer".into(),
        actual: type_name(value).into(),
    })
}

fn pragmas_param(value: &Value) -> Result<Pragmas> {
    let Some(map) = value.as_object() else {
        return Err(Error::ParameterType {
            parameter: "pragmas".into(),
            expected: "a mapping".into(),
            actual: type_name(value).into(),
        });
    };

    let mut pragmas = Pragmas::new();
    for (name, entry) in map {
        match entry {
            Value::String(text) => pragmas.insert(name, text.as_str()),
            Value::Number(number) if !number.is_f64() => match number.as_i64() {
                Some(int) => pragmas.insert(name, int),
                None => {
                    return Err(Error::ParameterValue {
                        parameter: format!("pragmas.{name}"),
                        expected: "an integer within the signed 64-bit range".into(),
                        value: number.to_string(),
                    });
                }
            },
            _ => {
                return Err(Error::ParameterType {
                    parameter: format!("pragmas.{name}"),
                    expected: "an integer or a string".into(),
                    actual: type_name(entry).into(),
                });
            }
        }
    }
    Ok(pragmas)
}
