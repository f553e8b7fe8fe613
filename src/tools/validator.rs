//! Argument validator for function calls.
//!
//! Checks model-supplied arguments against a tool's declared parameters:
//! - Required arguments present, no undeclared arguments
//! - Type match (string, integer, number, boolean, array items, object)
//! - Inclusive `minimum` / `maximum` ranges
//! - Enumerated values
//!
//! Integers sent as whole floats (`20.0`) are accepted and normalized to `20`,
//! since some responses carry every number as a double.

use serde_json::{Map, Number, Value};

use super::definition::{ParamType, ParameterSpec};
use super::error::ArgumentError;

/// Validator for the arguments of one tool.
pub struct ArgumentValidator<'a> {
    params: &'a [ParameterSpec],
}

impl<'a> ArgumentValidator<'a> {
    pub fn new(params: &'a [ParameterSpec]) -> Self {
        Self { params }
    }

    /// Validate `args`, returning the normalized arguments or every error found.
    pub fn validate(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Map<String, Value>, Vec<ArgumentError>> {
        let mut errors = Vec::new();
        let mut normalized = Map::new();

        for key in args.keys() {
            if !self.params.iter().any(|p| &p.name == key) {
                errors.push(ArgumentError::new(key.as_str(), "Undeclared argument"));
            }
        }

        for param in self.params {
            let value = match args.get(&param.name) {
                Some(Value::Null) | None => {
                    if param.required {
                        errors.push(ArgumentError::new(
                            param.name.as_str(),
                            "Missing required argument",
                        ));
                    }
                    continue;
                }
                Some(v) => v,
            };

            match self.validate_value(value, &param.param_type, &param.name) {
                Ok(v) => {
                    let before = errors.len();
                    self.validate_constraints(&v, param, &mut errors);
                    if errors.len() == before {
                        normalized.insert(param.name.clone(), v);
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }

    /// Type check, returning the (possibly normalized) value.
    fn validate_value(
        &self,
        value: &Value,
        expected: &ParamType,
        path: &str,
    ) -> Result<Value, ArgumentError> {
        match (expected, value) {
            (ParamType::String, Value::String(_))
            | (ParamType::Boolean, Value::Bool(_))
            | (ParamType::Number, Value::Number(_))
            | (ParamType::Object, Value::Object(_)) => Ok(value.clone()),
            (ParamType::Integer, Value::Number(n)) => {
                integral(n).map(Value::from).ok_or_else(|| {
                    ArgumentError::new(path, format!("Expected type 'integer', got '{}'", n))
                })
            }
            (ParamType::Array(items), Value::Array(arr)) => {
                let mut out = Vec::with_capacity(arr.len());
                for (i, item) in arr.iter().enumerate() {
                    out.push(self.validate_value(item, items, &format!("{}[{}]", path, i))?);
                }
                Ok(Value::Array(out))
            }
            _ => Err(ArgumentError::new(
                path,
                format!(
                    "Expected type '{}', got '{}'",
                    expected,
                    json_type_name(value)
                ),
            )),
        }
    }

    fn validate_constraints(
        &self,
        value: &Value,
        param: &ParameterSpec,
        errors: &mut Vec<ArgumentError>,
    ) {
        if let Some(num) = value.as_f64() {
            // minimum
            if let Some(minimum) = param.minimum {
                if num < minimum {
                    errors.push(ArgumentError::new(
                        param.name.as_str(),
                        format!("Value below minimum ({})", minimum),
                    ));
                }
            }

            // maximum
            if let Some(maximum) = param.maximum {
                if num > maximum {
                    errors.push(ArgumentError::new(
                        param.name.as_str(),
                        format!("Value above maximum ({})", maximum),
                    ));
                }
            }
        }

        if let Some(allowed) = &param.allowed_values {
            if !allowed.iter().any(|a| values_equal(a, value)) {
                let listed: Vec<String> = allowed
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => format!("\"{}\"", s),
                        _ => v.to_string(),
                    })
                    .collect();
                errors.push(ArgumentError::new(
                    param.name.as_str(),
                    format!("Value not in allowed enum values: {}", listed.join(", ")),
                ));
            }
        }
    }
}

/// Integer view of `n`; whole floats are narrowed to `i64`.
fn integral(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return Some(n.clone());
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(Number::from(f as i64))
    } else {
        None
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}
