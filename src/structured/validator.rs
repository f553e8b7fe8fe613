//! Output validator for structured responses.
//!
//! The model is asked for JSON matching a reduced schema; the full JSON Schema
//! generated from the target type is used here to check what actually came back.

use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, ErrorContext};
use crate::Result;

/// Validator for structured output, compiled once per schema.
pub struct OutputValidator {
    schema: JSONSchema,
}

impl OutputValidator {
    pub fn new(schema: &Value) -> Result<Self> {
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| {
                Error::validation_with_context(
                    format!("Failed to compile schema: {}", e),
                    ErrorContext::new().with_source("output_validator"),
                )
            })?;
        Ok(Self { schema })
    }

    /// Validate a parsed value, collecting every violation into one error.
    pub fn validate(&self, data: &Value) -> Result<()> {
        if let Err(errors) = self.schema.validate(data) {
            let messages: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{}: {}", path, e)
                    }
                })
                .collect();
            return Err(Error::validation_with_context(
                "Structured output does not match schema",
                ErrorContext::new()
                    .with_details(messages.join("; "))
                    .with_source("output_validator"),
            ));
        }
        Ok(())
    }

    /// Parse model text as JSON, validate it, then deserialize into `T`.
    pub fn parse<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let value: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
            Error::validation_with_context(
                "Structured output is not valid JSON",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("output_validator"),
            )
        })?;
        self.validate(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Models occasionally wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = match trimmed.strip_prefix("```json") {
        Some(rest) => rest,
        None => match trimmed.strip_prefix("```") {
            Some(rest) => rest,
            None => return trimmed,
        },
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
