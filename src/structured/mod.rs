//! Structured output: schema-constrained JSON responses.
//!
//! - [`json_schema_from_type`]: JSON Schema for a Rust type via `schemars`
//! - [`to_gemini_schema`]: reduce it to the `responseSchema` subset
//! - [`OutputValidator`]: validate and deserialize what the model returned
//!
//! # Examples
//!
//! ```
//! use genai_tools::structured::{json_schema_from_type, to_gemini_schema, OutputValidator};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, JsonSchema)]
//! struct CalendarEvent {
//!     name: String,
//!     date: String,
//!     participants: Vec<String>,
//! }
//!
//! let schema = json_schema_from_type::<CalendarEvent>();
//! let response_schema = to_gemini_schema(&schema);
//! assert_eq!(response_schema["type"], "object");
//!
//! let validator = OutputValidator::new(&schema).unwrap();
//! let event: CalendarEvent = validator
//!     .parse(r#"{"name":"Science fair","date":"Friday","participants":["Alice","Bob"]}"#)
//!     .unwrap();
//! assert_eq!(event.participants, vec!["Alice", "Bob"]);
//! ```

pub mod schema;
pub mod validator;

pub use schema::{json_schema_from_type, to_gemini_schema};
pub use validator::OutputValidator;

use crate::types::GenerationConfig;

/// Generation config requesting JSON shaped like `T`.
pub fn generation_config_for<T: schemars::JsonSchema>() -> GenerationConfig {
    GenerationConfig::json_schema(to_gemini_schema(&json_schema_from_type::<T>()))
}
