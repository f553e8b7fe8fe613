//! Function calling definitions for the Gemini API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool declaration (listed under `tools[].functionDeclarations`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>, // JSON Schema (OpenAPI subset)
}

/// Function call (invocation from model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            id: None,
            name: name.into(),
            args,
        }
    }

    /// Build a call from a JSON object literal. Non-object values yield no arguments.
    pub fn from_json(name: impl Into<String>, args: Value) -> Self {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(name, args)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Function response (reply to a function call)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: Value,
}

/// `toolConfig.functionCallingConfig.mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionCallingMode {
    /// Model decides between text and function calls.
    Auto,
    /// Model must call at least one function.
    Any,
    /// Function calling disabled.
    None,
}

impl FunctionCallingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionCallingMode::Auto => "AUTO",
            FunctionCallingMode::Any => "ANY",
            FunctionCallingMode::None => "NONE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_call_without_args_deserializes() {
        let call: FunctionCall = serde_json::from_value(json!({"name": "list_rooms"})).unwrap();
        assert_eq!(call.name, "list_rooms");
        assert!(call.args.is_empty());
        assert!(call.id.is_none());
    }

    #[test]
    fn test_function_call_keeps_argument_order() {
        let call: FunctionCall = serde_json::from_str(
            r#"{"name":"set_light_values","args":{"color_temp":"warm","brightness":20}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = call.args.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["color_temp", "brightness"]);
    }

    #[test]
    fn test_calling_mode_serializes_uppercase() {
        assert_eq!(json!(FunctionCallingMode::Any), json!("ANY"));
        assert_eq!(FunctionCallingMode::Auto.as_str(), "AUTO");
    }
}
