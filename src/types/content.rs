//! Conversation contents in the Gemini wire format

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tool::{FunctionCall, FunctionResponse};

/// Conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_parts(Role::User, vec![Part::text(text)])
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::with_parts(Role::Model, vec![Part::text(text)])
    }

    pub fn with_parts(role: Role, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    /// Model turn that replays the given function calls.
    pub fn function_calls(calls: &[FunctionCall]) -> Self {
        Self::with_parts(
            Role::Model,
            calls.iter().cloned().map(Part::function_call).collect(),
        )
    }

    /// User turn carrying function responses, one part per response.
    pub fn function_responses(responses: Vec<FunctionResponse>) -> Self {
        Self::with_parts(
            Role::User,
            responses.into_iter().map(Part::function_response).collect(),
        )
    }

    pub fn contains_inline_data(&self) -> bool {
        self.parts.iter().any(|p| p.inline_data.is_some())
    }
}

/// Conversation role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single part of a turn. Exactly one field is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Fields not modelled above (`thought`, `thoughtSignature`, ...), kept so
    /// a model turn can be sent back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            inline_data: Some(Blob {
                mime_type: mime_type.into(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            }),
            ..Default::default()
        }
    }

    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Default::default()
        }
    }

    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Default::default()
        }
    }
}

/// Inline binary payload (base64 encoded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl Blob {
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.data)
    }
}

/// `generationConfig` request block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GenerationConfig {
    /// JSON output constrained by `schema`.
    pub fn json_schema(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_part_serialization() {
        let content = Content::user("Hello");
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({"role": "user", "parts": [{"text": "Hello"}]})
        );
    }

    #[test]
    fn test_inline_bytes_round_trip() {
        let part = Part::inline_bytes(b"%PDF-1.4", "application/pdf");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["inlineData"]["mimeType"], "application/pdf");
        let blob = part.inline_data.unwrap();
        assert_eq!(blob.decode().unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_function_call_part_parses() {
        let part: Part = serde_json::from_value(json!({
            "functionCall": {"name": "get_weather", "args": {"latitude": 48.85, "longitude": 2.35}}
        }))
        .unwrap();
        let call = part.function_call.unwrap();
        assert_eq!(call.name, "get_weather");
        assert_eq!(call.args["latitude"], 48.85);
    }

    #[test]
    fn test_unknown_part_fields_survive_round_trip() {
        let raw = json!({
            "functionCall": {"name": "set_light_values", "args": {"brightness": 20}},
            "thoughtSignature": "CiQBVKhc7sig"
        });
        let part: Part = serde_json::from_value(raw).unwrap();
        assert!(part.function_call.is_some());
        assert_eq!(part.extra["thoughtSignature"], "CiQBVKhc7sig");
        let back = serde_json::to_value(&part).unwrap();
        assert_eq!(back["thoughtSignature"], "CiQBVKhc7sig");
        assert_eq!(back["functionCall"]["name"], "set_light_values");
    }

    #[test]
    fn test_function_responses_turn_is_user_role() {
        let content = Content::function_responses(vec![FunctionResponse {
            id: None,
            name: "set_light_values".into(),
            response: json!({"result": {"brightness": 20}}),
        }]);
        assert_eq!(content.role, Some(Role::User));
        assert!(content.parts[0].function_response.is_some());
    }

    #[test]
    fn test_generation_config_json_schema() {
        let cfg = GenerationConfig::json_schema(json!({"type": "object"}));
        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["responseMimeType"], "application/json");
        assert!(value.get("temperature").is_none());
        assert!(GenerationConfig::default().is_empty());
    }
}
