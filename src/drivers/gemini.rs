//! Gemini generateContent 驱动: request/response translation for Google Gemini
//!
//! Google Gemini generateContent API driver. Key points:
//! - Uses `contents` with `parts`; roles are `user` and `model`.
//! - System prompt goes into top-level `systemInstruction`.
//! - `generationConfig` wraps temperature, `maxOutputTokens`, `responseMimeType`, `responseSchema`.
//! - Tools are sent as `tools: [{functionDeclarations: [...]}]` with
//!   `toolConfig.functionCallingConfig.mode` selecting AUTO / ANY / NONE.
//! - Response: `candidates[0].content.parts[]`, each part text or `functionCall`.

use serde_json::{json, Value};
use tracing::debug;

use crate::error::Error;
use crate::types::{Content, FunctionCall, ModelResponse, UsageMetadata};

use super::GenerateRequest;

/// Google Gemini generateContent API driver.
#[derive(Debug, Clone, Default)]
pub struct GeminiDriver;

impl GeminiDriver {
    pub fn new() -> Self {
        Self
    }

    /// Path relative to the API base URL.
    pub fn endpoint(model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("/models/{}:generateContent", model)
    }

    pub fn build_request(&self, request: &GenerateRequest) -> Result<Value, Error> {
        let mut body = json!({
            "contents": serde_json::to_value(&request.contents)?,
        });

        if let Some(sys) = &request.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": sys }] });
        }

        if let Some(cfg) = &request.generation_config {
            if !cfg.is_empty() {
                body["generationConfig"] = serde_json::to_value(cfg)?;
            }
        }

        if !request.tools.is_empty() {
            body["tools"] = json!([{ "functionDeclarations": request.tools }]);
            if let Some(mode) = request.calling_mode {
                body["toolConfig"] = json!({
                    "functionCallingConfig": { "mode": mode }
                });
            }
        }

        debug!(
            contents = request.contents.len(),
            tools = request.tools.len(),
            "built generateContent request"
        );
        Ok(body)
    }

    pub fn parse_response(&self, body: &Value) -> Result<ModelResponse, Error> {
        if let Some(error) = body.get("error") {
            return Err(remote_error(error));
        }

        let content: Option<Content> = match body.pointer("/candidates/0/content") {
            Some(c) => Some(serde_json::from_value(c.clone())?),
            None => None,
        };

        let mut texts: Vec<&str> = Vec::new();
        let mut function_calls: Vec<FunctionCall> = Vec::new();
        if let Some(content) = &content {
            for part in &content.parts {
                if let Some(text) = &part.text {
                    texts.push(text);
                }
                if let Some(call) = &part.function_call {
                    function_calls.push(call.clone());
                }
            }
        }
        let text = if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        };

        let finish_reason = body
            .pointer("/candidates/0/finishReason")
            .and_then(|v| v.as_str())
            .map(|r| match r {
                "STOP" => "stop".to_string(),
                "MAX_TOKENS" => "length".to_string(),
                "SAFETY" => "content_filter".to_string(),
                "RECITATION" => "content_filter".to_string(),
                other => other.to_lowercase(),
            });

        let usage = body.get("usageMetadata").map(|u| UsageMetadata {
            prompt_tokens: u["promptTokenCount"].as_u64().unwrap_or(0),
            completion_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0),
            total_tokens: u["totalTokenCount"].as_u64().unwrap_or(0),
        });

        // Blocked prompts come back without candidates.
        if content.is_none() {
            if let Some(reason) = body
                .pointer("/promptFeedback/blockReason")
                .and_then(|r| r.as_str())
            {
                return Err(Error::Remote {
                    status: 200,
                    class: "prompt_blocked".to_string(),
                    message: format!("prompt blocked: {}", reason),
                });
            }
        }

        Ok(ModelResponse {
            text,
            function_calls,
            finish_reason,
            usage,
            content,
            raw: body.clone(),
        })
    }
}

/// Map a Gemini `{"error": {code, status, message}}` object.
pub(crate) fn remote_error(error: &Value) -> Error {
    Error::Remote {
        status: error["code"].as_u64().unwrap_or(0) as u16,
        class: error["status"]
            .as_str()
            .unwrap_or("UNKNOWN")
            .to_lowercase(),
        message: error["message"]
            .as_str()
            .unwrap_or("unknown error")
            .to_string(),
    }
}
