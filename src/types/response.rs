//! Parsed model response

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::{Content, Part};
use super::tool::FunctionCall;

/// Token usage reported in `usageMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// One `generateContent` response reduced to what callers and the dispatcher need.
///
/// `function_calls` keeps the order in which the model emitted the calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    /// Concatenated text parts, `None` when the candidate had no text.
    pub text: Option<String>,
    pub function_calls: Vec<FunctionCall>,
    /// Finish reason normalized to lowercase (`stop`, `length`, `content_filter`, ...).
    pub finish_reason: Option<String>,
    pub usage: Option<UsageMetadata>,
    /// Candidate content as returned, replayed verbatim in follow-up turns.
    pub content: Option<Content>,
    pub raw: Value,
}

impl ModelResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn from_calls(calls: Vec<FunctionCall>) -> Self {
        Self {
            function_calls: calls,
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_function_calls(&self) -> bool {
        !self.function_calls.is_empty()
    }

    /// The model turn to append to history before sending function responses.
    pub fn model_turn(&self) -> Content {
        match &self.content {
            Some(content) => content.clone(),
            None => {
                let mut turn = Content::function_calls(&self.function_calls);
                if let Some(text) = &self.text {
                    turn.parts.insert(0, Part::text(text.clone()));
                }
                turn
            }
        }
    }
}
