//! Provider 驱动层: request model shared by the client and the Gemini driver.

pub mod gemini;

use crate::types::{Content, FunctionCallingMode, FunctionDeclaration, GenerationConfig};

pub use gemini::GeminiDriver;

/// One `generateContent` request before it is rendered to JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Option<String>,
    pub generation_config: Option<GenerationConfig>,
    pub tools: Vec<FunctionDeclaration>,
    /// Only sent when `tools` is non-empty.
    pub calling_mode: Option<FunctionCallingMode>,
}

impl GenerateRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            ..Default::default()
        }
    }

    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(text.into());
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    pub fn with_tools(mut self, tools: Vec<FunctionDeclaration>, mode: FunctionCallingMode) -> Self {
        self.tools = tools;
        self.calling_mode = Some(mode);
        self
    }
}
