use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

use crate::client::builder::GenAiClientBuilder;
use crate::client::tools::{run_tool_loop, ToolRun};
use crate::documents::DocumentSource;
use crate::drivers::{GeminiDriver, GenerateRequest};
use crate::error::{Error, ErrorContext};
use crate::structured::{generation_config_for, json_schema_from_type, OutputValidator};
use crate::tools::ToolConfig;
use crate::transport::HttpTransport;
use crate::types::{Content, ModelResponse, Part, Role};
use crate::Result;

/// Anything that can answer a `generateContent` request.
///
/// [`GenAiClient`] is the HTTP implementation; the function-calling loop only
/// depends on this trait.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse>;
}

/// Gemini client.
pub struct GenAiClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) driver: GeminiDriver,
    pub(crate) model: String,
    pub(crate) system_instruction: Option<String>,
}

#[async_trait]
impl ContentGenerator for GenAiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse> {
        let body = self.driver.build_request(request)?;
        let started = std::time::Instant::now();
        let raw = self.transport.generate_content(&self.model, &body).await?;
        let response = self.driver.parse_response(&raw)?;
        info!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            function_calls = response.function_calls.len(),
            finish_reason = response.finish_reason.as_deref().unwrap_or(""),
            "generateContent completed"
        );
        Ok(response)
    }
}

impl GenAiClient {
    pub fn builder() -> GenAiClientBuilder {
        GenAiClientBuilder::new()
    }

    /// Client configured entirely from keyring / environment.
    pub fn from_env() -> Result<Self> {
        GenAiClientBuilder::new().build()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn request(&self, contents: Vec<Content>) -> GenerateRequest {
        GenerateRequest {
            contents,
            system_instruction: self.system_instruction.clone(),
            ..Default::default()
        }
    }

    /// Plain text generation from a single prompt.
    pub async fn generate_content(&self, prompt: impl Into<String>) -> Result<ModelResponse> {
        self.generate(&self.request(vec![Content::user(prompt)]))
            .await
    }

    /// Generate JSON shaped like `T` and deserialize it.
    ///
    /// The response is checked against the full schema of `T` before
    /// deserialization, so a missing field surfaces as [`Error::Validation`].
    pub async fn generate_structured<T>(&self, prompt: impl Into<String>) -> Result<T>
    where
        T: JsonSchema + DeserializeOwned,
    {
        let mut request = self.request(vec![Content::user(prompt)]);
        request.generation_config = Some(generation_config_for::<T>());

        let response = self.generate(&request).await?;
        let text = response.text.ok_or_else(|| {
            Error::validation_with_context(
                "Model returned no text for a structured request",
                ErrorContext::new()
                    .with_field_path("candidates[0].content")
                    .with_details(response.finish_reason.unwrap_or_default())
                    .with_source("generate_structured"),
            )
        })?;

        OutputValidator::new(&json_schema_from_type::<T>())?.parse(&text)
    }

    /// Run the function-calling loop described by `config`.
    pub async fn generate_with_tools(
        &self,
        contents: Vec<Content>,
        config: &ToolConfig,
    ) -> Result<ToolRun> {
        run_tool_loop(self, contents, config, self.system_instruction.clone()).await
    }

    /// Send documents as inline data followed by the prompt, in one user turn.
    pub async fn generate_with_documents(
        &self,
        documents: &[DocumentSource],
        prompt: impl Into<String>,
    ) -> Result<ModelResponse> {
        let mut parts = Vec::with_capacity(documents.len() + 1);
        for source in documents {
            let document = source.load(&self.transport).await?;
            parts.push(document.to_part());
        }
        parts.push(Part::text(prompt));
        debug!(documents = documents.len(), "sending documents");

        self.generate(&self.request(vec![Content::with_parts(Role::User, parts)]))
            .await
    }
}
