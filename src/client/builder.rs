use crate::client::core::GenAiClient;
use crate::config::ClientConfig;
use crate::drivers::GeminiDriver;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`GenAiClient`].
///
/// Anything left unset falls back to [`ClientConfig::load`].
#[derive(Default)]
pub struct GenAiClientBuilder {
    api_key: Option<String>,
    model: Option<String>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    timeout: Option<Duration>,
    system_instruction: Option<String>,
}

impl GenAiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the API base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// System instruction sent with every request from this client.
    pub fn system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(text.into());
        self
    }

    pub fn build(self) -> Result<GenAiClient> {
        let mut config = ClientConfig::load(self.api_key)?;
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(base_url) = self.base_url_override {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.http_timeout = timeout;
        }
        Self::build_with_config(config, self.system_instruction)
    }

    pub(crate) fn build_with_config(
        config: ClientConfig,
        system_instruction: Option<String>,
    ) -> Result<GenAiClient> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(GenAiClient {
            transport,
            driver: GeminiDriver::new(),
            model: config.model,
            system_instruction,
        })
    }
}
