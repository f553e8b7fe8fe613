use crate::config::ClientConfig;
use crate::drivers::gemini::remote_error;
use crate::drivers::GeminiDriver;
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::{Proxy, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::TransportError;

/// Raw response of a plain GET, used for document downloads.
#[derive(Debug, Clone)]
pub struct FetchedBytes {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => debug!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url"),
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a `generateContent` body and return the decoded JSON.
    ///
    /// Non-2xx statuses become [`Error::Remote`], using the Gemini error
    /// object when the body carries one.
    pub async fn generate_content(&self, model: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, GeminiDriver::endpoint(model));
        debug!(url = %url, "POST generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status();
        let text = response.text().await.map_err(TransportError::Http)?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<Value>(&text) {
                Ok(json) if json.get("error").is_some() => remote_error(&json["error"]),
                _ => Error::Remote {
                    status: status.as_u16(),
                    class: status
                        .canonical_reason()
                        .unwrap_or("unknown")
                        .to_lowercase()
                        .replace(' ', "_"),
                    message: text,
                },
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// GET an arbitrary URL, optionally with a bearer token. The status is
    /// returned rather than checked so callers can map it to their own error.
    pub async fn fetch_bytes(&self, url: &str, bearer: Option<&str>) -> Result<FetchedBytes> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(TransportError::Http)?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());
        let bytes = response.bytes().await.map_err(TransportError::Http)?;

        Ok(FetchedBytes {
            status,
            content_type,
            bytes,
        })
    }
}
