//! Client configuration resolved from explicit values, the OS keyring and the
//! environment.
//!
//! Environment variables (a `.env` file is loaded first when present):
//! - `GOOGLE_API_KEY` / `GEMINI_API_KEY`
//! - `GENAI_BASE_URL` (default `https://generativelanguage.googleapis.com/v1beta`)
//! - `GENAI_MODEL` (default `gemini-2.0-flash`)
//! - `GENAI_HTTP_TIMEOUT_SECS` (default 60)
//! - `GENAI_PROXY_URL`

use keyring::Entry;
use std::env;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, ErrorContext};
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

const KEYRING_SERVICE: &str = "genai-tools";
const KEYRING_USER: &str = "google";
const API_KEY_VARS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY"];

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub http_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("http_timeout", &self.http_timeout)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

impl ClientConfig {
    /// Resolve configuration from the environment only.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Resolve configuration; `api_key` wins over keyring and environment.
    pub fn load(api_key: Option<String>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }

        let api_key = match non_empty(api_key) {
            Some(key) => key,
            None => resolve_api_key()?,
        };

        let http_timeout = env::var("GENAI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            base_url: non_empty(env::var("GENAI_BASE_URL").ok())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty(env::var("GENAI_MODEL").ok())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http_timeout: Duration::from_secs(http_timeout.max(1)),
            proxy_url: non_empty(env::var("GENAI_PROXY_URL").ok()),
        })
    }

    /// Fixed configuration with defaults, no environment lookups.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            proxy_url: None,
        }
    }
}

fn resolve_api_key() -> Result<String> {
    // 1. OS keyring
    if let Ok(entry) = Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        if let Ok(key) = entry.get_password() {
            if !key.is_empty() {
                debug!("api key resolved from keyring");
                return Ok(key);
            }
        }
    }

    // 2. Environment
    first_present(API_KEY_VARS.iter().map(|name| env::var(name).ok())).ok_or_else(|| {
        Error::configuration_with_context(
            "GOOGLE_API_KEY environment variable is not set",
            ErrorContext::new()
                .with_field_path("GOOGLE_API_KEY")
                .with_details(format!("also checked {} and keyring", API_KEY_VARS[1]))
                .with_source("client_config"),
        )
    })
}

fn first_present(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates.into_iter().find_map(non_empty)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
