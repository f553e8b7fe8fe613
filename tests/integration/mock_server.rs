//! Mock HTTP server setup for integration tests

use genai_tools::{GenAiClient, GenAiClientBuilder};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

pub const MODEL: &str = "gemini-2.0-flash";
pub const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";
pub const API_KEY: &str = "test-key";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server through `base_url_override`.
    pub fn client(&self) -> GenAiClient {
        GenAiClientBuilder::new()
            .api_key(API_KEY)
            .model(MODEL)
            .base_url_override(&self.base_url)
            .build()
            .expect("client builds with explicit key")
    }

    /// `generateContent` answering with `body` for any request carrying the key.
    pub async fn mock_generate(&mut self, body: Value) -> Mock {
        self.mock_generate_matching(Matcher::Any, body).await
    }

    /// `generateContent` answering with `body` when the request body matches.
    pub async fn mock_generate_matching(&mut self, matcher: Matcher, body: Value) -> Mock {
        self.server
            .mock("POST", GENERATE_PATH)
            .match_header("x-goog-api-key", API_KEY)
            .match_body(matcher)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// `generateContent` failing with `status` and a raw body.
    pub async fn mock_generate_error(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", GENERATE_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Plain GET returning bytes, for document downloads.
    pub async fn mock_file(&mut self, path: &str, status: usize, content_type: &str, body: &[u8]) -> Mock {
        self.server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 8,
            "totalTokenCount": 20
        }
    })
}

pub fn call_response(calls: &[(&str, Value)]) -> Value {
    let parts: Vec<Value> = calls
        .iter()
        .map(|(name, args)| json!({ "functionCall": { "name": name, "args": args } }))
        .collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}
