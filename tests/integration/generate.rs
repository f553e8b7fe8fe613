//! Text and structured generation against the mock server.

use super::mock_server::{text_response, MockServerFixture};
use genai_tools::Error;
use mockito::Matcher;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, JsonSchema)]
struct CalendarEvent {
    name: String,
    date: String,
    participants: Vec<String>,
}

#[tokio::test]
async fn test_generate_content_text() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_generate_matching(
            Matcher::PartialJson(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Explain how AI works" }] }]
            })),
            text_response("AI learns patterns from data."),
        )
        .await;

    let response = fixture
        .client()
        .generate_content("Explain how AI works")
        .await
        .unwrap();

    assert_eq!(response.text.as_deref(), Some("AI learns patterns from data."));
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 20);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_structured_calendar_event() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_generate_matching(
            Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "object" }
                }
            })),
            text_response(r#"{"name": "Science fair", "date": "Friday", "participants": ["Alice", "Bob"]}"#),
        )
        .await;

    let event: CalendarEvent = fixture
        .client()
        .generate_structured("Alice and Bob are going to a science fair on Friday.")
        .await
        .unwrap();

    assert_eq!(event.name, "Science fair");
    assert_eq!(event.date, "Friday");
    assert_eq!(event.participants, vec!["Alice", "Bob"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_structured_rejects_incomplete_json() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .mock_generate(text_response(r#"{"name": "Science fair", "date": "Friday"}"#))
        .await;

    let result = fixture
        .client()
        .generate_structured::<CalendarEvent>("Alice and Bob are going to a science fair on Friday.")
        .await;

    match result {
        Err(Error::Validation { context, .. }) => {
            assert!(context.details.unwrap_or_default().contains("participants"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
