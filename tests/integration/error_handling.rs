//! Error mapping for failed `generateContent` calls.

use super::mock_server::{MockServerFixture, API_KEY, GENERATE_PATH};
use genai_tools::Error;
use serde_json::json;

#[tokio::test]
async fn test_gemini_error_body_maps_to_remote() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .mock_generate_error(
            400,
            &json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })
            .to_string(),
        )
        .await;

    match fixture.client().generate_content("Hello").await {
        Err(Error::Remote { status, class, message }) => {
            assert_eq!(status, 400);
            assert_eq!(class, "invalid_argument");
            assert!(message.contains("API key not valid"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_server_error_maps_to_remote() {
    let mut fixture = MockServerFixture::new().await;
    fixture.mock_generate_error(503, "upstream unavailable").await;

    match fixture.client().generate_content("Hello").await {
        Err(Error::Remote { status, class, message }) => {
            assert_eq!(status, 503);
            assert_eq!(class, "service_unavailable");
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_key_sent_in_header() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", API_KEY)
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body(
            json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "hi"}]}}]})
                .to_string(),
        )
        .create_async()
        .await;

    let response = fixture.client().generate_content("Hello").await.unwrap();
    assert_eq!(response.text.as_deref(), Some("hi"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    assert!(matches!(
        fixture.client().generate_content("Hello").await,
        Err(Error::Serialization(_))
    ));
}
