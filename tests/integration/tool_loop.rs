//! Function-calling loop over HTTP.

use super::mock_server::{call_response, text_response, MockServerFixture};
use genai_tools::tools::{BoxError, ParameterSpec, ToolConfig, ToolDefinition, ToolRegistry};
use genai_tools::{CallPolicy, Content, DispatchOutcome};
use mockito::Matcher;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn light_config(policy: CallPolicy, counter: Arc<AtomicUsize>) -> ToolConfig {
    let tool = ToolDefinition::from_fn("set_light_values", move |args| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, BoxError>(json!({
            "brightness": args["brightness"],
            "colorTemperature": args["color_temp"],
        }))
    })
    .with_description("Set the brightness and color temperature of a room light.")
    .with_param(ParameterSpec::integer("brightness").range(0.0, 100.0))
    .with_param(ParameterSpec::string("color_temp").one_of(["daylight", "cool", "warm"]));
    ToolConfig::new(ToolRegistry::new().with_tool(tool).unwrap()).policy(policy)
}

#[tokio::test]
async fn test_automatic_round_trip() {
    let mut fixture = MockServerFixture::new().await;
    let first = fixture
        .mock_generate_matching(
            Matcher::PartialJson(json!({
                "toolConfig": { "functionCallingConfig": { "mode": "AUTO" } }
            })),
            call_response(&[("set_light_values", json!({"brightness": 20, "color_temp": "warm"}))]),
        )
        .await;
    // Only the follow-up request carries the function response.
    let second = fixture
        .mock_generate_matching(
            Matcher::Regex(r#""functionResponse""#.to_string()),
            text_response("I've dimmed the lights to a warm 20%."),
        )
        .await;

    let counter = Arc::new(AtomicUsize::new(0));
    let config = light_config(CallPolicy::Automatic, counter.clone());
    let run = fixture
        .client()
        .generate_with_tools(vec![Content::user("Turn the lights down to a romantic level")], &config)
        .await
        .unwrap();

    assert_eq!(run.text(), Some("I've dimmed the lights to a warm 20%."));
    assert_eq!(run.rounds, 2);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_manual_returns_pending_calls_without_second_request() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_generate(call_response(&[(
            "set_light_values",
            json!({"brightness": 20, "color_temp": "warm"}),
        )]))
        .await;

    let counter = Arc::new(AtomicUsize::new(0));
    let config = light_config(CallPolicy::Manual, counter.clone());
    let run = fixture
        .client()
        .generate_with_tools(vec![Content::user("Dim the lights")], &config)
        .await
        .unwrap();

    match &run.outcome {
        DispatchOutcome::PendingCalls(calls) => {
            assert_eq!(calls[0].name, "set_light_values");
            assert_eq!(calls[0].args["brightness"], 20);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_forced_mode_sent_as_any() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_generate_matching(
            Matcher::PartialJson(json!({
                "toolConfig": { "functionCallingConfig": { "mode": "ANY" } }
            })),
            text_response("I would rather chat."),
        )
        .await;

    let config = light_config(CallPolicy::Forced, Arc::new(AtomicUsize::new(0)));
    let run = fixture
        .client()
        .generate_with_tools(vec![Content::user("Hello")], &config)
        .await
        .unwrap();

    assert!(matches!(run.outcome, DispatchOutcome::ProtocolViolation { .. }));
    mock.assert_async().await;
}
