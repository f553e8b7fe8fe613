//! Integration tests for structured output functionality

use genai_tools::structured::{
    generation_config_for, json_schema_from_type, to_gemini_schema, OutputValidator,
};
use genai_tools::Error;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
struct CalendarEvent {
    name: String,
    date: String,
    participants: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct LightScene {
    /// Scene label shown in the app
    label: String,
    brightness: u8,
    temperature: ColorTemperature,
    notes: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum ColorTemperature {
    Daylight,
    Cool,
    Warm,
}

#[test]
fn test_end_to_end_calendar_event() {
    let schema = json_schema_from_type::<CalendarEvent>();
    let validator = OutputValidator::new(&schema).unwrap();

    let event: CalendarEvent = validator
        .parse(r#"{"name": "Science fair", "date": "Friday", "participants": ["Alice", "Bob"]}"#)
        .unwrap();
    assert_eq!(
        event,
        CalendarEvent {
            name: "Science fair".into(),
            date: "Friday".into(),
            participants: vec!["Alice".into(), "Bob".into()],
        }
    );
}

#[test]
fn test_response_schema_for_nested_enum() {
    let schema = to_gemini_schema(&json_schema_from_type::<LightScene>());

    assert_eq!(
        schema["propertyOrdering"],
        json!(["label", "brightness", "temperature", "notes"])
    );
    assert_eq!(
        schema["properties"]["temperature"]["enum"],
        json!(["daylight", "cool", "warm"])
    );
    assert_eq!(schema["properties"]["notes"]["nullable"], true);
    assert_eq!(
        schema["properties"]["label"]["description"],
        "Scene label shown in the app"
    );
    assert!(schema.get("definitions").is_none());
    assert!(schema.get("$schema").is_none());
}

#[test]
fn test_wrong_types_reported_with_path() {
    let validator = OutputValidator::new(&json_schema_from_type::<LightScene>()).unwrap();
    let err = validator
        .parse::<serde_json::Value>(
            r#"{"label": "Dinner", "brightness": "low", "temperature": "candle", "notes": null}"#,
        )
        .unwrap_err();

    let details = match err {
        Error::Validation { context, .. } => context.details.unwrap_or_default(),
        other => panic!("unexpected: {other:?}"),
    };
    assert!(details.contains("/brightness"));
    assert!(details.contains("/temperature"));
}

#[test]
fn test_generation_config_requests_json() {
    let config = generation_config_for::<CalendarEvent>();
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["responseMimeType"], "application/json");
    assert_eq!(value["responseSchema"]["required"], json!(["name", "date", "participants"]));
}
