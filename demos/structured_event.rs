//! Structured Output Example
//!
//! Asks the model to extract a calendar event and deserializes the JSON
//! answer straight into a Rust struct. The response schema is derived from
//! the struct with `schemars`.
//!
//! Usage:
//!   cargo run --example structured_event

use genai_tools::structured::{json_schema_from_type, to_gemini_schema};
use genai_tools::GenAiClient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct CalendarEvent {
    name: String,
    date: String,
    participants: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!(
        "responseSchema:\n{}\n",
        serde_json::to_string_pretty(&to_gemini_schema(&json_schema_from_type::<CalendarEvent>()))?
    );

    let client = GenAiClient::from_env()?;
    let event: CalendarEvent = client
        .generate_structured("Alice and Bob are going to a science fair on Friday.")
        .await?;

    println!("name:         {}", event.name);
    println!("date:         {}", event.date);
    println!("participants: {}", event.participants.join(", "));
    Ok(())
}
