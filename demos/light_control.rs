//! Light Control Example
//!
//! Registers a mock `set_light_values` tool and lets the model pick the
//! arguments. With the automatic policy the call is executed and the result
//! is sent back so the model can answer in text.
//!
//! Prerequisites:
//! - GOOGLE_API_KEY (or a `.env` file containing it)
//!
//! Usage:
//!   cargo run --example light_control
//!   cargo run --example light_control -- "Make it bright like daylight"

use genai_tools::tools::{BoxError, ParameterSpec, ToolConfig, ToolDefinition, ToolRegistry};
use genai_tools::{CallPolicy, Content, DispatchOutcome, GenAiClient};
use serde_json::json;

fn set_light_values() -> ToolDefinition {
    ToolDefinition::from_fn("set_light_values", |args| {
        println!("CALLING set_light_values: {:?}", args);
        Ok::<_, BoxError>(json!({
            "brightness": args["brightness"],
            "colorTemperature": args["color_temp"],
        }))
    })
    .with_description("Set the brightness and color temperature of a room light. (mock API)")
    .with_param(
        ParameterSpec::integer("brightness")
            .description("Light level from 0 to 100. Zero is off and 100 is full brightness")
            .range(0.0, 100.0),
    )
    .with_param(
        ParameterSpec::string("color_temp")
            .description("Color temperature of the light fixture, which can be `daylight`, `cool` or `warm`")
            .one_of(["daylight", "cool", "warm"]),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Turn the lights down to a romantic level".to_string());

    let registry = ToolRegistry::new().with_tool(set_light_values())?;
    let config = ToolConfig::new(registry).policy(CallPolicy::Automatic);

    let client = GenAiClient::from_env()?;
    let run = client
        .generate_with_tools(vec![Content::user(prompt)], &config)
        .await?;

    println!("\nLight Control ({} rounds):", run.rounds);
    match run.outcome {
        DispatchOutcome::Text(text) => println!("{text}"),
        other => println!("{other:?}"),
    }
    Ok(())
}
