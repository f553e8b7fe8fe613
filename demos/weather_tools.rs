//! Weather + Lights Function Calling Example
//!
//! Registers `get_weather` (live data from open-meteo.com) next to the mock
//! `set_light_values` and runs one prompt under the chosen call policy:
//! - `automatic`: calls are executed and the results sent back
//! - `manual`: the requested calls are printed, nothing runs
//! - `forced`: the model must call a tool on the first request
//!
//! Usage:
//!   cargo run --example weather_tools
//!   cargo run --example weather_tools -- manual
//!   cargo run --example weather_tools -- forced "What is the weather like in Paris?"

use genai_tools::tools::{BoxError, ParameterSpec, ToolConfig, ToolDefinition, ToolRegistry};
use genai_tools::{CallPolicy, Content, DispatchOutcome, GenAiClient};
use serde_json::{json, Value};

fn get_weather(http: reqwest::Client) -> ToolDefinition {
    ToolDefinition::from_async_fn("get_weather", move |args| {
        let http = http.clone();
        async move {
            let latitude = args["latitude"].as_f64().ok_or("latitude is not a number")?;
            let longitude = args["longitude"].as_f64().ok_or("longitude is not a number")?;
            println!("CALLING get_weather: {latitude}, {longitude}");
            let body: Value = http
                .get("https://api.open-meteo.com/v1/forecast")
                .query(&[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("current", "temperature_2m,wind_speed_10m".to_string()),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok::<_, BoxError>(body["current"].clone())
        }
    })
    .with_description(
        "Get current weather data for a specific location: temperature_2m in Celsius and wind_speed_10m in km/h.",
    )
    .with_param(
        ParameterSpec::number("latitude")
            .description("Location latitude (between -90 and 90 degrees)")
            .range(-90.0, 90.0),
    )
    .with_param(
        ParameterSpec::number("longitude")
            .description("Location longitude (between -180 and 180 degrees)")
            .range(-180.0, 180.0),
    )
}

fn set_light_values() -> ToolDefinition {
    ToolDefinition::from_fn("set_light_values", |args| {
        Ok::<_, BoxError>(json!({
            "brightness": args["brightness"],
            "colorTemperature": args["color_temp"],
        }))
    })
    .with_description("Set the brightness and color temperature of a room light.")
    .with_param(ParameterSpec::integer("brightness").range(0.0, 100.0))
    .with_param(ParameterSpec::string("color_temp").one_of(["daylight", "cool", "warm"]))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let policy: CallPolicy = args
        .next()
        .as_deref()
        .unwrap_or("automatic")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let prompt = args
        .next()
        .unwrap_or_else(|| "What is the weather like in Paris?".to_string());

    let registry = ToolRegistry::new()
        .with_tool(get_weather(reqwest::Client::new()))?
        .with_tool(set_light_values())?;
    let config = ToolConfig::new(registry).policy(policy);

    let client = GenAiClient::from_env()?;
    let run = client
        .generate_with_tools(vec![Content::user(prompt)], &config)
        .await?;

    println!("\npolicy={} rounds={}", policy, run.rounds);
    match &run.outcome {
        DispatchOutcome::Text(text) => println!("LLM RESPONSE: {text}"),
        DispatchOutcome::PendingCalls(calls) => {
            for call in calls {
                println!("requested {} {}", call.name, Value::Object(call.args.clone()));
            }
        }
        DispatchOutcome::ExecutedCalls(results) => {
            for result in results {
                println!("{} -> {:?}", result.call.name, result.outcome);
            }
        }
        DispatchOutcome::ProtocolViolation { text } => {
            println!("model did not call a tool: {}", text.as_deref().unwrap_or(""));
        }
    }
    Ok(())
}
