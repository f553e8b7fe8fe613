//! genai-cli: command-line front end for text, structured, tool and document requests
//!
//! Usage:
//!   genai-cli text <prompt>                                Plain text generation
//!   genai-cli structured <prompt>                          Extract a calendar event as JSON
//!   genai-cli tools [--policy <p>] [--max-calls <n>] <prompt>
//!                                                          Function calling with the light/weather tools
//!   genai-cli documents <source>... --prompt <prompt>      Ask about PDFs (URL, path, drive:<id>)

use anyhow::{bail, Context};
use genai_tools::tools::{BoxError, ParameterSpec, ToolConfig, ToolDefinition, ToolRegistry};
use genai_tools::{CallPolicy, Content, DispatchOutcome, DocumentSource, GenAiClient};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

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

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "text" => cmd_text(&args[2..]).await,
        "structured" => cmd_structured(&args[2..]).await,
        "tools" => cmd_tools(&args[2..]).await,
        "documents" => cmd_documents(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("genai-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"genai-cli: Gemini text, structured output, tools and documents

USAGE:
    genai-cli <COMMAND> [OPTIONS]

COMMANDS:
    text <prompt>                         Plain text generation
    structured <prompt>                   Extract {{name, date, participants}} as JSON
    tools [--policy <p>] [--max-calls <n>] <prompt>
                                          Function calling; policy is automatic|manual|forced
    documents <source>... --prompt <p>    Inline PDFs from URLs, paths or drive:<file-id>
    version                               Show version information
    help                                  Show this help message

ENVIRONMENT:
    GOOGLE_API_KEY                        API key (or GEMINI_API_KEY, or keyring entry)
    GENAI_MODEL                           Model id (default gemini-2.0-flash)
    GOOGLE_DRIVE_TOKEN                    OAuth access token for drive:<file-id> sources
    RUST_LOG                              Log filter, e.g. genai_tools=debug"#
    );
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Positional words with `--flag value` pairs removed.
fn positional(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.clone());
        }
    }
    out
}

fn prompt_from(args: &[String]) -> anyhow::Result<String> {
    let words = positional(args);
    if words.is_empty() {
        bail!("missing prompt");
    }
    Ok(words.join(" "))
}

async fn cmd_text(args: &[String]) -> anyhow::Result<()> {
    let prompt = prompt_from(args)?;
    let client = GenAiClient::from_env()?;
    let response = client.generate_content(prompt).await?;
    println!("{}", response.text.unwrap_or_default());
    Ok(())
}

async fn cmd_structured(args: &[String]) -> anyhow::Result<()> {
    let prompt = prompt_from(args)?;
    let client = GenAiClient::from_env()?;
    let event: CalendarEvent = client.generate_structured(prompt).await?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

async fn cmd_tools(args: &[String]) -> anyhow::Result<()> {
    let prompt = prompt_from(args)?;
    let policy: CallPolicy = flag_value(args, "--policy")
        .as_deref()
        .unwrap_or("automatic")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let registry = ToolRegistry::new()
        .with_tool(set_light_values())?
        .with_tool(get_weather())?;
    let mut config = ToolConfig::new(registry).policy(policy);
    if let Some(n) = flag_value(args, "--max-calls") {
        config = config.max_remote_calls(n.parse().context("--max-calls must be a number")?);
    }

    let client = GenAiClient::from_env()?;
    let run = client
        .generate_with_tools(vec![Content::user(prompt)], &config)
        .await?;

    match &run.outcome {
        DispatchOutcome::Text(text) => println!("{text}"),
        DispatchOutcome::PendingCalls(calls) => {
            println!("Pending function calls:");
            for call in calls {
                println!("  {}({})", call.name, serde_json::Value::Object(call.args.clone()));
            }
        }
        DispatchOutcome::ExecutedCalls(results) => {
            println!("Stopped after {} rounds with executed calls:", run.rounds);
            for result in results {
                match &result.outcome {
                    Ok(value) => println!("  {} -> {}", result.call.name, value),
                    Err(err) => println!("  {} failed: {}", result.call.name, err),
                }
            }
        }
        DispatchOutcome::ProtocolViolation { text } => {
            bail!(
                "model answered without calling a tool under forced policy: {}",
                text.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}

async fn cmd_documents(args: &[String]) -> anyhow::Result<()> {
    let prompt = flag_value(args, "--prompt").unwrap_or_else(|| "Summarize this document.".into());
    let sources: Vec<DocumentSource> = positional(args)
        .into_iter()
        .map(|s| parse_source(&s))
        .collect::<anyhow::Result<_>>()?;
    if sources.is_empty() {
        bail!("missing document source");
    }

    let client = GenAiClient::from_env()?;
    let response = client.generate_with_documents(&sources, prompt).await?;
    println!("{}", response.text.unwrap_or_default());
    Ok(())
}

fn parse_source(raw: &str) -> anyhow::Result<DocumentSource> {
    if let Some(file_id) = raw.strip_prefix("drive:") {
        let token = std::env::var("GOOGLE_DRIVE_TOKEN")
            .context("GOOGLE_DRIVE_TOKEN is required for drive:<file-id> sources")?;
        return Ok(DocumentSource::drive_export(file_id, token));
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Ok(DocumentSource::url(raw));
    }
    Ok(DocumentSource::path(raw))
}

fn set_light_values() -> ToolDefinition {
    ToolDefinition::from_fn("set_light_values", |args| {
        tracing::info!(?args, "set_light_values");
        Ok::<_, BoxError>(json!({
            "brightness": args["brightness"],
            "colorTemperature": args["color_temp"],
        }))
    })
    .with_description("Set the brightness and color temperature of a room light.")
    .with_param(
        ParameterSpec::integer("brightness")
            .description("Light level from 0 to 100. Zero is off and 100 is full brightness")
            .range(0.0, 100.0),
    )
    .with_param(
        ParameterSpec::string("color_temp")
            .description("Color temperature of the light fixture")
            .one_of(["daylight", "cool", "warm"]),
    )
}

fn get_weather() -> ToolDefinition {
    let http = reqwest::Client::new();
    ToolDefinition::from_async_fn("get_weather", move |args| {
        let http = http.clone();
        async move {
            let latitude = args["latitude"].as_f64().ok_or("latitude is not a number")?;
            let longitude = args["longitude"].as_f64().ok_or("longitude is not a number")?;
            let body: serde_json::Value = http
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
    .with_description("Get current weather data (temperature in Celsius, wind speed in km/h) for a location.")
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
