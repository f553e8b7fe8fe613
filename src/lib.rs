//! # genai-tools
//!
//! Gemini client with a typed tool registry and function-call dispatcher.
//!
//! ## Overview
//!
//! Tools are registered with a declared parameter schema and a handler. The
//! registry renders those schemas as `functionDeclarations`; the dispatcher
//! takes a model response and, depending on the [`CallPolicy`], either
//! returns the text, hands the calls back to the caller, or validates and
//! executes every call and reports one result per call in request order.
//!
//! Around that core:
//!
//! - **Client**: [`GenAiClient`] sends `generateContent` requests and runs the
//!   automatic function-calling loop
//! - **Structured output**: JSON responses constrained by a schema derived
//!   from a Rust type via [`structured`]
//! - **Documents**: PDFs and other files from URLs, paths or Drive exports via
//!   [`documents`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use genai_tools::tools::{BoxError, ParameterSpec, ToolConfig, ToolDefinition, ToolRegistry};
//! use genai_tools::{CallPolicy, Content, GenAiClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> genai_tools::Result<()> {
//!     let set_light = ToolDefinition::from_fn("set_light_values", |args| {
//!         Ok::<_, BoxError>(json!({
//!             "brightness": args["brightness"],
//!             "colorTemperature": args["color_temp"],
//!         }))
//!     })
//!     .with_description("Set the brightness and color temperature of a room light.")
//!     .with_param(ParameterSpec::integer("brightness").range(0.0, 100.0))
//!     .with_param(ParameterSpec::string("color_temp").one_of(["daylight", "cool", "warm"]));
//!
//!     let registry = ToolRegistry::new().with_tool(set_light)?;
//!     let config = ToolConfig::new(registry).policy(CallPolicy::Automatic);
//!
//!     let client = GenAiClient::from_env()?;
//!     let run = client
//!         .generate_with_tools(vec![Content::user("Turn the lights down to a romantic level")], &config)
//!         .await?;
//!     println!("{}", run.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tools`] | Tool definitions, registry, argument validation, dispatcher |
//! | [`client`] | Gemini client and function-calling loop |
//! | [`drivers`] | `generateContent` request/response translation |
//! | [`types`] | Wire types (contents, parts, function calls) |
//! | [`structured`] | Schema-constrained JSON output |
//! | [`documents`] | Document loading for inline data |
//! | [`config`] | API key and endpoint configuration |
//! | [`transport`] | HTTP transport |

pub mod client;
pub mod config;
pub mod documents;
pub mod drivers;
pub mod structured;
pub mod tools;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{ContentGenerator, GenAiClient, GenAiClientBuilder, ToolRun};
pub use config::ClientConfig;
pub use documents::{Document, DocumentSource};
pub use tools::{
    CallPolicy, DispatchOutcome, FunctionCallResult, ToolConfig, ToolDefinition, ToolError,
    ToolRegistry,
};
pub use types::{Content, FunctionCall, ModelResponse, Part, Role};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
