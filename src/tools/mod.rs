//! Tool registry and function-call dispatcher.
//!
//! Local functions are declared as [`ToolDefinition`]s (explicit parameter
//! schema plus a [`ToolHandler`]), collected in a [`ToolRegistry`], and served
//! to the model through a [`Dispatcher`] under a [`CallPolicy`].
//!
//! ```rust
//! use genai_tools::tools::{CallPolicy, DispatchOutcome, Dispatcher, ParameterSpec, ToolDefinition, ToolRegistry};
//! use genai_tools::types::{FunctionCall, ModelResponse};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let mut registry = ToolRegistry::new();
//! registry.register(
//!     ToolDefinition::from_fn("set_light_values", |args| {
//!         Ok(json!({"brightness": args["brightness"], "colorTemperature": args["color_temp"]}))
//!     })
//!     .with_param(ParameterSpec::integer("brightness").range(0.0, 100.0))
//!     .with_param(ParameterSpec::string("color_temp").one_of(["daylight", "cool", "warm"])),
//! )?;
//!
//! let response = ModelResponse::from_calls(vec![FunctionCall::from_json(
//!     "set_light_values",
//!     json!({"brightness": 20, "color_temp": "warm"}),
//! )]);
//!
//! let outcome = Dispatcher::new(&registry)
//!     .handle_response(&response, CallPolicy::Automatic)
//!     .await;
//! if let DispatchOutcome::ExecutedCalls(results) = outcome {
//!     assert_eq!(results[0].value(), Some(&json!({"brightness": 20, "colorTemperature": "warm"})));
//! }
//! # Ok::<(), genai_tools::tools::ToolError>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod definition;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod validator;

pub use config::{ToolConfig, DEFAULT_MAX_REMOTE_CALLS};
pub use definition::{ParamType, ParameterSpec, ToolDefinition, ToolHandler};
pub use dispatcher::{CallPolicy, DispatchOutcome, Dispatcher, DispatcherConfig, FunctionCallResult};
pub use error::{ArgumentError, BoxError, ToolError};
pub use registry::ToolRegistry;
pub use validator::ArgumentValidator;
