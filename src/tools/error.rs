//! Error types for tool registration and dispatch.

use std::sync::Arc;

/// Boxed error returned by tool handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A single argument that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{argument}: {message}")]
pub struct ArgumentError {
    /// Argument name, with `[i]` suffixes for array elements (e.g. "rooms[1]")
    pub argument: String,
    pub message: String,
}

impl ArgumentError {
    pub fn new(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while registering tools or answering function calls.
///
/// Everything except `DuplicateTool` and `InvalidDefinition` is reported per call
/// inside a [`FunctionCallResult`](crate::tools::FunctionCallResult).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("invalid definition for tool '{name}': {message}")]
    InvalidDefinition { name: String, message: String },

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for tool '{name}': {}", join_errors(.errors))]
    ArgumentValidation {
        name: String,
        errors: Vec<ArgumentError>,
    },

    #[error("tool '{name}' failed: {message}")]
    ToolExecution {
        name: String,
        message: String,
        timed_out: bool,
        #[source]
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },
}

fn join_errors(errors: &[ArgumentError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToolError {
    pub(crate) fn execution(name: &str, source: BoxError) -> Self {
        ToolError::ToolExecution {
            name: name.to_string(),
            message: source.to_string(),
            timed_out: false,
            source: Some(Arc::from(source)),
        }
    }

    pub(crate) fn timeout(name: &str, limit: std::time::Duration) -> Self {
        ToolError::ToolExecution {
            name: name.to_string(),
            message: format!("timed out after {} ms", limit.as_millis()),
            timed_out: true,
            source: None,
        }
    }

    /// Short machine-readable kind, used in function responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::DuplicateTool(_) => "duplicate_tool",
            ToolError::InvalidDefinition { .. } => "invalid_definition",
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::ArgumentValidation { .. } => "argument_validation",
            ToolError::ToolExecution { .. } => "tool_execution",
        }
    }
}
