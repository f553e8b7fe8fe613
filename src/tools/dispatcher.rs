//! Function-call dispatcher.
//!
//! Turns a [`ModelResponse`] into a [`DispatchOutcome`] under a [`CallPolicy`]:
//!
//! | Response | Policy | Outcome |
//! |----------|--------|---------|
//! | no calls | Automatic / Manual | `Text` |
//! | no calls | Forced | `ProtocolViolation` |
//! | calls | Manual | `PendingCalls` (nothing executed) |
//! | calls | Automatic / Forced | `ExecutedCalls` (one result per call, in order) |
//!
//! Which tools the model picks, and how many, is the model's decision. The
//! dispatcher never reorders, deduplicates or ranks calls, and never retries a
//! failed execution.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use super::validator::ArgumentValidator;
use crate::types::{Content, FunctionCall, FunctionCallingMode, FunctionResponse, ModelResponse};

/// How function-call requests in a response are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallPolicy {
    /// Execute requested calls locally.
    #[default]
    Automatic,
    /// Surface requested calls without executing them.
    Manual,
    /// Require at least one call, then execute like `Automatic`.
    Forced,
}

impl CallPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallPolicy::Automatic => "automatic",
            CallPolicy::Manual => "manual",
            CallPolicy::Forced => "forced",
        }
    }

    /// Mode to request from the model for this policy.
    pub fn calling_mode(&self) -> FunctionCallingMode {
        match self {
            CallPolicy::Automatic | CallPolicy::Manual => FunctionCallingMode::Auto,
            CallPolicy::Forced => FunctionCallingMode::Any,
        }
    }

    pub fn executes_calls(&self) -> bool {
        !matches!(self, CallPolicy::Manual)
    }
}

impl std::fmt::Display for CallPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "automatic" | "auto" => Ok(CallPolicy::Automatic),
            "manual" => Ok(CallPolicy::Manual),
            "forced" | "any" => Ok(CallPolicy::Forced),
            _ => Err(format!("Unknown call policy: {}", s)),
        }
    }
}

/// The answer to one function call.
#[derive(Debug, Clone)]
pub struct FunctionCallResult {
    pub call: FunctionCall,
    pub outcome: Result<Value, ToolError>,
}

impl FunctionCallResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn value(&self) -> Option<&Value> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.outcome.as_ref().err()
    }

    /// Wire form: `{"result": value}` on success, `{"error": {...}}` on failure.
    pub fn to_function_response(&self) -> FunctionResponse {
        let response = match &self.outcome {
            Ok(value) => json!({ "result": value }),
            Err(e) => json!({ "error": { "kind": e.kind(), "message": e.to_string() } }),
        };
        FunctionResponse {
            id: self.call.id.clone(),
            name: self.call.name.clone(),
            response,
        }
    }
}

/// Result of handling one model response.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// The model answered with text only.
    Text(String),
    /// Calls requested under `Manual`; the caller decides what to run.
    PendingCalls(Vec<FunctionCall>),
    /// Calls executed, results in request order.
    ExecutedCalls(Vec<FunctionCallResult>),
    /// `Forced` policy but the model issued no call.
    ProtocolViolation { text: Option<String> },
}

impl DispatchOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Text(t) => Some(t),
            DispatchOutcome::ProtocolViolation { text } => text.as_deref(),
            _ => None,
        }
    }

    /// User turn carrying the function responses, for `ExecutedCalls` only.
    pub fn response_content(&self) -> Option<Content> {
        match self {
            DispatchOutcome::ExecutedCalls(results) => Some(Content::function_responses(
                results.iter().map(|r| r.to_function_response()).collect(),
            )),
            _ => None,
        }
    }
}

/// Execution settings for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Upper bound for a single tool execution.
    pub tool_timeout: Duration,
    /// Run the calls of one response concurrently (results keep request order).
    pub concurrent: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            tool_timeout: Duration::from_secs(30),
            concurrent: false,
        }
    }
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `GENAI_TOOL_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(secs) = std::env::var("GENAI_TOOL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            cfg.tool_timeout = Duration::from_secs(secs.max(1));
        }
        cfg
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn concurrent(mut self, enable: bool) -> Self {
        self.concurrent = enable;
        self
    }
}

/// Mediates between a model response and the registered tools.
pub struct Dispatcher<'a> {
    registry: &'a ToolRegistry,
    config: DispatcherConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a ToolRegistry) -> Self {
        Self {
            registry,
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_config(registry: &'a ToolRegistry, config: DispatcherConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.registry
    }

    pub async fn handle_response(
        &self,
        response: &ModelResponse,
        policy: CallPolicy,
    ) -> DispatchOutcome {
        if !response.has_function_calls() {
            if policy == CallPolicy::Forced {
                warn!(
                    text = response.text.as_deref().unwrap_or(""),
                    "forced call policy but the model issued no function call"
                );
                return DispatchOutcome::ProtocolViolation {
                    text: response.text.clone(),
                };
            }
            return DispatchOutcome::Text(response.text.clone().unwrap_or_default());
        }

        if !policy.executes_calls() {
            return DispatchOutcome::PendingCalls(response.function_calls.clone());
        }

        DispatchOutcome::ExecutedCalls(self.execute_all(&response.function_calls).await)
    }

    /// Execute calls, one result per call in the given order.
    pub async fn execute_all(&self, calls: &[FunctionCall]) -> Vec<FunctionCallResult> {
        if self.config.concurrent {
            join_all(calls.iter().map(|c| self.execute(c))).await
        } else {
            let mut results = Vec::with_capacity(calls.len());
            for call in calls {
                results.push(self.execute(call).await);
            }
            results
        }
    }

    /// Look up, validate and run a single call.
    pub async fn execute(&self, call: &FunctionCall) -> FunctionCallResult {
        let outcome = self.run(call).await;
        if let Err(e) = &outcome {
            warn!(tool = %call.name, kind = e.kind(), error = %e, "function call failed");
        }
        FunctionCallResult {
            call: call.clone(),
            outcome,
        }
    }

    async fn run(&self, call: &FunctionCall) -> Result<Value, ToolError> {
        let tool = self
            .registry
            .get(&call.name)
            .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;

        let args = ArgumentValidator::new(tool.parameters())
            .validate(&call.args)
            .map_err(|errors| ToolError::ArgumentValidation {
                name: call.name.clone(),
                errors,
            })?;

        let start = Instant::now();
        let value = match tokio::time::timeout(self.config.tool_timeout, tool.handler().call(args))
            .await
        {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => return Err(ToolError::execution(&call.name, e)),
            Err(_) => return Err(ToolError::timeout(&call.name, self.config.tool_timeout)),
        };
        info!(
            tool = %call.name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "executed function call"
        );

        if let Some(expected) = tool.returns() {
            if !expected.matches(&value) {
                return Err(ToolError::ToolExecution {
                    name: call.name.clone(),
                    message: format!("returned a value that is not of type '{}'", expected),
                    timed_out: false,
                    source: None,
                });
            }
        }
        Ok(value)
    }
}
