//! Tool configuration handed to the client for one function-calling request.

use super::dispatcher::{CallPolicy, Dispatcher, DispatcherConfig};
use super::registry::ToolRegistry;
use crate::types::{FunctionCallingMode, FunctionDeclaration};

/// Default bound on model round trips in the automatic calling loop.
pub const DEFAULT_MAX_REMOTE_CALLS: usize = 10;

/// `{policy, tools}` plus loop and execution settings.
#[derive(Debug)]
pub struct ToolConfig {
    pub policy: CallPolicy,
    pub tools: ToolRegistry,
    /// Maximum requests sent to the model while answering function calls.
    pub max_remote_calls: usize,
    pub dispatcher: DispatcherConfig,
}

impl ToolConfig {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            policy: CallPolicy::default(),
            tools,
            max_remote_calls: DEFAULT_MAX_REMOTE_CALLS,
            dispatcher: DispatcherConfig::from_env(),
        }
    }

    pub fn policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_remote_calls(mut self, n: usize) -> Self {
        self.max_remote_calls = n.max(1);
        self
    }

    pub fn dispatcher_config(mut self, config: DispatcherConfig) -> Self {
        self.dispatcher = config;
        self
    }

    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::with_config(&self.tools, self.dispatcher.clone())
    }

    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.tools.build_schema_payload()
    }

    pub fn calling_mode(&self) -> FunctionCallingMode {
        self.policy.calling_mode()
    }
}
