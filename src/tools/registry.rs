//! Tool registry: ordered, name-keyed collection of tool definitions.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::definition::ToolDefinition;
use super::error::ToolError;
use crate::types::FunctionDeclaration;

/// Function names Gemini accepts: letter or underscore first, at most 64 chars.
const TOOL_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_.\-]{0,63}$";

fn tool_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOOL_NAME_PATTERN).expect("tool name pattern compiles"))
}

/// Ordered set of tools keyed by name.
///
/// Built once per session; the dispatcher only borrows it immutably, so tools
/// cannot be added while a request is being handled.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. The registry is left unchanged on error.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), ToolError> {
        if self.index.contains_key(&definition.name) {
            return Err(ToolError::DuplicateTool(definition.name));
        }
        Self::check_definition(&definition)?;

        tracing::debug!(tool = %definition.name, "registered tool");
        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(definition);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_tool(mut self, definition: ToolDefinition) -> Result<Self, ToolError> {
        self.register(definition)?;
        Ok(self)
    }

    fn check_definition(definition: &ToolDefinition) -> Result<(), ToolError> {
        let invalid = |message: String| ToolError::InvalidDefinition {
            name: definition.name.clone(),
            message,
        };

        if definition.name.is_empty() {
            return Err(invalid("tool name must not be empty".into()));
        }
        if !tool_name_regex().is_match(&definition.name) {
            return Err(invalid(format!(
                "tool name must match {}",
                TOOL_NAME_PATTERN
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for p in &definition.parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(invalid(format!("parameter '{}' declared twice", p.name)));
            }
            if let (Some(min), Some(max)) = (p.minimum, p.maximum) {
                if min > max {
                    return Err(invalid(format!(
                        "parameter '{}' has minimum {} above maximum {}",
                        p.name, min, max
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    /// Declarations sent to the model, in registration order.
    pub fn build_schema_payload(&self) -> Vec<FunctionDeclaration> {
        self.tools.iter().map(|t| t.declaration()).collect()
    }
}
