//! Tool definitions: declared parameter schema plus the local handler.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::error::BoxError;
use crate::types::FunctionDeclaration;

/// Semantic type of a parameter or return value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<ParamType>),
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array(_) => "array",
            ParamType::Object => "object",
        }
    }

    pub fn to_schema(&self) -> Value {
        match self {
            ParamType::Array(items) => json!({"type": "array", "items": items.to_schema()}),
            other => json!({"type": other.as_str()}),
        }
    }

    /// Structural check, used for tool return values.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Object => value.is_object(),
            ParamType::Array(items) => value
                .as_array()
                .map(|arr| arr.iter().all(|v| items.matches(v)))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Array(items) => write!(f, "array<{}>", items),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub param_type: ParamType,
    pub description: Option<String>,
    pub required: bool,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub allowed_values: Option<Vec<Value>>,
}

impl ParameterSpec {
    /// A required parameter without constraints.
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            required: true,
            minimum: None,
            maximum: None,
            allowed_values: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Integer)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Boolean)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Inclusive numeric range.
    pub fn range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn to_schema(&self) -> Value {
        let mut schema = self.param_type.to_schema();
        if let Some(desc) = &self.description {
            schema["description"] = json!(desc);
        }
        if let Some(min) = self.minimum {
            schema["minimum"] = json!(min);
        }
        if let Some(max) = self.maximum {
            schema["maximum"] = json!(max);
        }
        if let Some(values) = &self.allowed_values {
            if self.param_type == ParamType::String {
                schema["format"] = json!("enum");
            }
            schema["enum"] = json!(values);
        }
        schema
    }
}

/// Local implementation behind a tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with validated arguments.
    async fn call(&self, args: Map<String, Value>) -> Result<Value, BoxError>;
}

/// Synchronous closures run on the blocking pool so the dispatcher's timeout
/// can still fire while they are busy.
struct FnHandler<F>(Arc<F>);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(Map<String, Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    async fn call(&self, args: Map<String, Value>) -> Result<Value, BoxError> {
        let f = Arc::clone(&self.0);
        tokio::task::spawn_blocking(move || f(args)).await?
    }
}

struct AsyncFnHandler<F>(F);

#[async_trait]
impl<F, Fut> ToolHandler for AsyncFnHandler<F>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    async fn call(&self, args: Map<String, Value>) -> Result<Value, BoxError> {
        (self.0)(args).await
    }
}

/// A callable tool: name, declared schema and the handler that owns the behavior.
///
/// ```rust
/// use genai_tools::tools::{ParameterSpec, ToolDefinition};
/// use serde_json::json;
///
/// let tool = ToolDefinition::from_fn("set_light_values", |args| {
///     Ok(json!({
///         "brightness": args["brightness"],
///         "colorTemperature": args["color_temp"],
///     }))
/// })
/// .with_description("Set the brightness and color temperature of a room light.")
/// .with_param(ParameterSpec::integer("brightness").range(0.0, 100.0))
/// .with_param(ParameterSpec::string("color_temp").one_of(["daylight", "cool", "warm"]));
///
/// assert_eq!(tool.declaration().name, "set_light_values");
/// ```
pub struct ToolDefinition {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) parameters: Vec<ParameterSpec>,
    pub(crate) returns: Option<ParamType>,
    pub(crate) handler: Box<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, handler: impl ToolHandler + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            returns: None,
            handler: Box::new(handler),
        }
    }

    /// Wrap a synchronous closure. It runs on tokio's blocking pool, so it may
    /// block without stalling other calls.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Map<String, Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::new(name, FnHandler(Arc::new(f)))
    }

    /// Wrap an async closure (e.g. one that performs HTTP I/O).
    pub fn from_async_fn<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Map<String, Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        Self::new(name, AsyncFnHandler(f))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_param(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_returns(mut self, returns: ParamType) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn returns(&self) -> Option<&ParamType> {
        self.returns.as_ref()
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }

    /// Object schema of the parameters, properties in declaration order.
    pub fn parameters_schema(&self) -> Option<Value> {
        if self.parameters.is_empty() {
            return None;
        }
        let mut properties = Map::new();
        for p in &self.parameters {
            properties.insert(p.name.clone(), p.to_schema());
        }
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = json!({"type": "object", "properties": properties});
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        Some(schema)
    }

    pub fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters_schema(),
        }
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_tool() -> ToolDefinition {
        ToolDefinition::from_fn("set_light_values", |args| Ok(Value::Object(args)))
            .with_description("Set the brightness and color temperature of a room light.")
            .with_param(
                ParameterSpec::integer("brightness")
                    .description("Light level from 0 to 100")
                    .range(0.0, 100.0),
            )
            .with_param(
                ParameterSpec::string("color_temp").one_of(["daylight", "cool", "warm"]),
            )
    }

    #[test]
    fn test_parameters_schema_keeps_declaration_order() {
        let schema = light_tool().parameters_schema().unwrap();
        let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["brightness", "color_temp"]);
        assert_eq!(schema["required"], json!(["brightness", "color_temp"]));
        assert_eq!(schema["properties"]["brightness"]["maximum"], json!(100.0));
        assert_eq!(schema["properties"]["color_temp"]["format"], "enum");
    }

    #[test]
    fn test_optional_params_not_required() {
        let tool = ToolDefinition::from_fn("search", |_| Ok(Value::Null))
            .with_param(ParameterSpec::string("query"))
            .with_param(ParameterSpec::integer("max_results").optional());
        let schema = tool.parameters_schema().unwrap();
        assert_eq!(schema["required"], json!(["query"]));
    }

    #[test]
    fn test_parameterless_tool_has_no_schema() {
        let tool = ToolDefinition::from_fn("list_rooms", |_| Ok(json!([])));
        assert!(tool.declaration().parameters.is_none());
    }

    #[test]
    fn test_param_type_matches() {
        let t = ParamType::Array(Box::new(ParamType::Integer));
        assert!(t.matches(&json!([1, 2, 3])));
        assert!(!t.matches(&json!([1, "2"])));
        assert!(ParamType::Number.matches(&json!(1)));
        assert!(!ParamType::Integer.matches(&json!(1.5)));
        assert_eq!(t.to_string(), "array<integer>");
    }

    #[tokio::test]
    async fn test_sync_handler_runs_off_runtime() {
        let tool = ToolDefinition::from_fn("echo", |args| Ok(Value::Object(args)));
        let mut args = Map::new();
        args.insert("x".into(), json!(1));
        assert_eq!(tool.handler().call(args).await.unwrap(), json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_sync_handler_panic_is_error() {
        let tool = ToolDefinition::from_fn("boom", |_| panic!("boom"));
        assert!(tool.handler().call(Map::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_async_handler_runs() {
        let tool = ToolDefinition::from_async_fn("echo", |args| async move {
            Ok::<_, BoxError>(Value::Object(args))
        });
        let mut args = Map::new();
        args.insert("x".into(), json!(1));
        let out = tool.handler().call(args).await.unwrap();
        assert_eq!(out, json!({"x": 1}));
    }
}
