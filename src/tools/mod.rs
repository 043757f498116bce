//! Tools Module
//!
//! The fixed set of tools served over MCP. Each tool lives in its own module
//! and exports a `register` function that adds it to the registry during
//! server initialization. The registry is read-only once built.

pub mod calc;
pub mod calculator;
pub mod get_info;
pub mod greeter;

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::core::error::ServerError;
use crate::core::utils::ServerConfig;

/// Tool definition as listed by `tools/list`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct McpTool {
    /// Unique tool identifier (e.g. "calculator")
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// Parameter name to human-readable description
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Failure raised by a tool handler.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    InvalidExpression(#[from] calc::ExpressionError),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
}

/// Tool handler: takes the call arguments and returns the tool's content object.
pub type ToolHandler = Box<dyn Fn(&Value) -> Result<Value, ToolError> + Send + Sync>;

/// Registry of available tools.
///
/// `tools` keeps registration order for listing, `handlers` maps names to
/// handlers for execution.
pub struct ToolRegistry {
    tools: Vec<McpTool>,
    handlers: HashMap<String, ToolHandler>,
}

impl ToolRegistry {
    /// Create an empty registry. Use [`initialize_tools`] for the served set.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    /// Add a tool and its handler.
    pub fn register(&mut self, tool: McpTool, handler: ToolHandler) {
        let name = tool.name.clone();
        self.tools.push(tool);
        self.handlers.insert(name, handler);
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[McpTool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&McpTool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Run the named tool with `arguments`.
    pub fn call(&self, name: &str, arguments: &Value) -> Result<Value, ServerError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ServerError::ToolNotFound(name.to_string()))?;
        let handler = self.handlers.get(&tool.name).ok_or_else(|| {
            ServerError::Internal(format!("no handler registered for tool {name}"))
        })?;
        Ok(handler(arguments)?)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the registry with every served tool, in listing order.
pub fn initialize_tools(config: &ServerConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    calculator::register(&mut registry);
    greeter::register(&mut registry);
    get_info::register(&mut registry, config);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        initialize_tools(&ServerConfig::load())
    }

    #[test]
    fn lists_tools_in_fixed_order() {
        let registry = registry();
        let names: Vec<&str> = registry.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["calculator", "greeter", "get_info"]);
    }

    #[test]
    fn listed_tool_serializes_with_camel_case_schema() {
        let registry = registry();
        let value = serde_json::to_value(&registry.list()[0]).unwrap();
        assert_eq!(value["name"], "calculator");
        assert!(value["inputSchema"]["expression"].is_string());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn get_finds_registered_tools_only() {
        let registry = registry();
        assert_eq!(registry.get("greeter").map(|t| t.name.as_str()), Some("greeter"));
        assert!(registry.get("frobnicate").is_none());
    }

    #[test]
    fn call_unknown_tool_is_not_found() {
        let err = registry().call("frobnicate", &json!({})).unwrap_err();
        assert!(matches!(err, ServerError::ToolNotFound(name) if name == "frobnicate"));
    }

    #[test]
    fn call_routes_to_handler() {
        let content = registry()
            .call("calculator", &json!({"expression": "6 * 7"}))
            .unwrap();
        assert_eq!(content["result"].as_f64(), Some(42.0));
    }

    #[test]
    fn handler_failure_becomes_tool_failed() {
        let err = registry().call("calculator", &json!({})).unwrap_err();
        assert!(matches!(err, ServerError::ToolFailed(ToolError::MissingArgument("expression"))));
    }
}
