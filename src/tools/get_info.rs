//! Server Info Tool
//!
//! Reports the server identity, the minimum Rust version it supports, the current
//! time and the names of the served tools. Takes no arguments.

use serde_json::{Value, json};

use super::{McpTool, ToolError, ToolHandler, ToolRegistry, calculator, greeter};
use crate::core::utils::{self, MIN_RUST_VERSION, ServerConfig};

pub const NAME: &str = "get_info";

pub fn register(registry: &mut ToolRegistry, config: &ServerConfig) {
    let tool = McpTool {
        name: NAME.to_string(),
        description: "Returns information about this MCP server".to_string(),
        input_schema: json!({}),
    };

    let config = config.clone();
    let handler: ToolHandler = Box::new(move |_args: &Value| -> Result<Value, ToolError> {
        Ok(server_info(&config))
    });
    registry.register(tool, handler);
}

fn server_info(config: &ServerConfig) -> Value {
    json!({
        "name": config.name,
        "version": config.version,
        "description": config.description,
        "min_rust_version": MIN_RUST_VERSION,
        "timestamp": utils::now_millis(),
        "available_tools": [calculator::NAME, greeter::NAME, NAME]
    })
}
