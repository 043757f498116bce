//! Greeter Tool
//!
//! Greets a person by name. A missing or blank name falls back to
//! [`DEFAULT_NAME`]; the tool never fails.

use serde_json::{Value, json};

use super::{McpTool, ToolError, ToolHandler, ToolRegistry};
use crate::core::utils;

pub const NAME: &str = "greeter";

/// Name used when the caller gives none.
pub const DEFAULT_NAME: &str = "Visitor";

pub fn register(registry: &mut ToolRegistry) {
    let tool = McpTool {
        name: NAME.to_string(),
        description: "Personalized greeting".to_string(),
        input_schema: json!({
            "name": "Name of the person to greet"
        }),
    };

    let handler: ToolHandler = Box::new(greet);
    registry.register(tool, handler);
}

fn greet(args: &Value) -> Result<Value, ToolError> {
    let name = args
        .get("name")
        .and_then(|v| v.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_NAME);

    Ok(json!({
        "message": format!("Hello, {name}! Welcome to the server!"),
        "timestamp": utils::now_millis(),
        "greeted_name": name
    }))
}
