//! Calculator Tool
//!
//! Evaluates a single binary arithmetic expression such as `2 + 3`.

use serde_json::{Value, json};

use super::calc;
use super::{McpTool, ToolError, ToolHandler, ToolRegistry};

pub const NAME: &str = "calculator";

pub fn register(registry: &mut ToolRegistry) {
    let tool = McpTool {
        name: NAME.to_string(),
        description: "Simple calculator that evaluates basic math expressions".to_string(),
        input_schema: json!({
            "expression": "Math expression (e.g. 2 + 3)"
        }),
    };

    let handler: ToolHandler = Box::new(calculate);
    registry.register(tool, handler);
}

fn calculate(args: &Value) -> Result<Value, ToolError> {
    let expression = args
        .get("expression")
        .and_then(|v| v.as_str())
        .ok_or(ToolError::MissingArgument("expression"))?;

    let result = calc::evaluate(expression)?;
    tracing::debug!(expression, result, "calculated");

    Ok(json!({
        "expression": expression,
        "result": result,
        "message": "Calculation succeeded"
    }))
}
