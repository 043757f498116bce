//! Server Error Taxonomy
//!
//! Every failure that can happen while handling a request line is a
//! `ServerError`. The session loop turns each one into exactly one JSON-RPC
//! error line; none of them end the session.

use crate::core::protocol::McpError;
use crate::core::utils::INTERNAL_ERROR;
use crate::tools::ToolError;

/// Message used for failures that have no protocol-specific wording.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The input line is not a decodable request.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Unrecognized top-level method.
    #[error("Method not supported: {0}")]
    MethodNotSupported(String),

    /// Unrecognized tool name in a `tools/call`.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// A tool handler ran and failed.
    #[error("Error executing tool: {0}")]
    ToolFailed(#[from] ToolError),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Convert into the error object carried by the response envelope.
    ///
    /// Method, tool and tool-execution errors put their full text in
    /// `message`. Malformed and internal failures use the generic message and
    /// carry their text in `data`.
    pub fn to_rpc_error(&self) -> McpError {
        match self {
            ServerError::MethodNotSupported(_)
            | ServerError::ToolNotFound(_)
            | ServerError::ToolFailed(_) => McpError::new(INTERNAL_ERROR, self.to_string()),
            ServerError::MalformedMessage(_) | ServerError::Internal(_) => {
                McpError::new(INTERNAL_ERROR, GENERIC_ERROR_MESSAGE).with_data(self.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::calc::ExpressionError;

    #[test]
    fn method_error_keeps_method_name_in_message() {
        let err = ServerError::MethodNotSupported("unknown/thing".into()).to_rpc_error();
        assert_eq!(err.code, -32603);
        assert_eq!(err.message, "Method not supported: unknown/thing");
        assert!(err.data.is_none());
    }

    #[test]
    fn tool_failure_wraps_handler_message() {
        let err = ServerError::from(ToolError::from(ExpressionError::InvalidNumber("abc".into())))
            .to_rpc_error();
        assert_eq!(err.message, "Error executing tool: invalid number: 'abc'");
    }

    #[test]
    fn malformed_message_uses_generic_text_with_data() {
        let err = ServerError::MalformedMessage("expected value".into()).to_rpc_error();
        assert_eq!(err.message, GENERIC_ERROR_MESSAGE);
        assert_eq!(err.data.as_deref(), Some("malformed message: expected value"));
    }
}
