//! JSON-RPC Message Codec
//!
//! Request/response structures for the line-delimited MCP transport and the
//! helpers that decode one request from a line and write one message per
//! line. Every written message is followed by a flush so the peer sees it
//! immediately.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::core::error::ServerError;
use crate::core::utils::{JSONRPC_VERSION, PROTOCOL_VERSION, ServerConfig};

/// Incoming JSON-RPC request.
///
/// `id` is optional. When it is missing the response is written without one.
/// The `jsonrpc` version tag is not checked; unknown keys are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct McpRequest {
    /// Request ID, echoed back verbatim
    #[serde(default)]
    pub id: Option<Value>,
    /// MCP method name (e.g. "initialize", "tools/list", "tools/call")
    pub method: String,
    /// Method-specific parameters
    #[serde(default)]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC response. Carries either `result` or `error`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct McpResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Method-shaped message sent by the server, used for the startup handshake.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct McpMessage {
    jsonrpc: &'static str,
    pub method: &'static str,
    pub id: u64,
    pub params: Value,
}

impl McpMessage {
    /// The unsolicited `initialize` message announcing protocol version and
    /// capabilities before any request is read.
    pub fn handshake(config: &ServerConfig) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: "initialize",
            id: 1,
            params: serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": capabilities(),
                "clientInfo": {
                    "name": config.name,
                    "version": config.version
                }
            }),
        }
    }
}

/// Capability flags shared by the handshake and the `initialize` result.
pub fn capabilities() -> Value {
    serde_json::json!({
        "tools": true,
        "logging": true
    })
}

/// Decode one input line into a request.
pub fn decode(line: &str) -> Result<McpRequest, ServerError> {
    let request: McpRequest =
        serde_json::from_str(line).map_err(|e| ServerError::MalformedMessage(e.to_string()))?;
    if request.method.is_empty() {
        return Err(ServerError::MalformedMessage("empty method".to_string()));
    }
    Ok(request)
}

/// Encode a message as a single newline-terminated line.
pub fn encode<T: Serialize>(message: &T) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// Write one message as a line and flush it.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let line = encode(message).map_err(std::io::Error::other)?;
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_full_request() {
        let req = decode(
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"greeter","arguments":{"name":"Ada"}}}"#,
        )
        .unwrap();
        assert_eq!(req.id, Some(json!(2)));
        assert_eq!(req.method, "tools/call");
        assert_eq!(req.params.unwrap()["arguments"]["name"], "Ada");
    }

    #[test]
    fn decode_without_id_or_params() {
        let req = decode(r#"{"jsonrpc":"2.0","method":"tools/list"}"#).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.params, None);
    }

    #[test]
    fn decode_ignores_version_tag_and_unknown_keys() {
        let req = decode(r#"{"jsonrpc":"1.0","id":3,"method":"initialize","extra":true}"#).unwrap();
        assert_eq!(req.id, Some(json!(3)));
        assert_eq!(req.method, "initialize");

        let req = decode(r#"{"id":4,"method":"tools/list"}"#).unwrap();
        assert_eq!(req.method, "tools/list");
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(decode("not json"), Err(ServerError::MalformedMessage(_))));
        assert!(matches!(decode("[1,2,3]"), Err(ServerError::MalformedMessage(_))));
    }

    #[test]
    fn decode_rejects_missing_or_empty_method() {
        assert!(matches!(decode(r#"{"id":1}"#), Err(ServerError::MalformedMessage(_))));
        assert!(matches!(
            decode(r#"{"id":1,"method":""}"#),
            Err(ServerError::MalformedMessage(_))
        ));
    }

    #[test]
    fn success_has_no_error_field() {
        let line = encode(&McpResponse::success(Some(json!(7)), json!({"ok": true}))).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 7, "result": {"ok": true}}));
    }

    #[test]
    fn failure_without_id_matches_error_envelope() {
        let error = McpError::new(-32603, "Tool not found: frobnicate");
        let line = encode(&McpResponse::failure(None, error)).unwrap();

        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "error": {"code": -32603, "message": "Tool not found: frobnicate"}
            })
        );
    }

    #[test]
    fn multiline_strings_stay_on_one_line() {
        let error = McpError::new(-32603, "line one\nline two").with_data("a\nb");
        let line = encode(&McpResponse::failure(None, error)).unwrap();
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn handshake_shape() {
        let config = ServerConfig::load();
        let value = serde_json::to_value(McpMessage::handshake(&config)).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "initialize");
        assert_eq!(value["id"], 1);
        assert_eq!(value["params"]["protocolVersion"], "2024-11-05");
        assert_eq!(value["params"]["capabilities"], json!({"tools": true, "logging": true}));
        assert_eq!(value["params"]["clientInfo"]["name"], config.name.as_str());
    }

    #[tokio::test]
    async fn write_message_emits_one_line() {
        let mut out: Vec<u8> = Vec::new();
        write_message(&mut out, &McpResponse::success(Some(json!(1)), json!({})))
            .await
            .unwrap();
        write_message(&mut out, &McpResponse::success(Some(json!(2)), json!({})))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"id\":2"));
    }
}
