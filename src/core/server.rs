//! MCP Server Implementation
//!
//! Request dispatch for the MCP protocol methods and the STDIO session loop.
//! The session is strictly sequential: one line is read, handled and
//! answered before the next one is read. All logging goes to stderr so it
//! never interferes with the JSON-RPC stream on stdout.

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader, BufWriter};

use crate::core::error::ServerError;
use crate::core::protocol::{self, McpMessage, McpRequest, McpResponse};
use crate::core::utils::{PROTOCOL_VERSION, ServerConfig};
use crate::tools::{self, ToolRegistry};

/// Protocol methods understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
}

impl Method {
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "initialize" => Some(Method::Initialize),
            "tools/list" => Some(Method::ToolsList),
            "tools/call" => Some(Method::ToolsCall),
            _ => None,
        }
    }
}

/// Read-only state shared by every request of a session.
pub struct Server {
    config: ServerConfig,
    registry: ToolRegistry,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        let registry = tools::initialize_tools(&config);
        Self { config, registry }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Route a decoded request to its handler and build the result value.
    pub fn dispatch(&self, req: &McpRequest) -> Result<Value, ServerError> {
        let method = Method::parse(&req.method)
            .ok_or_else(|| ServerError::MethodNotSupported(req.method.clone()))?;

        match method {
            Method::Initialize => Ok(self.handle_initialize()),
            Method::ToolsList => Ok(self.handle_tools_list()),
            Method::ToolsCall => self.handle_tools_call(req.params.as_ref()),
        }
    }

    /// Handle one request and always produce a response.
    pub fn handle_request(&self, req: &McpRequest) -> McpResponse {
        tracing::debug!(method = %req.method, id = ?req.id, "handling request");
        match self.dispatch(req) {
            Ok(result) => McpResponse::success(req.id.clone(), result),
            Err(e) => {
                tracing::warn!(method = %req.method, error = %e, "request failed");
                McpResponse::failure(req.id.clone(), e.to_rpc_error())
            }
        }
    }

    /// Decode and handle one raw input line.
    ///
    /// Lines that cannot be decoded are answered with an id-less error.
    pub fn handle_line(&self, line: &str) -> McpResponse {
        match protocol::decode(line) {
            Ok(req) => self.handle_request(&req),
            Err(e) => {
                tracing::warn!(error = %e, "could not decode request line");
                McpResponse::failure(None, e.to_rpc_error())
            }
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": protocol::capabilities(),
            "serverInfo": {
                "name": self.config.name,
                "version": self.config.version
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        json!({ "tools": self.registry.list() })
    }

    fn handle_tools_call(&self, params: Option<&Value>) -> Result<Value, ServerError> {
        let params = params
            .ok_or_else(|| ServerError::MalformedMessage("tools/call requires params".to_string()))?;

        let tool_name = params.get("name").and_then(|v| v.as_str()).ok_or_else(|| {
            ServerError::MalformedMessage("tools/call requires params.name".to_string())
        })?;

        // Missing arguments behave like an empty object.
        let empty = json!({});
        let arguments = params.get("arguments").unwrap_or(&empty);

        let content = self.registry.call(tool_name, arguments)?;
        Ok(json!({ "content": content }))
    }
}

/// Drive one session over arbitrary async streams.
///
/// Writes the handshake, then answers every non-blank input line with exactly
/// one output line until end-of-stream. Only I/O failures end the session
/// early.
pub async fn run_session<R, W>(
    server: &Server,
    mut reader: R,
    writer: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    protocol::write_message(writer, &McpMessage::handshake(server.config())).await?;

    // Lines are read as raw bytes; invalid UTF-8 is replaced rather than
    // failing the stream, so the line still gets its own error response.
    let mut buf = Vec::with_capacity(8192);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        let response = server.handle_line(line);
        protocol::write_message(writer, &response).await?;
    }

    tracing::info!("input closed, shutting down");
    Ok(())
}

/// Run the MCP server over the process's standard input and output.
pub async fn run_server_stdio(config: ServerConfig) -> std::io::Result<()> {
    tracing::info!(name = %config.name, version = %config.version, "MCP server starting (STDIO mode)");

    let server = Server::new(config);
    for tool in server.registry().list() {
        tracing::info!(tool = %tool.name, "{}", tool.description);
    }

    let stdin = BufReader::with_capacity(8192, tokio::io::stdin());
    let mut stdout = BufWriter::with_capacity(8192, tokio::io::stdout());

    run_session(&server, stdin, &mut stdout).await
}
