//! Server Configuration and Shared Constants
//!
//! The server identity comes from compile-time package metadata. The protocol
//! surface does not read environment variables; only the log filter
//! (`RUST_LOG`) is taken from the environment, in `main`.

/// MCP protocol revision announced in the handshake and `initialize` result.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC envelope version tag.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC "internal error" code, used for every error response.
pub const INTERNAL_ERROR: i32 = -32603;

/// Minimum supported Rust version declared in the manifest, reported by `get_info`.
pub const MIN_RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

/// Server identity reported in the handshake, `initialize` and `get_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server name as reported in `serverInfo` and `clientInfo`
    pub name: String,
    /// Server version string
    pub version: String,
    /// Human-readable description, reported by `get_info`
    pub description: String,
}

impl ServerConfig {
    /// Build the configuration from the package metadata baked in at compile time.
    pub fn load() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::load()
    }
}

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
