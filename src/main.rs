//! MCP Server Entry Point
//!
//! Serves the calculator, greeter and get_info tools over newline-delimited
//! JSON-RPC on stdin/stdout. Logs go to stderr; verbosity is controlled with
//! `RUST_LOG` (default `info`).
//!
//! Exits with status 0 when stdin reaches end-of-stream and status 1 when the
//! standard streams fail.

mod core;
mod tools;

use tracing_subscriber::EnvFilter;

use crate::core::server;
use crate::core::utils::ServerConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the protocol, so logs must stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::load();

    if let Err(e) = server::run_server_stdio(config).await {
        tracing::error!(error = %e, "MCP server stopped on I/O failure");
        std::process::exit(1);
    }
}
