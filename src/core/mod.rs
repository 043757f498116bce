//! Core Server Framework Module
//!
//! - protocol.rs: JSON-RPC message structures and the line codec
//! - error.rs: error taxonomy and its mapping onto JSON-RPC errors
//! - server.rs: request dispatch and the STDIO session loop
//! - utils.rs: server configuration and shared constants

pub mod error;
pub mod protocol;
pub mod server;
pub mod utils;
