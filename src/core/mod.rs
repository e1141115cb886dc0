//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the JSON-RPC envelope, request
//! dispatch, and transport layer abstractions.

pub mod config;
pub mod error;
pub mod rpc;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
