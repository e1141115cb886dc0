//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **HTTP**: JSON-RPC over POST requests (default) - feature: `http`
//! - **STDIO**: Standard input/output through rmcp - feature: `stdio`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server.
//!
//! # Feature Flags
//!
//! Transport implementations are conditionally compiled based on features:
//! - `http` (default): HTTP transport - adds axum, tower, tower-http
//! - `stdio` (default): STDIO transport - minimal dependencies

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
