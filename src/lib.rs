//! Fetch MCP Server Library
//!
//! A Model Context Protocol (MCP) server whose tools fetch web pages and
//! repository documentation and return them as Markdown.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, JSON-RPC envelopes, request
//!   dispatch and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool registry and tool definitions
//!   - **web**: two-strategy page fetching and Markdown extraction
//!   - **docs**: documentation download from git repositories
//!
//! # Example
//!
//! ```rust,no_run
//! use fetch_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
