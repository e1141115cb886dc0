//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the web extraction pipeline.
    #[error("Scrape error: {0}")]
    Scrape(#[from] crate::domains::web::ScrapeError),

    /// Error originating from the documentation downloader.
    #[error("Docs error: {0}")]
    Docs(#[from] crate::domains::docs::DocsError),

    /// Error raised by a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
