//! Tool-specific error types.

use thiserror::Error;

use crate::core::rpc::{INTERNAL_ERROR, INVALID_PARAMS};

/// Protocol-level errors raised while routing a tool call.
///
/// A tool that runs and fails does not produce one of these; it returns a
/// `ToolResult` with `is_error` set instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool is registered but no handler is bound to it.
    #[error("Tool has no handler: {0}")]
    NoHandler(String),

    /// The call parameters could not be decoded.
    #[error("Invalid params")]
    InvalidParams,
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "no handler" error.
    pub fn no_handler(name: impl Into<String>) -> Self {
        Self::NoHandler(name.into())
    }

    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::UnknownTool(_) | Self::InvalidParams => INVALID_PARAMS,
            Self::NoHandler(_) => INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolError::unknown_tool("x").code(), -32602);
        assert_eq!(ToolError::InvalidParams.code(), -32602);
        assert_eq!(ToolError::no_handler("x").code(), -32603);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ToolError::unknown_tool("nope").to_string(), "Unknown tool: nope");
        assert_eq!(
            ToolError::no_handler("bare").to_string(),
            "Tool has no handler: bare"
        );
    }
}
