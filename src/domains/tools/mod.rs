//! Tools domain module.
//!
//! Tools are named, schema-described operations that MCP clients invoke with
//! `tools/call`.
//!
//! ## Architecture
//!
//! - `tool.rs` - Tool descriptors: spec, parameters, schema, handler
//! - `context.rs` - Per-call context with typed argument accessors and results
//! - `registry.rs` - Name-keyed registry and `tools/call` dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO transport)
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with `spec()`, `create()` and `execute()`
//! 2. Export it in the matching `definitions/*/mod.rs`
//! 3. Register it in `ToolRegistry::with_sources`
//!
//! Both transports pick it up from the registry.

pub mod context;
pub mod definitions;
mod error;
mod registry;
pub mod router;
pub mod tool;

pub use context::{Content, ToolContext, ToolResult};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use tool::{ParamKind, ParamSpec, Tool, ToolHandler, ToolSchema, ToolSpec};
