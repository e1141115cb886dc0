//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A name-keyed registry of tools, populated once at startup
//! - Tool schemas for `tools/list`
//! - Invocation of a tool by name for `tools/call`
//!
//! The registry is only mutated before the server starts serving. After that
//! it is shared behind an `Arc` and read concurrently without locking.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::domains::docs::{DocsSource, GitDocsSource};
use crate::domains::web::{ScrapeError, Scraper};

use super::context::{ToolContext, ToolResult};
use super::definitions::{
    AddTool, DownloadDocsMdTool, DownloadDocsTool, EchoTool, FetchMdTool, FetchMultiTool,
    FetchTool,
};
use super::error::ToolError;
use super::tool::{Tool, ToolSchema};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - maps tool names to tools.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool.
    ///
    /// Fails only if the scraper's HTTP clients cannot be constructed.
    pub fn with_default_tools(config: &Config) -> Result<Self, ScrapeError> {
        let scraper = Arc::new(Scraper::new(config.scraper.clone())?);
        let docs: Arc<dyn DocsSource> = Arc::new(GitDocsSource::new(config.docs.clone()));
        Ok(Self::with_sources(scraper, docs, config.docs.max_preview_chars))
    }

    /// Create a registry holding every built-in tool, backed by the given sources.
    pub fn with_sources(
        scraper: Arc<Scraper>,
        docs: Arc<dyn DocsSource>,
        preview_chars: usize,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(FetchTool::create(scraper.clone()));
        registry.register(FetchMdTool::create(scraper.clone()));
        registry.register(FetchMultiTool::create(scraper));
        registry.register(DownloadDocsTool::create(docs.clone()));
        registry.register(DownloadDocsMdTool::create(docs, preview_chars));
        registry.register(EchoTool::create());
        registry.register(AddTool::create());
        info!("Registered {} tools", registry.len());
        registry
    }

    /// Insert a tool, replacing any tool already registered under its name.
    pub fn register(&mut self, tool: Tool) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            debug!("Replaced previously registered tool: {}", name);
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// All tool names, in no particular order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// All registered tools, in no particular order.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Schemas of all registered tools, in no particular order.
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(Tool::schema).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool by name with a fresh context.
    ///
    /// The handler's result is returned unmodified; only routing failures
    /// are reported as [`ToolError`].
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::unknown_tool(name));
        };

        let Some(handler) = tool.handler() else {
            warn!("Tool has no handler: {}", name);
            return Err(ToolError::no_handler(name));
        };

        let ctx = ToolContext::new(name, arguments);
        Ok(handler(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::tool::{ParamSpec, ToolSpec};
    use serde_json::json;

    fn spec(name: &str, description: &str) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            description: description.to_string(),
            params: vec![ParamSpec::string("text", "Text", true)],
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_registry_default_tool_names() {
        let registry = ToolRegistry::with_default_tools(&Config::default()).unwrap();
        let names = registry.tool_names();
        assert_eq!(names.len(), 7);
        for expected in [
            "fetch",
            "fetch_md",
            "fetch_multi",
            "download_docs",
            "download_docs_md",
            "echo",
            "add",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ToolRegistry::new();
        registry.register(Tool::without_handler(spec("dup", "first")));
        registry.register(Tool::without_handler(spec("dup", "second")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup").unwrap().description(), "second");
    }

    #[test]
    fn test_list_tools_has_one_schema_per_tool() {
        let registry = ToolRegistry::with_default_tools(&Config::default()).unwrap();
        let schemas = registry.list_tools();
        assert_eq!(schemas.len(), registry.len());
        for tool in registry.tools() {
            let matching: Vec<_> = schemas.iter().filter(|s| s.name == tool.name()).collect();
            assert_eq!(matching.len(), 1);
            let expected: Vec<String> = tool
                .spec()
                .params
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.clone())
                .collect();
            assert_eq!(matching[0].input_schema.required, expected);
        }
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.call_tool("missing", Map::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref n) if n == "missing"));
    }

    #[tokio::test]
    async fn test_call_tool_without_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(Tool::without_handler(spec("bare", "no handler")));
        let err = registry.call_tool("bare", Map::new()).await.unwrap_err();
        assert_eq!(err.code(), -32603);
    }

    #[tokio::test]
    async fn test_call_tool_passes_name_and_arguments() {
        let mut registry = ToolRegistry::new();
        registry.register(Tool::new(spec("shout", "upper-case"), |ctx: ToolContext| async move {
            ctx.text(format!("{}:{}", ctx.tool_name(), ctx.string("text").to_uppercase()))
        }));
        let result = registry
            .call_tool("shout", args(json!({ "text": "hi" })))
            .await
            .unwrap();
        assert_eq!(result.first_text(), "shout:HI");
    }

    #[tokio::test]
    async fn test_failed_tool_is_not_a_routing_error() {
        let mut registry = ToolRegistry::new();
        registry.register(Tool::new(spec("fail", "always fails"), |ctx: ToolContext| async move {
            ctx.error("nope")
        }));
        let result = registry.call_tool("fail", Map::new()).await.unwrap();
        assert!(result.is_error);
    }
}
