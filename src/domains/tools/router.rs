//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! The STDIO transport is served by rmcp, which dispatches `tools/call`
//! through a [`ToolRouter`]. Every route built here forwards to
//! [`ToolRegistry::call_tool`], so both transports run the same handlers.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, JsonObject, Tool as McpTool},
};
use serde_json::Value;
use std::sync::Arc;

use super::context::ToolResult;
use super::error::ToolError;
use super::registry::ToolRegistry;
use super::tool::Tool;

/// Build the tool router with every tool in `registry`.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for tool in registry.tools() {
        router = router.with_route(create_route(tool, registry.clone()));
    }
    router
}

fn create_route<S>(tool: &Tool, registry: Arc<ToolRegistry>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = tool.name().to_string();
    ToolRoute::new_dyn(to_mcp_tool(tool), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let registry = registry.clone();
        let name = name.clone();
        async move {
            let result = registry
                .call_tool(&name, args)
                .await
                .map_err(to_mcp_error)?;
            Ok(to_call_tool_result(result))
        }
        .boxed()
    })
}

/// Create the rmcp Tool model (metadata) for a registered tool.
pub fn to_mcp_tool(tool: &Tool) -> McpTool {
    let schema = tool.schema();
    let input_schema: JsonObject = match serde_json::to_value(&schema.input_schema) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    };

    McpTool {
        name: schema.name.into(),
        description: Some(schema.description.into()),
        input_schema: Arc::new(input_schema),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

fn to_call_tool_result(result: ToolResult) -> CallToolResult {
    let content: Vec<Content> = result
        .content
        .into_iter()
        .map(|c| Content::text(c.text))
        .collect();
    if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::NoHandler(_) => McpError::internal_error(err.to_string(), None),
        ToolError::UnknownTool(_) | ToolError::InvalidParams => {
            McpError::invalid_params(err.to_string(), None)
        }
    }
}
