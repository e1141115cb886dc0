//! MCP Server implementation and request dispatch.
//!
//! [`McpServer`] owns the tool registry and answers JSON-RPC envelopes for
//! the HTTP transport through [`McpServer::dispatch`]. For the STDIO
//! transport it implements rmcp's `ServerHandler`, routing `tools/call`
//! through a `ToolRouter` built from the same registry.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::config::Config;
use super::error::Result as CoreResult;
use super::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// Protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// `tools/call` parameters.
#[derive(Debug, Default, Deserialize)]
struct CallToolParams {
    #[serde(default)]
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, read-only once the server is built.
    registry: Arc<ToolRegistry>,

    /// Tool router for the rmcp-driven transport.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server holding every built-in tool.
    pub fn new(config: Config) -> CoreResult<Self> {
        let registry = ToolRegistry::with_default_tools(&config)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already populated registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Answer one decoded JSON-RPC request.
    ///
    /// Returns `None` for `notifications/initialized`, which expects no
    /// response at all.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id;

        let response = match request.method.as_str() {
            "initialize" => {
                info!("Processing initialize request");
                JsonRpcResponse::success(id, self.initialize_result())
            }

            "notifications/initialized" => {
                debug!("Client sent initialized notification");
                return None;
            }

            "tools/list" => {
                info!("Processing tools/list request");
                JsonRpcResponse::success(id, json!({ "tools": self.registry.list_tools() }))
            }

            "tools/call" => self.handle_tools_call(id, request.params).await,

            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::method_not_found(id, method)
            }
        };

        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.name(),
                "version": self.version()
            }
        })
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            // An explicit `null` carries no fields: every member takes its default.
            Some(Value::Null) => Ok(Some(CallToolParams::default())),
            other => other.map(serde_json::from_value::<CallToolParams>).transpose(),
        };
        let params = match params {
            Ok(Some(p)) => p,
            Err(e) => {
                warn!("Invalid tools/call params: {}", e);
                return tool_error(id, ToolError::InvalidParams);
            }
            Ok(None) => return tool_error(id, ToolError::InvalidParams),
        };

        info!("Processing tools/call request for {}", params.name);
        let arguments = params.arguments.unwrap_or_default();

        match self.registry.call_tool(&params.name, arguments).await {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::internal_error(id, e.to_string()),
            },
            Err(e) => tool_error(id, e),
        }
    }
}

fn tool_error(id: Option<Value>, err: ToolError) -> JsonRpcResponse {
    JsonRpcResponse::error(id, err.code(), err.to_string())
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = self.name().to_string();
        server_info.version = self.version().to_string();

        ServerInfo {
            instructions: Some(
                "Fetches web pages and repository documentation and returns them as Markdown."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            ..Default::default()
        }
    }
}
