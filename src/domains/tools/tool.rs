//! Tool descriptors.
//!
//! A [`Tool`] couples a [`ToolSpec`] (name, description, ordered parameter
//! list) with an optional async handler. Tools are built once at startup and
//! never mutated afterwards.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::context::{ToolContext, ToolResult};

/// Boxed async tool handler.
pub type ToolHandler = Arc<dyn Fn(ToolContext) -> BoxFuture<'static, ToolResult> + Send + Sync>;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl ParamKind {
    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// A declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    /// Advisory only: surfaced in the schema, never enforced by the core.
    pub required: bool,
}

impl ParamSpec {
    pub fn new(
        name: impl Into<String>,
        kind: ParamKind,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self::new(name, ParamKind::String, description, required)
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self::new(name, ParamKind::Number, description, required)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self::new(name, ParamKind::Boolean, description, required)
    }
}

/// Static description of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

/// JSON Schema property entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub description: String,
}

/// Input schema surfaced by `tools/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

/// Tool schema surfaced by `tools/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Vec<ParamSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params,
        }
    }

    /// Build the `tools/list` schema for this spec.
    pub fn schema(&self) -> ToolSchema {
        let mut properties = BTreeMap::new();
        let mut required: Vec<String> = Vec::new();

        for param in &self.params {
            properties.insert(
                param.name.clone(),
                PropertySchema {
                    kind: param.kind,
                    description: param.description.clone(),
                },
            );
            if param.required && !required.contains(&param.name) {
                required.push(param.name.clone());
            }
        }

        ToolSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: InputSchema {
                kind: "object".to_string(),
                properties,
                required,
            },
        }
    }
}

/// A registered tool: spec plus handler.
#[derive(Clone)]
pub struct Tool {
    spec: ToolSpec,
    handler: Option<ToolHandler>,
}

impl Tool {
    /// Create a tool with an async handler.
    pub fn new<F, Fut>(spec: ToolSpec, f: F) -> Self
    where
        F: Fn(ToolContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        let handler: ToolHandler = Arc::new(move |ctx: ToolContext| f(ctx).boxed());
        Self {
            spec,
            handler: Some(handler),
        }
    }

    /// Create a tool that is listed but has no handler bound.
    pub fn without_handler(spec: ToolSpec) -> Self {
        Self {
            spec,
            handler: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn description(&self) -> &str {
        &self.spec.description
    }

    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    pub fn schema(&self) -> ToolSchema {
        self.spec.schema()
    }

    pub fn handler(&self) -> Option<&ToolHandler> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("spec", &self.spec)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn download_spec() -> ToolSpec {
        ToolSpec {
            name: "download_docs".to_string(),
            description: "Download docs".to_string(),
            params: vec![
                ParamSpec::string("repo", "Repository URL", true),
                ParamSpec::string("path", "Path filter", false),
                ParamSpec::boolean("verbose", "Verbose output", false),
            ],
        }
    }

    #[test]
    fn test_schema_required_matches_params() {
        let schema = download_spec().schema();
        assert_eq!(schema.input_schema.required, vec!["repo".to_string()]);
        assert_eq!(schema.input_schema.properties.len(), 3);
    }

    #[test]
    fn test_schema_wire_format() {
        let value = serde_json::to_value(download_spec().schema()).unwrap();
        assert_eq!(value["name"], "download_docs");
        assert_eq!(value["inputSchema"]["type"], "object");
        assert_eq!(
            value["inputSchema"]["properties"]["repo"],
            json!({ "type": "string", "description": "Repository URL" })
        );
        assert_eq!(value["inputSchema"]["properties"]["verbose"]["type"], "boolean");
        assert_eq!(value["inputSchema"]["required"], json!(["repo"]));
    }

    #[test]
    fn test_schema_without_required_params_has_empty_list() {
        let spec = ToolSpec {
            name: "noop".to_string(),
            description: String::new(),
            params: vec![ParamSpec::number("n", "A number", false)],
        };
        let value = serde_json::to_value(spec.schema()).unwrap();
        assert_eq!(value["inputSchema"]["required"], json!([]));
    }

    #[tokio::test]
    async fn test_tool_handler_invocation() {
        let tool = Tool::new(download_spec(), |ctx: ToolContext| async move {
            ctx.text(format!("repo={}", ctx.string("repo")))
        });
        let handler = tool.handler().expect("handler bound");
        let mut args = Map::new();
        args.insert("repo".to_string(), json!("r"));
        let result = handler(ToolContext::new("download_docs", args)).await;
        assert_eq!(result.first_text(), "repo=r");
    }

    #[test]
    fn test_tool_without_handler() {
        let tool = Tool::without_handler(download_spec());
        assert!(tool.handler().is_none());
        assert_eq!(tool.name(), "download_docs");
    }
}
