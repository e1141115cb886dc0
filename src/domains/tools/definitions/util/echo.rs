//! Echo tool definition.

use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{ParamSpec, Tool, ToolSpec};

/// Echo tool - returns its input, prefixed.
pub struct EchoTool;

impl EchoTool {
    pub const NAME: &'static str = "echo";

    pub const DESCRIPTION: &'static str = "Echo the input text back.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            Self::DESCRIPTION,
            vec![ParamSpec::string("text", "Text to echo", true)],
        )
    }

    pub fn create() -> Tool {
        Tool::new(Self::spec(), |ctx| async move { Self::execute(&ctx) })
    }

    pub fn execute(ctx: &ToolContext) -> ToolResult {
        ctx.text(format!("echo: {}", ctx.string("text")))
    }
}
