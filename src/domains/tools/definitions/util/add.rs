//! Add tool definition.

use crate::domains::tools::context::{ToolContext, ToolResult};
use crate::domains::tools::tool::{ParamSpec, Tool, ToolSpec};

/// Add tool - sums two numbers.
pub struct AddTool;

impl AddTool {
    pub const NAME: &'static str = "add";

    pub const DESCRIPTION: &'static str = "Add two numbers.";

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            Self::DESCRIPTION,
            vec![
                ParamSpec::number("a", "First number", true),
                ParamSpec::number("b", "Second number", true),
            ],
        )
    }

    pub fn create() -> Tool {
        Tool::new(Self::spec(), |ctx| async move { Self::execute(&ctx) })
    }

    pub fn execute(ctx: &ToolContext) -> ToolResult {
        let (a, b) = (ctx.number("a"), ctx.number("b"));
        ctx.text(format!("{:.2} + {:.2} = {:.2}", a, b, a + b))
    }
}
