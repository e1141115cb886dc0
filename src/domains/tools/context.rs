//! Per-call invocation context and tool results.
//!
//! A [`ToolContext`] is created for every `tools/call`, handed to the tool's
//! handler by value, and dropped once the handler returns. Argument accessors
//! never fail: a missing key or a value of the wrong JSON type yields the
//! zero value for the requested type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single content item of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Always `"text"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// The text payload.
    pub text: String,
}

impl Content {
    /// Create a text content item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// The result of a tool invocation, as returned in the `tools/call` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<Content>,

    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResult {
    /// A successful result carrying a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: false,
        }
    }

    /// A failed result carrying a single text item.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            is_error: true,
        }
    }

    /// Text of the first content item, or `""` when there is none.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Invocation context handed to a tool handler.
#[derive(Debug, Clone)]
pub struct ToolContext {
    name: String,
    arguments: Map<String, Value>,
}

impl ToolContext {
    /// Create a context for a call to `name` with the raw argument map.
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Name of the tool being invoked.
    pub fn tool_name(&self) -> &str {
        &self.name
    }

    /// Raw argument map.
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// String argument, or `""` when absent or not a string.
    pub fn string(&self, key: &str) -> String {
        self.arguments
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Numeric argument, or `0.0` when absent or not a number.
    pub fn number(&self, key: &str) -> f64 {
        self.arguments
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Numeric argument truncated toward zero, or `0` when absent or not a number.
    pub fn int(&self, key: &str) -> i64 {
        self.number(key) as i64
    }

    /// Boolean argument, or `false` when absent or not a boolean.
    pub fn boolean(&self, key: &str) -> bool {
        self.arguments
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the argument is present, whatever its type.
    pub fn has(&self, key: &str) -> bool {
        self.arguments.contains_key(key)
    }

    // ------------------------------------------------------------------------
    // Result constructors
    // ------------------------------------------------------------------------

    /// Plain text result.
    pub fn text(&self, text: impl Into<String>) -> ToolResult {
        ToolResult::text(text)
    }

    /// Serialize `data` to compact JSON and return it as a text result.
    pub fn json<T: Serialize>(&self, data: &T) -> ToolResult {
        match serde_json::to_string(data) {
            Ok(json) => ToolResult::text(json),
            Err(e) => self.error(format!("JSON marshal error: {}", e)),
        }
    }

    /// Markdown result. Markdown has no distinct wire form, it is sent as text.
    pub fn markdown(&self, markdown: impl Into<String>) -> ToolResult {
        ToolResult::text(markdown)
    }

    /// Failed result with `message` as its text.
    pub fn error(&self, message: impl Into<String>) -> ToolResult {
        ToolResult::error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn ctx(args: Value) -> ToolContext {
        let map = match args {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        };
        ToolContext::new("test", map)
    }

    #[test]
    fn test_string_accessor_type_mismatch_is_empty() {
        let ctx = ctx(json!({ "x": 42 }));
        assert_eq!(ctx.string("x"), "");
        assert_eq!(ctx.string("missing"), "");
    }

    #[test]
    fn test_string_accessor() {
        let ctx = ctx(json!({ "url": "https://example.com" }));
        assert_eq!(ctx.string("url"), "https://example.com");
    }

    #[test]
    fn test_number_accessor() {
        let ctx = ctx(json!({ "a": 1.5, "b": 2, "c": "3" }));
        assert_eq!(ctx.number("a"), 1.5);
        assert_eq!(ctx.number("b"), 2.0);
        assert_eq!(ctx.number("c"), 0.0);
        assert_eq!(ctx.number("missing"), 0.0);
    }

    #[test]
    fn test_int_accessor_truncates() {
        let ctx = ctx(json!({ "n": 3.9, "neg": -2.7, "s": "4" }));
        assert_eq!(ctx.int("n"), 3);
        assert_eq!(ctx.int("neg"), -2);
        assert_eq!(ctx.int("s"), 0);
    }

    #[test]
    fn test_boolean_accessor() {
        let ctx = ctx(json!({ "yes": true, "one": 1, "str": "true" }));
        assert!(ctx.boolean("yes"));
        assert!(!ctx.boolean("one"));
        assert!(!ctx.boolean("str"));
        assert!(!ctx.boolean("missing"));
    }

    #[test]
    fn test_has() {
        let ctx = ctx(json!({ "present": null }));
        assert!(ctx.has("present"));
        assert!(!ctx.has("absent"));
    }

    #[test]
    fn test_json_result() {
        let ctx = ctx(json!({}));
        let mut data = BTreeMap::new();
        data.insert("title", "T");
        let result = ctx.json(&data);
        assert!(!result.is_error);
        assert_eq!(result.first_text(), r#"{"title":"T"}"#);
    }

    #[test]
    fn test_json_result_serialization_failure() {
        // Maps with non-string keys cannot be serialized to JSON.
        let ctx = ctx(json!({}));
        let mut data = BTreeMap::new();
        data.insert(vec![1u8], "value");
        let result = ctx.json(&data);
        assert!(result.is_error);
        assert!(result.first_text().starts_with("JSON marshal error"));
    }

    #[test]
    fn test_markdown_is_text() {
        let ctx = ctx(json!({}));
        assert_eq!(ctx.markdown("# T"), ctx.text("# T"));
    }

    #[test]
    fn test_error_result_wire_format() {
        let ctx = ctx(json!({}));
        let value = serde_json::to_value(ctx.error("boom")).unwrap();
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "boom" }], "isError": true })
        );
    }

    #[test]
    fn test_success_result_wire_format() {
        let value = serde_json::to_value(ToolResult::text("ok")).unwrap();
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "ok" }], "isError": false })
        );
    }
}
