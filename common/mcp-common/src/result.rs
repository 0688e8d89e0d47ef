//! Result envelopes for MCP tool responses
//!
//! Every tool call answers with a `CallToolResult` holding a single text
//! block. These helpers build the success and error variants and read the
//! text back out.

use rmcp::model::{CallToolResult, Content, RawContent};
use serde::Serialize;

/// Pretty-printed JSON text for a tool response body
pub fn json_text<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create an error-flagged plain text response
///
/// The message is carried as-is; callers pass the failure's own text.
pub fn text_error(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Text of the first content block, if it is a text block
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}

/// Whether the envelope is flagged as an error
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_json_text() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let text = json_text(&data).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["value"], 42);
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_text_success() {
        let result = text_success("hello world");
        assert!(!is_error(&result));
        assert_eq!(result.content.len(), 1);
        assert_eq!(first_text(&result), Some("hello world"));
    }

    #[test]
    fn test_text_error() {
        let result = text_error("fatal: bad revision");
        assert!(is_error(&result));
        assert_eq!(result.content.len(), 1);
        assert_eq!(first_text(&result), Some("fatal: bad revision"));
    }
}
