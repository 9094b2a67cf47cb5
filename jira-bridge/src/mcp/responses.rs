//! Response envelope construction for MCP tool calls
//!
//! Every tool outcome becomes a single text content block plus an error
//! flag. Successful results are rendered as pretty-printed JSON so they stay
//! both human- and machine-readable.

use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent};
use serde_json::Value;

/// Create a success envelope carrying the given text
pub fn success_response(text: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Annotated::new(
            RawContent::Text(RawTextContent { text: text.into() }),
            None,
        )],
        is_error: Some(false),
    }
}

/// Create an error envelope carrying the given text
pub fn error_response(text: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Annotated::new(
            RawContent::Text(RawTextContent { text: text.into() }),
            None,
        )],
        is_error: Some(true),
    }
}

/// Render a remote result as a pretty-printed JSON success envelope
pub fn json_response(value: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => success_response(text),
        Err(e) => error_response(format!("Failed to serialize response: {e}")),
    }
}
