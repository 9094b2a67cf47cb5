//! Shared utilities for MCP tool implementations
//!
//! Holds the single point where backend failures are classified into
//! business-error envelopes, plus small validation helpers used by the
//! tools before any network call is made.

use rmcp::model::CallToolResult;

use crate::error::JiraError;
use crate::mcp::responses;

/// Common error handling for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a backend failure into a business-error envelope.
    ///
    /// This is the one place deciding how each failure class reads to the
    /// calling agent:
    /// - Remote (non-2xx) errors are prefixed so the agent can tell the
    ///   rejection came from Jira itself
    /// - Transport failures get a generic framing around the underlying
    ///   description
    /// - Anything else surfaces its own message
    pub fn error_response(error: JiraError, operation: &str) -> CallToolResult {
        tracing::error!("Jira operation '{}' failed: {}", operation, error);

        match error {
            JiraError::Api { message, .. } => {
                responses::error_response(format!("Jira API Error: {message}"))
            }
            JiraError::Transport(e) => {
                responses::error_response(format!("Jira request failed: {e}"))
            }
            other => responses::error_response(other.to_string()),
        }
    }
}

/// Validation utilities for MCP requests
pub struct McpValidation;

impl McpValidation {
    /// Validate that a string field is not empty or whitespace-only
    pub fn validate_not_empty(value: &str, field: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err(format!("{field} cannot be empty"));
        }
        Ok(())
    }
}
