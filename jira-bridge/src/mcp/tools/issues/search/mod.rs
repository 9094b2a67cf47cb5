//! JQL search tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SearchIssuesRequest;

/// Tool for searching issues with a JQL query
#[derive(Default)]
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Creates a new instance of the SearchIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "jira_search_issues"
    }

    fn description(&self) -> &'static str {
        "Search for Jira issues using a JQL query. Returns one page of matching issues with the server's pagination metadata."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "jql": {
                    "type": "string",
                    "description": "JQL query, e.g. 'project = PROJ AND status = Open'"
                },
                "maxResults": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default 50)",
                    "minimum": 1,
                    "maximum": 100
                },
                "fields": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Issue fields to include; omit for the default projection"
                }
            },
            "required": ["jql"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchIssuesRequest = match BaseToolImpl::parse_arguments(arguments) {
            Ok(request) => request,
            Err(message) => return Ok(responses::error_response(message)),
        };
        if let Err(message) = request.validate() {
            return Ok(responses::error_response(message));
        }

        tracing::debug!(jql = %request.jql, "searching issues");

        match context.jira.search_issues(&request.jql, request.options()).await {
            Ok(result) => Ok(responses::json_response(&result)),
            Err(e) => Ok(McpErrorHandler::error_response(e, "search issues")),
        }
    }
}
