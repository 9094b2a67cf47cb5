//! Issue fetch tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueRequest;

/// Tool for fetching a single issue by key or id
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "jira_get_issue"
    }

    fn description(&self) -> &'static str {
        "Fetch a single Jira issue by key or numeric id, optionally selecting fields and expanding sections such as the changelog."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueKey": {
                    "type": "string",
                    "description": "Issue key (e.g. 'PROJ-123') or numeric id"
                },
                "fields": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Fields to include; omit for all fields"
                },
                "expand": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Sections to expand, e.g. 'changelog' or 'transitions'"
                }
            },
            "required": ["issueKey"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetIssueRequest = match BaseToolImpl::parse_arguments(arguments) {
            Ok(request) => request,
            Err(message) => return Ok(responses::error_response(message)),
        };
        if let Err(message) = request.validate() {
            return Ok(responses::error_response(message));
        }

        tracing::debug!(issue = %request.issue_key, "fetching issue");

        match context
            .jira
            .get_issue(&request.issue_key, &request.fields, &request.expand)
            .await
        {
            Ok(result) => Ok(responses::json_response(&result)),
            Err(e) => Ok(McpErrorHandler::error_response(e, "get issue")),
        }
    }
}
