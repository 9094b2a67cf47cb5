//! Issue creation tool
//!
//! The only tool with real reshaping logic: flat scalar and array inputs
//! are converted into the nested reference objects the Jira create endpoint
//! expects before the backend is called.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueRequest;

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "jira_create_issue"
    }

    fn description(&self) -> &'static str {
        "Create a new Jira issue in a project. Returns the created issue's id, key, and URL."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectKey": {
                    "type": "string",
                    "description": "Key of the project to create the issue in (e.g. 'PROJ')"
                },
                "summary": {
                    "type": "string",
                    "description": "Issue summary line"
                },
                "issueType": {
                    "type": "string",
                    "description": "Issue type name, e.g. 'Bug' or 'Task'"
                },
                "description": {
                    "type": "string",
                    "description": "Longer issue description"
                },
                "priority": {
                    "type": "string",
                    "description": "Priority name, e.g. 'High'"
                },
                "assignee": {
                    "type": "string",
                    "description": "Username of the assignee"
                },
                "labels": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Labels to apply to the issue"
                },
                "components": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Component names to associate with the issue"
                }
            },
            "required": ["projectKey", "summary", "issueType"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateIssueRequest = match BaseToolImpl::parse_arguments(arguments) {
            Ok(request) => request,
            Err(message) => return Ok(responses::error_response(message)),
        };
        if let Err(message) = request.validate() {
            return Ok(responses::error_response(message));
        }

        tracing::debug!(project = %request.project_key, "creating issue");

        match context.jira.create_issue(request.to_fields()).await {
            Ok(result) => {
                tracing::info!(
                    key = %result.get("key").and_then(|k| k.as_str()).unwrap_or("?"),
                    "created issue"
                );
                Ok(responses::json_response(&result))
            }
            Err(e) => Ok(McpErrorHandler::error_response(e, "create issue")),
        }
    }
}
