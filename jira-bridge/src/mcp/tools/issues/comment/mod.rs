//! Comment tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddCommentRequest;

/// Tool for adding a comment to an issue
#[derive(Default)]
pub struct AddCommentTool;

impl AddCommentTool {
    /// Creates a new instance of the AddCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCommentTool {
    fn name(&self) -> &'static str {
        "jira_add_comment"
    }

    fn description(&self) -> &'static str {
        "Add a comment to a Jira issue, optionally restricted to a group or project role."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueKey": {
                    "type": "string",
                    "description": "Issue key (e.g. 'PROJ-123') or numeric id"
                },
                "body": {
                    "type": "string",
                    "description": "Comment body text"
                },
                "visibility": {
                    "type": "object",
                    "description": "Restrict who can see the comment",
                    "properties": {
                        "type": {
                            "type": "string",
                            "enum": ["group", "role"],
                            "description": "Kind of restriction"
                        },
                        "value": {
                            "type": "string",
                            "description": "Name of the group or role"
                        }
                    },
                    "required": ["type", "value"]
                }
            },
            "required": ["issueKey", "body"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddCommentRequest = match BaseToolImpl::parse_arguments(arguments) {
            Ok(request) => request,
            Err(message) => return Ok(responses::error_response(message)),
        };
        if let Err(message) = request.validate() {
            return Ok(responses::error_response(message));
        }

        tracing::debug!(issue = %request.issue_key, "adding comment");

        match context
            .jira
            .add_comment(&request.issue_key, &request.body, request.visibility)
            .await
        {
            Ok(result) => Ok(responses::json_response(&result)),
            Err(e) => Ok(McpErrorHandler::error_response(e, "add comment")),
        }
    }
}
