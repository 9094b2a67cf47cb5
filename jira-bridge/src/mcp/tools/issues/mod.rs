//! Jira issue tools for MCP operations
//!
//! The four tools exposed by this server: JQL search, issue fetch, issue
//! creation, and commenting. Adding a tool means one new submodule plus one
//! register line here.

pub mod comment;
pub mod create;
pub mod get;
pub mod search;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    registry.register(search::SearchIssuesTool::new());
    registry.register(get::GetIssueTool::new());
    registry.register(create::CreateIssueTool::new());
    registry.register(comment::AddCommentTool::new());
}
