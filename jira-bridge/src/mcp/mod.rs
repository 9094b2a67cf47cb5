//! Model Context Protocol (MCP) server support
//!
//! This module is the dispatch layer: it owns the catalog of Jira tools,
//! validates incoming arguments, invokes the backend client, and maps every
//! outcome into the MCP response envelope. Only an unknown tool name escapes
//! as a protocol-level fault; every other failure is reported in-band as an
//! error envelope the calling agent can read.

// Module declarations
pub mod responses;
pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;
pub mod types;

// Re-export commonly used items from submodules
pub use server::JiraMcpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
pub use tools::issues::register_issue_tools;
pub use types::{AddCommentRequest, CreateIssueRequest, GetIssueRequest, SearchIssuesRequest};
