//! MCP server implementation for the Jira tools

use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};

use crate::client::{JiraApi, JiraClient};

use super::tool_registry::{ToolContext, ToolRegistry};
use super::tools::issues::register_issue_tools;

const INSTRUCTIONS: &str = "A bridge to an on-premise Jira server. Use jira_search_issues to run JQL queries, jira_get_issue to fetch a single issue, jira_create_issue to create issues, and jira_add_comment to comment on them.";

/// MCP server exposing the Jira tools over the protocol channel
#[derive(Clone)]
pub struct JiraMcpServer {
    tool_registry: Arc<ToolRegistry>,
    tool_context: Arc<ToolContext>,
}

impl JiraMcpServer {
    /// Create a server around a live Jira client
    pub fn new(client: JiraClient) -> Self {
        Self::with_backend(Arc::new(client))
    }

    /// Create a server around any backend implementation.
    ///
    /// Tests use this to substitute a stub for the HTTP client.
    pub fn with_backend(jira: Arc<dyn JiraApi>) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_issue_tools(&mut tool_registry);

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(jira)),
        }
    }

    /// The registry holding the closed set of tools
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Route one invocation to its tool.
    ///
    /// An unknown name is the single protocol-level fault in this layer;
    /// every other outcome comes back as a response envelope.
    pub async fn dispatch_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.tool_registry.get_tool(name) {
            Some(tool) => tool.execute(arguments, &self.tool_context).await,
            None => Err(McpError::invalid_request(
                format!("Unknown tool: {name}"),
                None,
            )),
        }
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }

    fn implementation() -> Implementation {
        Implementation {
            name: "JiraBridge".into(),
            version: crate::VERSION.into(),
        }
    }
}

impl ServerHandler for JiraMcpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Self::implementation(),
            instructions: Some(INSTRUCTIONS.into()),
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.dispatch_tool(&request.name, request.arguments.unwrap_or_default())
            .await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Self::implementation(),
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
