//! Tool registry for MCP operations
//!
//! The registry owns the closed catalog of Jira tools. Dispatch looks tools
//! up by name; everything a tool needs at execution time travels in the
//! shared [`ToolContext`].

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use rmcp::Error as McpError;

use crate::client::JiraApi;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Backend used for every outbound Jira call; read-only between
    /// invocations
    pub jira: Arc<dyn JiraApi>,
}

impl ToolContext {
    /// Create a new tool context around a Jira backend
    pub fn new(jira: Arc<dyn JiraApi>) -> Self {
        Self { jira }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context.
    ///
    /// Implementations report argument and backend failures as error
    /// envelopes in the returned `CallToolResult`; an `Err` from this method
    /// is a protocol-level fault and is reserved for the dispatch layer.
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for the MCP list_tools
    /// response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Common argument handling for tool implementations
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed request struct.
    ///
    /// The error string carries the deserializer's diagnostic verbatim so
    /// the calling agent sees exactly which field was wrong; callers turn it
    /// into an error envelope, not a protocol fault.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, String> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| format!("Invalid arguments: {e}"))
    }
}
