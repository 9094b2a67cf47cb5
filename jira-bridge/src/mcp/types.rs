//! Request types for the Jira MCP tools
//!
//! One struct per tool, deserialized from the raw argument map. Wire names
//! are camelCase to match what calling agents send. Checks serde cannot
//! express (value ranges, non-blank strings) live in the `validate` methods;
//! a validation failure is reported as a business error, never a protocol
//! fault.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::{CommentVisibility, SearchOptions};
use crate::mcp::shared_utils::McpValidation;

/// Arguments for the `jira_search_issues` tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchIssuesRequest {
    /// JQL query to run
    pub jql: String,
    /// Maximum number of results to return (1-100, default 50)
    pub max_results: Option<u32>,
    /// Explicit field projection; omit for the default set
    pub fields: Option<Vec<String>>,
}

impl SearchIssuesRequest {
    /// Validate value constraints beyond deserialization
    pub fn validate(&self) -> Result<(), String> {
        McpValidation::validate_not_empty(&self.jql, "jql")?;
        if let Some(max) = self.max_results {
            if !(1..=100).contains(&max) {
                return Err(format!("maxResults must be between 1 and 100, got {max}"));
            }
        }
        Ok(())
    }

    /// Backend search options for this request
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.max_results.unwrap_or(50),
            start_at: 0,
            fields: self.fields.clone(),
        }
    }
}

/// Arguments for the `jira_get_issue` tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueRequest {
    /// Issue key (e.g. `PROJ-123`) or numeric id
    pub issue_key: String,
    /// Fields to include; omit for the server default
    #[serde(default)]
    pub fields: Vec<String>,
    /// Extra sections to expand (e.g. `changelog`, `transitions`)
    #[serde(default)]
    pub expand: Vec<String>,
}

impl GetIssueRequest {
    /// Validate value constraints beyond deserialization
    pub fn validate(&self) -> Result<(), String> {
        McpValidation::validate_not_empty(&self.issue_key, "issueKey")
    }
}

/// Arguments for the `jira_create_issue` tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    /// Key of the project to create the issue in
    pub project_key: String,
    /// Issue summary line
    pub summary: String,
    /// Issue type name (e.g. `Bug`, `Task`)
    pub issue_type: String,
    /// Longer issue description
    pub description: Option<String>,
    /// Priority name (e.g. `High`)
    pub priority: Option<String>,
    /// Username of the assignee
    pub assignee: Option<String>,
    /// Labels to apply
    pub labels: Option<Vec<String>>,
    /// Component names to associate
    pub components: Option<Vec<String>>,
}

impl CreateIssueRequest {
    /// Validate value constraints beyond deserialization
    pub fn validate(&self) -> Result<(), String> {
        McpValidation::validate_not_empty(&self.project_key, "projectKey")?;
        McpValidation::validate_not_empty(&self.summary, "summary")?;
        McpValidation::validate_not_empty(&self.issue_type, "issueType")
    }

    /// Reshape the flat inputs into the nested reference-object `fields`
    /// value the Jira create endpoint expects: bare names and keys become
    /// `{"key": ...}` / `{"name": ...}` objects.
    pub fn to_fields(&self) -> Value {
        let mut fields = serde_json::Map::new();
        fields.insert("project".to_string(), json!({ "key": self.project_key }));
        fields.insert("summary".to_string(), json!(self.summary));
        fields.insert("issuetype".to_string(), json!({ "name": self.issue_type }));
        if let Some(description) = &self.description {
            fields.insert("description".to_string(), json!(description));
        }
        if let Some(priority) = &self.priority {
            fields.insert("priority".to_string(), json!({ "name": priority }));
        }
        if let Some(assignee) = &self.assignee {
            fields.insert("assignee".to_string(), json!({ "name": assignee }));
        }
        if let Some(labels) = &self.labels {
            fields.insert("labels".to_string(), json!(labels));
        }
        if let Some(components) = &self.components {
            let components: Vec<Value> =
                components.iter().map(|name| json!({ "name": name })).collect();
            fields.insert("components".to_string(), Value::Array(components));
        }
        Value::Object(fields)
    }
}

/// Arguments for the `jira_add_comment` tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Issue key (e.g. `PROJ-123`) or numeric id
    pub issue_key: String,
    /// Comment body text
    pub body: String,
    /// Restrict visibility to a group or role
    pub visibility: Option<CommentVisibility>,
}

impl AddCommentRequest {
    /// Validate value constraints beyond deserialization
    pub fn validate(&self) -> Result<(), String> {
        McpValidation::validate_not_empty(&self.issue_key, "issueKey")?;
        McpValidation::validate_not_empty(&self.body, "body")
    }
}
