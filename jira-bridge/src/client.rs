//! HTTP client for the Jira Server REST API (v2)
//!
//! [`JiraClient`] owns the single outbound conversation pattern: the
//! `Authorization` header is derived once from the connection profile, every
//! request is prefixed with `/rest/api/2`, and every non-2xx response is
//! classified into [`JiraError::Api`] with the remote diagnostics flattened
//! into a readable message. Network-level failures propagate as
//! [`JiraError::Transport`] for the dispatch layer to classify.
//!
//! The [`JiraApi`] trait is the seam between the MCP dispatch layer and this
//! client; tests substitute stub implementations behind it.

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{Credentials, JiraConfig};
use crate::error::{JiraError, JiraErrorBody, Result};

/// Field projection used for search when the caller does not ask for
/// specific fields.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &[
    "key",
    "summary",
    "status",
    "assignee",
    "issuetype",
    "priority",
    "project",
    "created",
    "updated",
];

/// Options for a single search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of issues in the returned page
    pub max_results: u32,
    /// Zero-based index of the first issue in the returned page
    pub start_at: u64,
    /// Explicit field projection; `None` selects [`DEFAULT_SEARCH_FIELDS`]
    pub fields: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 50,
            start_at: 0,
            fields: None,
        }
    }
}

/// Restriction limiting who can see a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CommentVisibility {
    /// Kind of restriction: a Jira group or a project role
    #[serde(rename = "type")]
    pub kind: VisibilityKind,
    /// Name of the group or role
    pub value: String,
}

/// Kind of comment visibility restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityKind {
    /// Visible only to members of a Jira group
    Group,
    /// Visible only to holders of a project role
    Role,
}

/// Operations the MCP dispatch layer needs from the Jira backend.
///
/// Results are the remote API's JSON payloads passed through verbatim; this
/// layer does not cache or reshape successful responses.
#[async_trait]
pub trait JiraApi: Send + Sync {
    /// Run a JQL search and return one page of results.
    async fn search_issues(&self, jql: &str, options: SearchOptions) -> Result<Value>;

    /// Fetch a single issue by key or numeric id.
    async fn get_issue(&self, id_or_key: &str, fields: &[String], expand: &[String])
        -> Result<Value>;

    /// Create an issue. `fields` must already be in the API's nested
    /// reference-object shape (see the create tool for the reshaping).
    async fn create_issue(&self, fields: Value) -> Result<Value>;

    /// Add a comment to an issue, optionally restricted to a group or role.
    async fn add_comment(
        &self,
        id_or_key: &str,
        body: &str,
        visibility: Option<CommentVisibility>,
    ) -> Result<Value>;
}

/// HTTP client bound to one Jira server and one credential.
pub struct JiraClient {
    base_url: String,
    authorization: String,
    http: reqwest::Client,
}

impl JiraClient {
    /// Create a client from a resolved connection profile.
    ///
    /// Derives the `Authorization` header value once; credentials are not
    /// kept around after construction.
    pub fn new(config: JiraConfig) -> Result<Self> {
        let authorization = authorization_value(&config.credentials);
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: config.base_url,
            authorization,
            http,
        })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request against `<base>/rest/api/2<path>` and classify the
    /// response.
    ///
    /// The body text is always read in full before deciding the outcome:
    /// error bodies carry diagnostics that must be surfaced, and some
    /// failure responses are not valid JSON at all. A 204 or an empty body
    /// on a success status yields an empty object.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/rest/api/2{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending Jira API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "Jira API request failed");
            return Err(api_error(status, &text));
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(json!({}));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl JiraApi for JiraClient {
    async fn search_issues(&self, jql: &str, options: SearchOptions) -> Result<Value> {
        let fields = options.fields.unwrap_or_else(|| {
            DEFAULT_SEARCH_FIELDS
                .iter()
                .map(|field| (*field).to_string())
                .collect()
        });
        let body = json!({
            "jql": jql,
            "maxResults": options.max_results,
            "startAt": options.start_at,
            "fields": fields,
        });
        self.request(Method::POST, "/search", Some(body)).await
    }

    async fn get_issue(
        &self,
        id_or_key: &str,
        fields: &[String],
        expand: &[String],
    ) -> Result<Value> {
        let mut path = format!("/issue/{id_or_key}");
        let query = issue_query(fields, expand);
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }
        self.request(Method::GET, &path, None).await
    }

    async fn create_issue(&self, fields: Value) -> Result<Value> {
        self.request(Method::POST, "/issue", Some(json!({ "fields": fields })))
            .await
    }

    async fn add_comment(
        &self,
        id_or_key: &str,
        body: &str,
        visibility: Option<CommentVisibility>,
    ) -> Result<Value> {
        let mut payload = json!({ "body": body });
        if let Some(visibility) = visibility {
            payload["visibility"] = serde_json::to_value(visibility)?;
        }
        self.request(
            Method::POST,
            &format!("/issue/{id_or_key}/comment"),
            Some(payload),
        )
        .await
    }
}

fn authorization_value(credentials: &Credentials) -> String {
    match credentials {
        Credentials::Bearer { token } => format!("Bearer {token}"),
        Credentials::Basic { username, password } => {
            let raw = format!("{username}:{password}");
            let encoded = base64::engine::general_purpose::STANDARD.encode(raw);
            format!("Basic {encoded}")
        }
    }
}

/// Build the query string for an issue fetch. Empty selector lists are
/// omitted entirely rather than sent as empty parameters.
fn issue_query(fields: &[String], expand: &[String]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if !fields.is_empty() {
        query.append_pair("fields", &fields.join(","));
    }
    if !expand.is_empty() {
        query.append_pair("expand", &expand.join(","));
    }
    query.finish()
}

/// Classify a non-2xx response into [`JiraError::Api`].
fn api_error(status: StatusCode, body: &str) -> JiraError {
    let parsed: Option<JiraErrorBody> = serde_json::from_str(body).ok();
    let messages = parsed.as_ref().map(JiraErrorBody::flatten).unwrap_or_default();
    let message = if messages.is_empty() {
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        )
    } else {
        messages.join("; ")
    };
    JiraError::Api {
        message,
        status: Some(status.as_u16()),
        errors: parsed,
    }
}
