//! Unified error handling for the Jira Bridge library
//!
//! Every failure that can cross the dispatch boundary is represented here as
//! a typed variant, so the MCP layer can decide in one place how each class
//! of failure is reported back to the calling agent.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for the Jira Bridge library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JiraError {
    /// Invalid or missing configuration at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Jira server responded with a non-2xx status
    #[error("{message}")]
    Api {
        /// Flattened, human-readable rendering of the remote error body
        message: String,
        /// HTTP status code of the failed response
        status: Option<u16>,
        /// Structured error body, when the response could be parsed as one
        errors: Option<JiraErrorBody>,
    },

    /// The network call itself failed (DNS, connection refused, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structured error payload returned by the Jira REST API.
///
/// Jira reports failures as a list of top-level messages plus a map of
/// per-field messages; either part may be absent. Field errors are kept in
/// a `BTreeMap` so the flattened rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraErrorBody {
    /// Top-level error messages
    #[serde(default, rename = "errorMessages")]
    pub error_messages: Vec<String>,
    /// Field name to error message
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl JiraErrorBody {
    /// Flatten the body into a single list of diagnostic strings: each
    /// top-level message as-is, then each field error as `"field: message"`.
    pub fn flatten(&self) -> Vec<String> {
        let mut messages = self.error_messages.clone();
        for (field, message) in &self.errors {
            messages.push(format!("{field}: {message}"));
        }
        messages
    }

    /// True when the body carries no diagnostic information at all.
    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty() && self.errors.is_empty()
    }
}

/// Result type alias for Jira Bridge operations
pub type Result<T> = std::result::Result<T, JiraError>;
