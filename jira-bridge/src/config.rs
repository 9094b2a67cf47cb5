//! Connection configuration for the Jira server
//!
//! The configuration is resolved once at process start from environment
//! variables and is immutable afterwards. A process that cannot produce a
//! valid [`JiraConfig`] must not reach the MCP serving stage at all.

use std::env;
use std::fmt;

use url::Url;

use crate::error::{JiraError, Result};

/// Environment variable naming the Jira server base URL
pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";
/// Environment variable selecting the authentication mode (`basic` or `bearer`)
pub const ENV_AUTH_MODE: &str = "JIRA_AUTH_MODE";
/// Environment variable holding the username for basic authentication
pub const ENV_USERNAME: &str = "JIRA_USERNAME";
/// Environment variable holding the password for basic authentication
pub const ENV_PASSWORD: &str = "JIRA_PASSWORD";
/// Environment variable holding the personal access token for bearer authentication
pub const ENV_TOKEN: &str = "JIRA_TOKEN";

/// Credentials used to authenticate against the Jira server.
///
/// Exactly one of the two modes is chosen at construction; a half-filled
/// state cannot be represented.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access token sent as `Authorization: Bearer <token>`
    Bearer {
        /// The personal access token
        token: String,
    },
    /// Username and password sent as `Authorization: Basic <base64>`
    Basic {
        /// Account username
        username: String,
        /// Account password or API token
        password: String,
    },
}

// Secret material must never reach logs, including through Debug formatting.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer { .. } => f.write_str("Credentials::Bearer { token: \"***\" }"),
            Credentials::Basic { username, .. } => {
                write!(f, "Credentials::Basic {{ username: {username:?}, password: \"***\" }}")
            }
        }
    }
}

/// Resolved connection profile for the Jira server: normalized base URL plus
/// one credential, used for every outbound call in the process lifetime.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the Jira server, without a trailing slash
    pub base_url: String,
    /// Credential used for every outbound request
    pub credentials: Credentials,
}

impl JiraConfig {
    /// Create a configuration from an explicit base URL and credentials.
    ///
    /// The base URL is validated and normalized the same way as when loading
    /// from the environment.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            credentials,
        })
    }

    /// Load the configuration from the process environment.
    ///
    /// Requires `JIRA_BASE_URL` and `JIRA_AUTH_MODE`, plus the mode-specific
    /// credential variables: `JIRA_USERNAME`/`JIRA_PASSWORD` for `basic`,
    /// `JIRA_TOKEN` for `bearer`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Config`] when any required variable is missing or
    /// empty, the auth mode is not one of the two legal values, or the base
    /// URL does not parse as an http/https URL.
    pub fn from_env() -> Result<Self> {
        let base_url = require_var(ENV_BASE_URL)?;
        let mode = require_var(ENV_AUTH_MODE)?;

        let credentials = match mode.trim().to_ascii_lowercase().as_str() {
            "basic" => Credentials::Basic {
                username: require_var(ENV_USERNAME)?,
                password: require_var(ENV_PASSWORD)?,
            },
            "bearer" => Credentials::Bearer {
                token: require_var(ENV_TOKEN)?,
            },
            other => {
                return Err(JiraError::Config(format!(
                    "{ENV_AUTH_MODE} must be \"basic\" or \"bearer\", got \"{other}\""
                )))
            }
        };

        Self::new(&base_url, credentials)
    }
}

fn require_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(JiraError::Config(format!(
            "environment variable {name} is required"
        ))),
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| JiraError::Config(format!("{ENV_BASE_URL} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(JiraError::Config(format!(
            "{ENV_BASE_URL} must use http or https, got \"{other}\""
        ))),
    }
}
