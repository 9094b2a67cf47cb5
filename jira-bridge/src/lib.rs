//! # Jira Bridge
//!
//! An MCP (Model Context Protocol) server library that bridges AI assistants
//! to an on-premise Jira server over its REST API v2.
//!
//! ## Features
//!
//! - **Four tools**: JQL search, issue fetch, issue creation, and commenting
//! - **MCP integration**: tool catalog and dispatch built on the `rmcp` SDK
//! - **Typed errors**: remote, transport, and configuration failures are
//!   kept distinct all the way to the tool response
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_bridge::{Credentials, JiraClient, JiraConfig};
//! use jira_bridge::mcp::JiraMcpServer;
//!
//! # fn main() -> jira_bridge::Result<()> {
//! let config = JiraConfig::new(
//!     "https://jira.example.com",
//!     Credentials::Bearer { token: "token".to_string() },
//! )?;
//! let client = JiraClient::new(config)?;
//! let server = JiraMcpServer::new(client);
//! // Serve `server` over stdio with rmcp::serve_server.
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Connection configuration resolved from the environment
pub mod config;

/// HTTP client for the Jira REST API
pub mod client;

/// Unified error types
pub mod error;

/// Model Context Protocol (MCP) server support
pub mod mcp;

// Re-export core types
pub use client::{CommentVisibility, JiraApi, JiraClient, SearchOptions, VisibilityKind};
pub use config::{Credentials, JiraConfig};
pub use error::{JiraError, JiraErrorBody, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
