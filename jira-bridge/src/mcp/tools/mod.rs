//! MCP tool implementations
//!
//! Tools are grouped by domain, each tool in its own submodule with its
//! schema and execution logic.

pub mod issues;
