use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jira-bridge")]
#[command(version)]
#[command(about = "An MCP server bridging AI assistants to an on-premise Jira server")]
#[command(long_about = "
jira-bridge is an MCP (Model Context Protocol) server that exposes an
on-premise Jira server to AI assistants: JQL search, issue fetch, issue
creation, and commenting.

Configuration comes from the environment: JIRA_BASE_URL, JIRA_AUTH_MODE
(basic or bearer), and the mode's credential variables (JIRA_USERNAME and
JIRA_PASSWORD, or JIRA_TOKEN).

Example usage:
  jira-bridge serve     # Run as MCP server over stdio
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs jira-bridge as an MCP server over stdio. This is the mode MCP clients
such as Claude Desktop invoke. The server will:

- Load the Jira connection profile from the environment
- Expose the jira_* tools via the MCP protocol
- Log to ~/.jira-bridge/ when stdio is the protocol channel

Example:
  jira-bridge serve
")]
    Serve,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[cfg(test)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}
