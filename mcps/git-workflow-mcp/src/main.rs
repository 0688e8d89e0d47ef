//! Git Workflow MCP - git status, log, diff, commit and push over stdio
//!
//! Configure the repository with `--repo` or `GIT_WORKFLOW_REPO`; it
//! defaults to the current directory.

use clap::Parser;
use git_workflow_mcp::{Config, GitWorkflowServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    mcp_common::init_tracing("git_workflow_mcp", config.log_format)?;

    tracing::info!(
        repo = %config.repo_path.display(),
        git = %config.git_bin,
        "Starting Git Workflow MCP server"
    );

    let server = GitWorkflowServer::new(&config)?;

    mcp_common::serve_stdio(server, "git-workflow").await
}
