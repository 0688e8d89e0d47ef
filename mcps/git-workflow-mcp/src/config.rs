//! Command line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use mcp_common::LogFormat;

/// Configuration for the Git Workflow MCP server
#[derive(Debug, Clone, Parser)]
#[command(name = "git-workflow-mcp")]
#[command(about = "MCP server exposing git status, log, diff, commit and push tools")]
pub struct Config {
    /// Repository working directory
    #[arg(long = "repo", env = "GIT_WORKFLOW_REPO", default_value = ".")]
    pub repo_path: PathBuf,

    /// git executable used for diff and push
    #[arg(long, env = "GIT_WORKFLOW_GIT_BIN", default_value = "git")]
    pub git_bin: String,

    /// Log output format: text or json
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

impl Config {
    /// Configuration for a repository with every other setting at its default
    pub fn for_repo(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            git_bin: "git".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
