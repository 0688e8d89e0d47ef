//! Argument types for Git workflow tools
//!
//! Each struct doubles as the tool's argument contract: field docs become
//! schema descriptions, `#[serde(default)]` marks a field optional, and a
//! `default = "..."` function supplies the advertised default.

use schemars::JsonSchema;
use serde::Deserialize;

/// Default number of commits returned by git_log
pub const DEFAULT_LOG_MAX: u32 = 10;

/// Default remote for git_push
pub const DEFAULT_REMOTE: &str = "origin";

fn default_log_max() -> u32 {
    DEFAULT_LOG_MAX
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusArgs {}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogArgs {
    /// Maximum number of commits to return (default: 10)
    #[serde(default = "default_log_max")]
    pub max: u32,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DiffArgs {
    /// Revision range to diff, e.g. "HEAD~1..HEAD"
    #[serde(default)]
    pub range: Option<String>,
    /// Limit the diff to this path
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CommitArgs {
    /// Commit message
    pub message: String,
    /// Stage all changes in the working tree before committing (default: false)
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PushArgs {
    /// Remote to push to (default: "origin")
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Branch to push (defaults to the current branch)
    #[serde(default)]
    pub branch: Option<String>,
}
