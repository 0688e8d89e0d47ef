//! Tool-level error type
//!
//! Every variant ends up as the text of an error-flagged result; none of them
//! reach the transport as a protocol fault.

use mcp_common::ContractError;
use thiserror::Error;

use crate::types::GitError;

/// Fixed message reported when the working directory is not a repository
pub const NOT_A_REPOSITORY: &str = "Current directory is not a Git repository";

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{}", NOT_A_REPOSITORY)]
    NotARepository,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    InvalidArguments(#[from] ContractError),

    #[error("Invalid arguments: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Invalid range '{0}': a revision range must not start with '-'")]
    OptionLikeRange(String),

    #[error("Commit message must not be empty")]
    EmptyCommitMessage,

    #[error("Cannot determine the current branch (detached HEAD); pass 'branch' explicitly")]
    DetachedHead,

    #[error("Failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Git(#[from] GitError),
}

pub type ToolOutcome = Result<String, ToolError>;
