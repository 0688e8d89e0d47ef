//! Type definitions for git-workflow-mcp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Response Types
// ============================================================================

/// Kind of change recorded for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChange {
    New,
    Modified,
    Deleted,
    Renamed,
    Typechange,
}

/// Status of a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStatus {
    pub path: String,
    pub status: FileChange,
    pub old_path: Option<String>, // for renamed files
}

/// Working tree, branch, and sync state, returned by git_status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub repo_path: String,
    pub branch: Option<String>,
    pub tracking: Option<String>,
    pub ahead: usize,
    pub behind: usize,
    pub is_clean: bool,
    pub staged: Vec<FileStatus>,
    pub unstaged: Vec<FileStatus>,
    pub untracked: Vec<String>,
    pub conflicted: Vec<String>,
}

impl StatusRecord {
    /// An empty, clean status on the given branch
    pub fn clean(repo_path: impl Into<String>, branch: Option<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            branch,
            tracking: None,
            ahead: 0,
            behind: 0,
            is_clean: true,
            staged: Vec::new(),
            unstaged: Vec::new(),
            untracked: Vec::new(),
            conflicted: Vec::new(),
        }
    }
}

/// One commit in a git_log response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub short_hash: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub date: DateTime<Utc>,
    pub parent_ids: Vec<String>,
}

/// Line counts for a created commit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub changes: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// Result of git_commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub hash: String,
    pub short_hash: String,
    pub branch: Option<String>,
    /// True when this is the first commit on an unborn branch
    pub root: bool,
    pub summary: CommitSummary,
}

/// Result of git_push
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushOutcome {
    pub remote: String,
    pub branch: String,
    pub pushed: bool,
    /// Progress text git reported while pushing
    pub output: String,
}

// ============================================================================
// Error Types
// ============================================================================

/// Failures raised by the version-control backend
///
/// Messages are passed to callers unchanged, so command failures display the
/// text git itself wrote to stderr.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("{0}")]
    Git(#[from] git2::Error),

    #[error("{stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("git executable not found: {0}")]
    GitNotFound(String),

    #[error("failed to spawn git process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("nothing to commit, working tree clean")]
    NothingToCommit,

    #[error("cannot commit while a {0} is in progress; finish it with the git CLI first")]
    OperationInProgress(&'static str),
}

pub type GitResult<T> = Result<T, GitError>;
