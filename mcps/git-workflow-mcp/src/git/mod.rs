//! Version-control backend
//!
//! Tools talk to git only through the [`VersionControl`] trait. The shipped
//! backend is [`GitRepository`], which reads and writes through libgit2 and
//! shells out to the `git` executable for raw commands and pushes.

pub mod executor;
pub mod repository;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::types::{CommitOutcome, CommitRecord, GitResult, PushOutcome, StatusRecord};

pub use executor::{CommandOutput, GitCommand};
pub use repository::GitRepository;

/// Operations the tools need from a repository
///
/// Each call is atomic on its own; callers get no transaction across calls.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Whether the configured location is inside a git work tree
    async fn is_repository(&self) -> bool;

    /// Branch, tracking, and working tree state
    async fn status(&self) -> GitResult<StatusRecord>;

    /// Up to `max` commits reachable from HEAD, newest first
    async fn log(&self, max: usize) -> GitResult<Vec<CommitRecord>>;

    /// Run a git subcommand and return its stdout
    async fn raw(&self, args: &[String]) -> GitResult<String>;

    /// Stage every change in the working tree, including deletions
    async fn stage_all(&self) -> GitResult<()>;

    /// Commit the index with the given message
    async fn commit(&self, message: &str) -> GitResult<CommitOutcome>;

    /// Push `branch` to `remote`
    async fn push(&self, remote: &str, branch: &str) -> GitResult<PushOutcome>;
}
