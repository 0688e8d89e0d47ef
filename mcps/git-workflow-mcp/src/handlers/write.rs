//! Mutating handlers: commit and push

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ToolError, ToolOutcome};
use crate::git::VersionControl;
use crate::params::{CommitArgs, PushArgs};

use super::{to_json, ToolSpec};

pub struct CommitTool;

#[async_trait]
impl ToolSpec for CommitTool {
    const NAME: &'static str = "git_commit";
    const DESCRIPTION: &'static str =
        "Commit staged changes with a message. Optionally add all changes before committing.";

    type Args = CommitArgs;

    async fn run(&self, vcs: &dyn VersionControl, args: CommitArgs) -> ToolOutcome {
        if args.message.trim().is_empty() {
            return Err(ToolError::EmptyCommitMessage);
        }

        if args.all {
            vcs.stage_all().await?;
        }

        let outcome = vcs.commit(&args.message).await?;
        to_json(&outcome)
    }
}

pub struct PushTool;

#[async_trait]
impl ToolSpec for PushTool {
    const NAME: &'static str = "git_push";
    const DESCRIPTION: &'static str =
        "Push the current branch to origin (or specified remote/branch)";

    type Args = PushArgs;

    async fn run(&self, vcs: &dyn VersionControl, args: PushArgs) -> ToolOutcome {
        let branch = match args.branch.filter(|b| !b.is_empty()) {
            Some(branch) => branch,
            None => {
                let status = vcs.status().await?;
                let branch = status.branch.ok_or(ToolError::DetachedHead)?;
                debug!(%branch, "resolved current branch");
                branch
            }
        };

        let outcome = vcs.push(&args.remote, &branch).await?;
        to_json(&outcome)
    }
}
