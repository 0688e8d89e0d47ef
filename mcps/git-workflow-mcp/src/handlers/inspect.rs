//! Read-only handlers: status, log, diff

use async_trait::async_trait;

use crate::error::{ToolError, ToolOutcome};
use crate::git::VersionControl;
use crate::params::{DiffArgs, LogArgs, StatusArgs};

use super::{to_json, ToolSpec};

/// Placeholder returned by git_diff when there are no changes
pub const NO_DIFF: &str = "(no diff)";

pub struct StatusTool;

#[async_trait]
impl ToolSpec for StatusTool {
    const NAME: &'static str = "git_status";
    const DESCRIPTION: &'static str =
        "Get short git status (branch, ahead/behind, staged/unstaged, untracked)";

    type Args = StatusArgs;

    async fn run(&self, vcs: &dyn VersionControl, _args: StatusArgs) -> ToolOutcome {
        let status = vcs.status().await?;
        to_json(&status)
    }
}

pub struct LogTool;

#[async_trait]
impl ToolSpec for LogTool {
    const NAME: &'static str = "git_log";
    const DESCRIPTION: &'static str = "List recent commits";

    type Args = LogArgs;

    async fn run(&self, vcs: &dyn VersionControl, args: LogArgs) -> ToolOutcome {
        let commits = vcs.log(args.max as usize).await?;
        to_json(&commits)
    }
}

pub struct DiffTool;

#[async_trait]
impl ToolSpec for DiffTool {
    const NAME: &'static str = "git_diff";
    const DESCRIPTION: &'static str =
        "Show diff. If no args, shows working tree diff. Optionally provide a path or a commit range (e.g., 'HEAD~1..HEAD').";

    type Args = DiffArgs;

    async fn run(&self, vcs: &dyn VersionControl, args: DiffArgs) -> ToolOutcome {
        let output = vcs.raw(&diff_args(&args)?).await?;
        if output.is_empty() {
            Ok(NO_DIFF.to_string())
        } else {
            Ok(output)
        }
    }
}

/// Build the `git diff` argument list
///
/// The path always follows a `--` so it is never read as an option, and a
/// range starting with `-` is refused for the same reason. Empty strings
/// count as absent.
pub fn diff_args(args: &DiffArgs) -> Result<Vec<String>, ToolError> {
    let mut argv = vec!["diff".to_string()];

    if let Some(range) = args.range.as_deref().filter(|r| !r.is_empty()) {
        if range.starts_with('-') {
            return Err(ToolError::OptionLikeRange(range.to_string()));
        }
        argv.push(range.to_string());
    }
    if let Some(path) = args.path.as_deref().filter(|p| !p.is_empty()) {
        argv.push("--".to_string());
        argv.push(path.to_string());
    }

    Ok(argv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeVcs;
    use crate::types::{CommitRecord, StatusRecord};

    fn diff(range: Option<&str>, path: Option<&str>) -> DiffArgs {
        DiffArgs {
            range: range.map(String::from),
            path: path.map(String::from),
        }
    }

    #[test]
    fn test_diff_args_plain() {
        assert_eq!(diff_args(&diff(None, None)).unwrap(), vec!["diff"]);
    }

    #[test]
    fn test_diff_args_range_and_path() {
        assert_eq!(
            diff_args(&diff(Some("HEAD~1..HEAD"), Some("src/main.rs"))).unwrap(),
            vec!["diff", "HEAD~1..HEAD", "--", "src/main.rs"]
        );
    }

    #[test]
    fn test_diff_args_path_like_flag() {
        assert_eq!(
            diff_args(&diff(None, Some("--output=/tmp/x"))).unwrap(),
            vec!["diff", "--", "--output=/tmp/x"]
        );
    }

    #[test]
    fn test_diff_args_rejects_option_like_range() {
        for range in ["--output=/tmp/x", "-p", "--no-index"] {
            let err = diff_args(&diff(Some(range), None)).unwrap_err();
            assert!(matches!(&err, ToolError::OptionLikeRange(r) if r == range));
        }
    }

    #[tokio::test]
    async fn test_option_like_range_never_reaches_git() {
        let fake = FakeVcs::new();
        let err = DiffTool
            .run(&fake, diff(Some("--output=/tmp/x"), None))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid range '--output=/tmp/x': a revision range must not start with '-'"
        );
        assert!(fake.raw_calls().is_empty());
    }

    #[test]
    fn test_diff_args_empty_strings_ignored() {
        assert_eq!(diff_args(&diff(Some(""), Some(""))).unwrap(), vec!["diff"]);
    }

    #[tokio::test]
    async fn test_diff_placeholder() {
        let fake = FakeVcs::new();
        let text = DiffTool.run(&fake, DiffArgs::default()).await.unwrap();
        assert_eq!(text, NO_DIFF);
        assert_eq!(fake.raw_calls(), vec![vec!["diff".to_string()]]);
    }

    #[tokio::test]
    async fn test_diff_passes_output_through() {
        let fake = FakeVcs::new();
        fake.set_diff_output("diff --git a/x b/x\n+added\n");
        let text = DiffTool.run(&fake, DiffArgs::default()).await.unwrap();
        assert_eq!(text, "diff --git a/x b/x\n+added\n");
    }

    #[tokio::test]
    async fn test_log_limits_and_orders() {
        let fake = FakeVcs::new();
        let text = LogTool.run(&fake, LogArgs { max: 3 }).await.unwrap();
        let commits: Vec<CommitRecord> = serde_json::from_str(&text).unwrap();

        assert_eq!(commits.len(), 3);
        assert!(commits[0].date > commits[1].date);
        assert_eq!(fake.calls(), vec!["log:3"]);
    }

    #[tokio::test]
    async fn test_status_renders_json() {
        let fake = FakeVcs::new();
        let mut status = StatusRecord::clean("/repo", Some("main".to_string()));
        status.untracked.push("notes.txt".to_string());
        status.is_clean = false;
        fake.set_status(status.clone());

        let text = StatusTool.run(&fake, StatusArgs::default()).await.unwrap();
        let parsed: StatusRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, status);
    }
}
