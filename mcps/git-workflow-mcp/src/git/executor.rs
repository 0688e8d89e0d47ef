//! Async executor for git CLI commands
//!
//! Used for the operations where the `git` binary is the better backend:
//! raw passthrough commands such as `git diff`, and pushes, which need the
//! user's configured credential helpers and transports.
//!
//! # Example
//!
//! ```rust,ignore
//! use git_workflow_mcp::git::GitCommand;
//!
//! let git = GitCommand::new("git", "/path/to/repo");
//! let output = git.run(&["diff".to_string(), "HEAD~1..HEAD".to_string()]).await?;
//! println!("{}", output.stdout);
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, instrument};

use crate::types::{GitError, GitResult};

/// Captured output of a successful git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A git executable bound to a working directory
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
    cwd: PathBuf,
}

impl GitCommand {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Execute git with the given arguments
    ///
    /// Interactive prompts are disabled, so a push that needs credentials
    /// fails instead of waiting on a terminal that does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The git executable cannot be found or spawned
    /// - The command exits with non-zero status (the error carries stderr)
    #[instrument(skip(self), fields(cmd = %args.join(" ")))]
    pub async fn run(&self, args: &[String]) -> GitResult<CommandOutput> {
        debug!("executing: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::GitNotFound(self.program.clone())
                } else {
                    GitError::Spawn(e)
                }
            })?
            .wait_with_output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            error!(code, stderr = %stderr.trim_end(), "git command failed");
            return Err(GitError::CommandFailed {
                code,
                stderr: stderr.trim_end().to_string(),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_executable() {
        let git = GitCommand::new("definitely-not-a-git-binary", ".");
        let err = git.run(&["status".to_string()]).await.unwrap_err();
        assert!(matches!(err, GitError::GitNotFound(ref p) if p == "definitely-not-a-git-binary"));
    }

    #[tokio::test]
    async fn test_failed_command_carries_stderr() {
        let dir = std::env::temp_dir();
        let git = GitCommand::new("git", &dir);
        // Skipped when git is not installed
        match git.run(&["definitely-not-a-subcommand".to_string()]).await {
            Err(GitError::CommandFailed { code, stderr }) => {
                assert_ne!(code, 0);
                assert!(!stderr.is_empty());
            }
            Err(GitError::GitNotFound(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
