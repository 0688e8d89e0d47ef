//! libgit2-backed repository access
//!
//! The repository is located from an explicit working directory given at
//! construction; nothing here reads the process's current directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use git2::{BranchType, ErrorCode, IndexAddOption, Repository, RepositoryState, StatusOptions};
use tracing::{debug, info};

use super::executor::GitCommand;
use super::VersionControl;
use crate::config::Config;
use crate::types::*;

/// A git repository rooted at (or above) a configured directory
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
    git: GitCommand,
}

impl GitRepository {
    pub fn new(workdir: impl Into<PathBuf>, git_bin: impl Into<String>) -> Self {
        let workdir = workdir.into();
        Self {
            git: GitCommand::new(git_bin, workdir.clone()),
            workdir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.repo_path.clone(), config.git_bin.clone())
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open(&self) -> GitResult<Repository> {
        Repository::discover(&self.workdir)
            .map_err(|_| GitError::RepoNotFound(self.workdir.display().to_string()))
    }

    fn read_status(&self) -> GitResult<StatusRecord> {
        let repo = self.open()?;

        let mut status_opts = StatusOptions::new();
        status_opts
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false)
            .renames_head_to_index(true);

        let statuses = repo.statuses(Some(&mut status_opts))?;

        let mut staged = Vec::new();
        let mut unstaged = Vec::new();
        let mut untracked = Vec::new();
        let mut conflicted = Vec::new();

        for entry in statuses.iter() {
            let path = entry.path().unwrap_or("").to_string();
            let status = entry.status();

            if status.is_conflicted() {
                conflicted.push(path);
                continue;
            }
            if status.is_wt_new() && !status.is_index_new() {
                untracked.push(path);
                continue;
            }

            // Index changes (staged)
            let index_change = if status.is_index_new() {
                Some(FileChange::New)
            } else if status.is_index_modified() {
                Some(FileChange::Modified)
            } else if status.is_index_deleted() {
                Some(FileChange::Deleted)
            } else if status.is_index_renamed() {
                Some(FileChange::Renamed)
            } else if status.is_index_typechange() {
                Some(FileChange::Typechange)
            } else {
                None
            };
            if let Some(change) = index_change {
                staged.push(FileStatus {
                    path: path.clone(),
                    status: change,
                    old_path: renamed_from(entry.head_to_index(), change),
                });
            }

            // Working tree changes (unstaged)
            let wt_change = if status.is_wt_modified() {
                Some(FileChange::Modified)
            } else if status.is_wt_deleted() {
                Some(FileChange::Deleted)
            } else if status.is_wt_renamed() {
                Some(FileChange::Renamed)
            } else if status.is_wt_typechange() {
                Some(FileChange::Typechange)
            } else {
                None
            };
            if let Some(change) = wt_change {
                unstaged.push(FileStatus {
                    path,
                    status: change,
                    old_path: renamed_from(entry.index_to_workdir(), change),
                });
            }
        }

        let branch = current_branch(&repo);
        let (tracking, ahead, behind) = match branch.as_deref() {
            Some(name) => tracking_state(&repo, name),
            None => (None, 0, 0),
        };

        let is_clean =
            staged.is_empty() && unstaged.is_empty() && untracked.is_empty() && conflicted.is_empty();

        Ok(StatusRecord {
            repo_path: repo_root(&repo),
            branch,
            tracking,
            ahead,
            behind,
            is_clean,
            staged,
            unstaged,
            untracked,
            conflicted,
        })
    }

    fn read_log(&self, max: usize) -> GitResult<Vec<CommitRecord>> {
        let repo = self.open()?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(git2::Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in revwalk.take(max) {
            let commit = repo.find_commit(oid?)?;
            commits.push(commit_to_record(&commit));
        }

        Ok(commits)
    }

    fn add_all(&self) -> GitResult<()> {
        let repo = self.open()?;
        let mut index = repo.index()?;

        // add_all picks up new and modified files, update_all records deletions
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        debug!("staged all working tree changes");
        Ok(())
    }

    fn create_commit(&self, message: &str) -> GitResult<CommitOutcome> {
        let repo = self.open()?;

        // libgit2 commits would drop MERGE_HEAD and leave the state files behind
        if let Some(operation) = pending_operation(repo.state()) {
            return Err(GitError::OperationInProgress(operation));
        }

        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        let nothing_staged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => tree.is_empty(),
        };
        if nothing_staged {
            return Err(GitError::NothingToCommit);
        }

        let signature = repo.signature()?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        let parent_tree = parent.as_ref().map(|p| p.tree()).transpose()?;
        let stats = repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?
            .stats()?;

        let hash = oid.to_string();
        info!(commit = %hash, "created commit");

        Ok(CommitOutcome {
            short_hash: hash[..7].to_string(),
            hash,
            branch: current_branch(&repo),
            root: parent.is_none(),
            summary: CommitSummary {
                changes: stats.files_changed(),
                insertions: stats.insertions(),
                deletions: stats.deletions(),
            },
        })
    }
}

#[async_trait]
impl VersionControl for GitRepository {
    async fn is_repository(&self) -> bool {
        Repository::discover(&self.workdir)
            .map(|repo| !repo.is_bare())
            .unwrap_or(false)
    }

    async fn status(&self) -> GitResult<StatusRecord> {
        self.read_status()
    }

    async fn log(&self, max: usize) -> GitResult<Vec<CommitRecord>> {
        self.read_log(max)
    }

    async fn raw(&self, args: &[String]) -> GitResult<String> {
        Ok(self.git.run(args).await?.stdout)
    }

    async fn stage_all(&self) -> GitResult<()> {
        self.add_all()
    }

    async fn commit(&self, message: &str) -> GitResult<CommitOutcome> {
        self.create_commit(message)
    }

    async fn push(&self, remote: &str, branch: &str) -> GitResult<PushOutcome> {
        let args = vec![
            "push".to_string(),
            "--".to_string(),
            remote.to_string(),
            branch.to_string(),
        ];
        let output = self.git.run(&args).await?;

        info!(remote, branch, "pushed branch");

        // git reports push progress on stderr
        Ok(PushOutcome {
            remote: remote.to_string(),
            branch: branch.to_string(),
            pushed: true,
            output: output.stderr.trim_end().to_string(),
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Name of the checked-out branch, including an unborn one
///
/// Returns `None` for a detached HEAD.
fn current_branch(repo: &Repository) -> Option<String> {
    match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(String::from),
        Ok(_) => None,
        Err(_) => repo
            .find_reference("HEAD")
            .ok()
            .and_then(|r| r.symbolic_target().map(String::from))
            .map(|target| target.trim_start_matches("refs/heads/").to_string()),
    }
}

/// Name of the multi-step operation a repository is in the middle of
fn pending_operation(state: RepositoryState) -> Option<&'static str> {
    match state {
        RepositoryState::Clean => None,
        RepositoryState::Merge => Some("merge"),
        RepositoryState::Revert | RepositoryState::RevertSequence => Some("revert"),
        RepositoryState::CherryPick | RepositoryState::CherryPickSequence => Some("cherry-pick"),
        RepositoryState::Bisect => Some("bisect"),
        RepositoryState::Rebase
        | RepositoryState::RebaseInteractive
        | RepositoryState::RebaseMerge => Some("rebase"),
        RepositoryState::ApplyMailbox | RepositoryState::ApplyMailboxOrRebase => Some("patch apply"),
    }
}

/// Upstream name and ahead/behind counts for a local branch
fn tracking_state(repo: &Repository, branch: &str) -> (Option<String>, usize, usize) {
    let Ok(local) = repo.find_branch(branch, BranchType::Local) else {
        return (None, 0, 0);
    };
    let Ok(upstream) = local.upstream() else {
        return (None, 0, 0);
    };

    let tracking = upstream.name().ok().flatten().map(String::from);
    let (ahead, behind) = match (local.get().target(), upstream.get().target()) {
        (Some(l), Some(u)) => repo.graph_ahead_behind(l, u).unwrap_or((0, 0)),
        _ => (0, 0),
    };

    (tracking, ahead, behind)
}

fn renamed_from(delta: Option<git2::DiffDelta<'_>>, change: FileChange) -> Option<String> {
    if change != FileChange::Renamed {
        return None;
    }
    delta.and_then(|d| d.old_file().path().map(|p| p.to_string_lossy().to_string()))
}

fn repo_root(repo: &Repository) -> String {
    repo.workdir()
        .unwrap_or_else(|| repo.path())
        .to_string_lossy()
        .to_string()
}

/// Convert git2::Time to chrono DateTime
fn git_time_to_datetime(time: git2::Time) -> DateTime<Utc> {
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn commit_to_record(commit: &git2::Commit) -> CommitRecord {
    let hash = commit.id().to_string();
    CommitRecord {
        short_hash: hash[..7].to_string(),
        hash,
        message: commit.message().unwrap_or("").trim_end().to_string(),
        author_name: commit.author().name().unwrap_or("").to_string(),
        author_email: commit.author().email().unwrap_or("").to_string(),
        date: git_time_to_datetime(commit.author().when()),
        parent_ids: commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}
