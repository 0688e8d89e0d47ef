//! In-memory backend for unit tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::VersionControl;
use crate::types::*;

/// Scripted [`VersionControl`] that records the calls made against it
pub(crate) struct FakeVcs {
    repository: AtomicBool,
    readiness_checks: AtomicUsize,
    status: Mutex<StatusRecord>,
    commits: Vec<CommitRecord>,
    diff_output: Mutex<String>,
    push_failure: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
    raw_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeVcs {
    pub(crate) fn new() -> Self {
        Self {
            repository: AtomicBool::new(true),
            readiness_checks: AtomicUsize::new(0),
            status: Mutex::new(StatusRecord::clean("/repo", Some("main".to_string()))),
            commits: (0..25).rev().map(sample_commit).collect(),
            diff_output: Mutex::new(String::new()),
            push_failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            raw_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn not_a_repository() -> Self {
        let fake = Self::new();
        fake.set_repository(false);
        fake
    }

    pub(crate) fn set_repository(&self, repository: bool) {
        self.repository.store(repository, Ordering::SeqCst);
    }

    pub(crate) fn set_status(&self, status: StatusRecord) {
        *self.status.lock().unwrap() = status;
    }

    pub(crate) fn set_diff_output(&self, output: &str) {
        *self.diff_output.lock().unwrap() = output.to_string();
    }

    pub(crate) fn fail_push(&self, message: &str) {
        *self.push_failure.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn readiness_checks(&self) -> usize {
        self.readiness_checks.load(Ordering::SeqCst)
    }

    /// Names of the mutating or querying operations invoked, in order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn raw_calls(&self) -> Vec<Vec<String>> {
        self.raw_calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

fn sample_commit(n: usize) -> CommitRecord {
    let hash = format!("{:040x}", n + 1);
    CommitRecord {
        short_hash: hash[..7].to_string(),
        hash,
        message: format!("commit {}", n),
        author_name: "Test User".to_string(),
        author_email: "test@example.com".to_string(),
        date: Utc.timestamp_opt(1_700_000_000 + n as i64 * 60, 0).unwrap(),
        parent_ids: Vec::new(),
    }
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn is_repository(&self) -> bool {
        self.readiness_checks.fetch_add(1, Ordering::SeqCst);
        self.repository.load(Ordering::SeqCst)
    }

    async fn status(&self) -> GitResult<StatusRecord> {
        self.record("status");
        Ok(self.status.lock().unwrap().clone())
    }

    async fn log(&self, max: usize) -> GitResult<Vec<CommitRecord>> {
        self.record(format!("log:{}", max));
        Ok(self.commits.iter().take(max).cloned().collect())
    }

    async fn raw(&self, args: &[String]) -> GitResult<String> {
        self.record("raw");
        self.raw_calls.lock().unwrap().push(args.to_vec());
        Ok(self.diff_output.lock().unwrap().clone())
    }

    async fn stage_all(&self) -> GitResult<()> {
        self.record("stage_all");
        Ok(())
    }

    async fn commit(&self, message: &str) -> GitResult<CommitOutcome> {
        self.record(format!("commit:{}", message));
        let hash = "a".repeat(40);
        Ok(CommitOutcome {
            short_hash: hash[..7].to_string(),
            hash,
            branch: self.status.lock().unwrap().branch.clone(),
            root: false,
            summary: CommitSummary {
                changes: 1,
                insertions: 1,
                deletions: 0,
            },
        })
    }

    async fn push(&self, remote: &str, branch: &str) -> GitResult<PushOutcome> {
        self.record(format!("push:{}/{}", remote, branch));
        if let Some(stderr) = self.push_failure.lock().unwrap().clone() {
            return Err(GitError::CommandFailed { code: 128, stderr });
        }
        Ok(PushOutcome {
            remote: remote.to_string(),
            branch: branch.to_string(),
            pushed: true,
            output: String::new(),
        })
    }
}
