//! Repository readiness guard
//!
//! Tools that touch the repository call [`ReadinessGuard::ensure_ready`]
//! first. The answer is never cached: each call asks the backend again.

use std::sync::Arc;

use tracing::debug;

use crate::error::ToolError;
use crate::git::VersionControl;

#[derive(Clone)]
pub struct ReadinessGuard {
    vcs: Arc<dyn VersionControl>,
}

impl ReadinessGuard {
    pub fn new(vcs: Arc<dyn VersionControl>) -> Self {
        Self { vcs }
    }

    /// Fail with [`ToolError::NotARepository`] unless the backend is in a work tree
    pub async fn ensure_ready(&self) -> Result<(), ToolError> {
        if self.vcs.is_repository().await {
            Ok(())
        } else {
            debug!("readiness check failed");
            Err(ToolError::NotARepository)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NOT_A_REPOSITORY;
    use crate::git::fake::FakeVcs;

    #[tokio::test]
    async fn test_ready_repository() {
        let guard = ReadinessGuard::new(Arc::new(FakeVcs::new()));
        assert!(guard.ensure_ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_not_a_repository() {
        let guard = ReadinessGuard::new(Arc::new(FakeVcs::not_a_repository()));
        let err = guard.ensure_ready().await.unwrap_err();
        assert_eq!(err.to_string(), NOT_A_REPOSITORY);
    }

    #[tokio::test]
    async fn test_checks_every_time() {
        let fake = Arc::new(FakeVcs::new());
        let guard = ReadinessGuard::new(fake.clone());

        assert!(guard.ensure_ready().await.is_ok());
        fake.set_repository(false);
        assert!(guard.ensure_ready().await.is_err());
        fake.set_repository(true);
        assert!(guard.ensure_ready().await.is_ok());
        assert_eq!(fake.readiness_checks(), 3);
    }
}
