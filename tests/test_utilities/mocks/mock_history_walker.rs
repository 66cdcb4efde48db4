use async_trait::async_trait;
use component_history::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock HistoryWalker returning a fixed list of revisions
#[derive(Clone, Default)]
pub struct MockHistoryWalker {
    revisions: Vec<String>,
    should_fail: Arc<AtomicBool>,
    yield_before_reply: bool,
    calls: Arc<AtomicUsize>,
}

impl MockHistoryWalker {
    pub fn new(revisions: &[&str]) -> Self {
        Self {
            revisions: revisions.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Every call fails with an authentication error
    pub fn with_failure(self) -> Self {
        self.should_fail.store(true, Ordering::SeqCst);
        self
    }

    /// Suspends once before replying, so a run stays in flight across a poll
    pub fn with_yield(mut self) -> Self {
        self.yield_before_reply = true;
        self
    }

    /// Switches failure on or off for clones sharing this mock
    pub fn set_failure(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryWalker for MockHistoryWalker {
    async fn list_revisions(&self, path: &str, _token: &AccessToken) -> Result<Vec<RevisionRef>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(HistoryError::ApiStatus {
                endpoint: format!("commits?path={}", path),
                status: 401,
                message: "Bad credentials".to_string(),
            }
            .into());
        }
        Ok(self.revisions.iter().map(RevisionRef::new).collect())
    }
}
