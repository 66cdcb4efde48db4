use crate::component_history::domain::{AccessToken, RevisionRef};
use crate::shared::Result;
use async_trait::async_trait;

/// HistoryWalker port for enumerating the revisions of a tracked file
///
/// This port abstracts the version-control API that knows which commits
/// touched a path.
#[async_trait]
pub trait HistoryWalker: Send + Sync {
    /// Lists the revisions that touched `path`, most recent first
    ///
    /// Only one page of results is returned; no pagination is performed.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails
    /// - The API returns an error status code (including authentication failures)
    /// - The response cannot be parsed
    async fn list_revisions(&self, path: &str, token: &AccessToken) -> Result<Vec<RevisionRef>>;
}
