use crate::component_history::domain::{AccessToken, RevisionRef};
use crate::shared::Result;
use async_trait::async_trait;

/// ContentFetcher port for reading a file as it existed at one revision
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches the fully decoded text of `path` at `revision`
    ///
    /// # Errors
    /// Returns an error if the request fails, the response lacks the
    /// content field, or the content cannot be decoded to text.
    async fn fetch_content(
        &self,
        path: &str,
        revision: &RevisionRef,
        token: &AccessToken,
    ) -> Result<String>;
}
