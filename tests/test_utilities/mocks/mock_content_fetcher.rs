use async_trait::async_trait;
use component_history::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ContentFetcher serving canned file text per revision
///
/// Revisions without content fail with a decode error.
#[derive(Clone, Default)]
pub struct MockContentFetcher {
    contents: HashMap<String, String>,
    requested: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, revision: &str, text: impl Into<String>) -> Self {
        self.contents.insert(revision.to_string(), text.into());
        self
    }

    /// `(path, revision)` pairs in request order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for MockContentFetcher {
    async fn fetch_content(
        &self,
        path: &str,
        revision: &RevisionRef,
        _token: &AccessToken,
    ) -> Result<String> {
        self.requested
            .lock()
            .unwrap()
            .push((path.to_string(), revision.to_string()));

        match self.contents.get(revision.as_str()) {
            Some(text) => Ok(text.clone()),
            None => Err(HistoryError::Decode {
                revision: revision.to_string(),
                details: "response has no content field".to_string(),
            }
            .into()),
        }
    }
}
