use crate::ports::outbound::SelectionStore;
use crate::shared::Result;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// InMemorySelectionStore keeps values for the lifetime of the process
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what the filter engine wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemorySelectionStore {
    entries: Arc<DashMap<String, Value>>,
}

impl InMemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for InMemorySelectionStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
