use crate::shared::Result;
use serde_json::Value;

/// SelectionStore port - durable key/value storage for UI state
///
/// Values are JSON documents. Implementations overwrite the whole value
/// of a key on every save.
pub trait SelectionStore: Send {
    /// Reads the value stored under `key`, or `None` if nothing was saved yet
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the value stored under `key`
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}
