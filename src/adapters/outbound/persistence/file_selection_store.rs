use crate::ports::outbound::SelectionStore;
use crate::shared::error::HistoryError;
use crate::shared::security::{validate_file_size, validate_not_symlink, MAX_STATE_FILE_SIZE};
use crate::shared::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// FileSelectionStore adapter persisting values in a single JSON file
///
/// The file holds one JSON object; each store key is a property of that
/// object. Writes go to a temporary sibling file which is then renamed
/// over the original, so a crash never leaves a half-written state file.
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn state_error(&self, details: impl ToString) -> anyhow::Error {
        HistoryError::StateFile {
            path: self.path.clone(),
            details: details.to_string(),
        }
        .into()
    }

    /// Reads the whole document; a missing file is an empty document and an
    /// unparsable one is discarded with a warning
    fn read_document(&self) -> Result<Map<String, Value>> {
        validate_not_symlink(&self.path, "read").map_err(|e| self.state_error(e))?;

        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.state_error(e)),
        };
        validate_file_size(metadata.len(), &self.path, MAX_STATE_FILE_SIZE)
            .map_err(|e| self.state_error(e))?;

        let content = fs::read_to_string(&self.path).map_err(|e| self.state_error(e))?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) | Err(_) => {
                log::warn!(
                    "State file {} is not a JSON object; starting from an empty state",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    /// Sibling path for atomic writes: the full file name plus `.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        validate_not_symlink(&self.path, "write").map_err(|e| self.state_error(e))?;

        if let Some(parent) = self.path.parent() {
            if parent != Path::new("") && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.state_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = self.temp_path();
        fs::write(&tmp_path, content).map_err(|e| self.state_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.state_error(e))?;

        log::debug!("Saved state file {}", self.path.display());
        Ok(())
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let mut document = self.read_document()?;
        Ok(document.remove(key))
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.clone());
        self.write_document(&document)
    }
}
