use crate::component_history::domain::{
    Column, COMMIT_KEY, IMAGE_REF_NAME_KEY, IMAGE_VERSION_KEY,
};

/// ColumnPriority policy for ordering and titling dataset columns
///
/// Column order:
/// 1. `IMAGE_VERSION`, `IMAGE_REF_NAME`
/// 2. preferred component columns (configurable, `moodle`, `php`, `apache` by default)
/// 3. every other discovered column, in first-seen order
/// 4. `commit`
#[derive(Debug, Clone)]
pub struct ColumnPriority {
    preferred: Vec<String>,
}

impl ColumnPriority {
    pub const DEFAULT_PREFERRED: [&'static str; 3] = ["moodle", "php", "apache"];

    pub fn new(preferred: Vec<String>) -> Self {
        Self { preferred }
    }

    /// The fixed image columns followed by the preferred component columns
    pub fn prioritized_keys(&self) -> Vec<String> {
        let mut keys = vec![IMAGE_VERSION_KEY.to_string(), IMAGE_REF_NAME_KEY.to_string()];
        for key in &self.preferred {
            if !keys.contains(key) && key != COMMIT_KEY {
                keys.push(key.clone());
            }
        }
        keys
    }

    /// Human-readable title for a column key
    pub fn title_for(key: &str) -> String {
        match key {
            IMAGE_VERSION_KEY => "Image Version".to_string(),
            IMAGE_REF_NAME_KEY => "Image Ref Name".to_string(),
            COMMIT_KEY => "Commit".to_string(),
            _ => {
                let mut chars = key.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    pub fn column(key: &str) -> Column {
        Column {
            key: key.to_string(),
            title: Self::title_for(key),
        }
    }
}

impl Default for ColumnPriority {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PREFERRED
                .iter()
                .map(|key| key.to_string())
                .collect(),
        )
    }
}
