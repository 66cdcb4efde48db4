use super::revision::RevisionRef;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column key holding the `org.opencontainers.image.version` label
pub const IMAGE_VERSION_KEY: &str = "IMAGE_VERSION";

/// Column key holding the `org.opencontainers.image.ref.name` label
pub const IMAGE_REF_NAME_KEY: &str = "IMAGE_REF_NAME";

/// Column key holding the revision a record was derived from
pub const COMMIT_KEY: &str = "commit";

/// Placeholder for a label that was not found in a revision
pub const NOT_AVAILABLE: &str = "N/A";

/// Component versions bundled by one revision of the build script
///
/// Fields are kept in column order: the two image labels, the components
/// in the order they were first declared, then the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    image_version: String,
    image_ref_name: String,
    components: Vec<(String, String)>,
    commit: RevisionRef,
}

impl ComponentRecord {
    pub fn new(image_version: String, image_ref_name: String, commit: RevisionRef) -> Self {
        Self {
            image_version,
            image_ref_name,
            components: Vec::new(),
            commit,
        }
    }

    /// Sets a component column. A repeated key overwrites the earlier value
    /// but keeps its original position. The commit column cannot be
    /// overridden by a component.
    pub fn insert_component(&mut self, key: String, spec: String) {
        if key == COMMIT_KEY {
            return;
        }
        match self.components.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = spec,
            None => self.components.push((key, spec)),
        }
    }

    pub fn image_version(&self) -> &str {
        &self.image_version
    }

    pub fn image_ref_name(&self) -> &str {
        &self.image_ref_name
    }

    pub fn commit(&self) -> &RevisionRef {
        &self.commit
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &str)> {
        self.components
            .iter()
            .map(|(key, spec)| (key.as_str(), spec.as_str()))
    }

    /// Looks up any column of this record by key
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            IMAGE_VERSION_KEY => Some(self.image_version.as_str()),
            IMAGE_REF_NAME_KEY => Some(self.image_ref_name.as_str()),
            COMMIT_KEY => Some(self.commit.as_str()),
            _ => self
                .components
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, spec)| spec.as_str()),
        }
    }

    /// All `(key, value)` pairs in column order
    pub fn fields(&self) -> Vec<(&str, &str)> {
        let mut fields = Vec::with_capacity(self.components.len() + 3);
        fields.push((IMAGE_VERSION_KEY, self.image_version.as_str()));
        fields.push((IMAGE_REF_NAME_KEY, self.image_ref_name.as_str()));
        fields.extend(self.components());
        fields.push((COMMIT_KEY, self.commit.as_str()));
        fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields().into_iter().map(|(key, _)| key)
    }
}

impl Serialize for ComponentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
