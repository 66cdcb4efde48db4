use crate::component_history::domain::{ComponentRecord, FilterOptions, FilterSelection};
use crate::ports::outbound::SelectionStore;
use crate::shared::error::HistoryError;
use crate::shared::Result;

/// Store key under which the selection is persisted
pub const FILTER_VALUES_KEY: &str = "filterValues";

/// FilterEngine - multi-select filtering with persisted selection
///
/// Within one dimension chosen values are alternatives; across dimensions
/// every constraint must hold. The selection is written back to the store
/// after every change.
pub struct FilterEngine<S: SelectionStore> {
    store: S,
    dimensions: Vec<String>,
    selection: FilterSelection,
    options: FilterOptions,
}

impl<S: SelectionStore> FilterEngine<S> {
    /// Creates an engine and restores the persisted selection
    ///
    /// The stored selection is merged onto an empty selection for every
    /// dimension. A stored value that is not a valid selection is ignored
    /// with a warning.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read
    pub fn load(store: S, dimensions: Vec<String>) -> Result<Self> {
        let mut selection = FilterSelection::with_dimensions(&dimensions);

        if let Some(stored) = store.load(FILTER_VALUES_KEY)? {
            match serde_json::from_value::<FilterSelection>(stored) {
                Ok(stored) => selection.merge(stored),
                Err(e) => log::warn!(
                    "Ignoring malformed '{}' entry in selection store: {}",
                    FILTER_VALUES_KEY,
                    e
                ),
            }
        }

        let options = FilterOptions::empty(&dimensions);
        Ok(Self {
            store,
            dimensions,
            selection,
            options,
        })
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        self.options = options;
    }

    /// Replaces the chosen values of one dimension and persists the
    /// complete selection
    ///
    /// The in-memory selection only changes once the store accepted it.
    ///
    /// # Errors
    /// Returns an error if the dimension is not filterable or the store
    /// cannot be written
    pub fn update_selection(&mut self, dimension: &str, values: Vec<String>) -> Result<()> {
        if !self.dimensions.iter().any(|d| d == dimension) {
            return Err(HistoryError::Validation {
                message: format!(
                    "'{}' is not a filter dimension. Available dimensions: {}",
                    dimension,
                    self.dimensions.join(", ")
                ),
            }
            .into());
        }

        let mut candidate = self.selection.clone();
        candidate.set(dimension, values);
        self.persist(&candidate)?;
        self.selection = candidate;
        Ok(())
    }

    fn persist(&self, selection: &FilterSelection) -> Result<()> {
        let value = serde_json::to_value(selection)?;
        self.store.save(FILTER_VALUES_KEY, &value)
    }

    pub fn is_selected(&self, record: &ComponentRecord) -> bool {
        self.selection.matches(record, &self.dimensions)
    }

    /// Records of `dataset` that satisfy the current selection, in order
    pub fn apply(&self, dataset: &[ComponentRecord]) -> Vec<ComponentRecord> {
        dataset
            .iter()
            .filter(|record| self.is_selected(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::persistence::InMemorySelectionStore;
    use crate::component_history::domain::RevisionRef;
    use serde_json::{json, Value};

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl SelectionStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &Value) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn dims() -> Vec<String> {
        vec!["IMAGE_VERSION".to_string(), "IMAGE_REF_NAME".to_string()]
    }

    fn record(sha: &str, version: &str) -> ComponentRecord {
        ComponentRecord::new(
            version.to_string(),
            "debian-12".to_string(),
            RevisionRef::new(sha),
        )
    }

    #[test]
    fn test_load_without_stored_selection() {
        let engine = FilterEngine::load(InMemorySelectionStore::new(), dims()).unwrap();
        assert!(engine.selection().values("IMAGE_VERSION").is_empty());
        assert!(engine.selection().values("IMAGE_REF_NAME").is_empty());
        assert_eq!(engine.options().get("IMAGE_VERSION"), Some(&[][..]));
    }

    #[test]
    fn test_load_merges_stored_selection() {
        let store = InMemorySelectionStore::new();
        store
            .save(FILTER_VALUES_KEY, &json!({"IMAGE_VERSION": ["4.1.2"]}))
            .unwrap();

        let engine = FilterEngine::load(store, dims()).unwrap();
        assert_eq!(engine.selection().values("IMAGE_VERSION"), ["4.1.2"]);
        assert!(engine.selection().values("IMAGE_REF_NAME").is_empty());
    }

    #[test]
    fn test_load_ignores_malformed_entry() {
        let store = InMemorySelectionStore::new();
        store
            .save(FILTER_VALUES_KEY, &json!({"IMAGE_VERSION": "4.1.2"}))
            .unwrap();

        let engine = FilterEngine::load(store, dims()).unwrap();
        assert!(engine.selection().values("IMAGE_VERSION").is_empty());
    }

    #[test]
    fn test_scenario_d_single_value_selection() {
        let dataset = vec![record("c2", "4.1.2"), record("c1", "4.1.0")];
        let mut engine = FilterEngine::load(InMemorySelectionStore::new(), dims()).unwrap();

        engine
            .update_selection("IMAGE_VERSION", vec!["4.1.2".to_string()])
            .unwrap();

        let view = engine.apply(&dataset);
        assert_eq!(view, vec![record("c2", "4.1.2")]);
    }

    #[test]
    fn test_empty_selection_keeps_everything() {
        let dataset = vec![record("c2", "4.1.2"), record("c1", "N/A")];
        let engine = FilterEngine::load(InMemorySelectionStore::new(), dims()).unwrap();
        assert_eq!(engine.apply(&dataset), dataset);
    }

    #[test]
    fn test_update_persists_whole_selection() {
        let store = InMemorySelectionStore::new();
        let mut engine = FilterEngine::load(store.clone(), dims()).unwrap();

        engine
            .update_selection("IMAGE_REF_NAME", vec!["debian-12".to_string()])
            .unwrap();

        assert_eq!(
            store.load(FILTER_VALUES_KEY).unwrap(),
            Some(json!({"IMAGE_REF_NAME": ["debian-12"], "IMAGE_VERSION": []}))
        );
    }

    #[test]
    fn test_update_unknown_dimension_is_rejected() {
        let store = InMemorySelectionStore::new();
        let mut engine = FilterEngine::load(store.clone(), dims()).unwrap();

        let result = engine.update_selection("php", vec!["php-8.1.2-0".to_string()]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a filter dimension"));
        assert_eq!(store.load(FILTER_VALUES_KEY).unwrap(), None);
    }

    #[test]
    fn test_persisted_selection_round_trip() {
        let store = InMemorySelectionStore::new();
        let mut engine = FilterEngine::load(store.clone(), dims()).unwrap();
        engine
            .update_selection(
                "IMAGE_VERSION",
                vec!["4.1.2".to_string(), "4.1.0".to_string()],
            )
            .unwrap();
        let saved = engine.selection().clone();

        let reloaded = FilterEngine::load(store, dims()).unwrap();
        assert_eq!(reloaded.selection(), &saved);
    }

    #[test]
    fn test_failed_save_keeps_previous_selection() {
        let dataset = vec![record("c2", "4.1.2"), record("c1", "4.1.0")];
        let mut engine = FilterEngine::load(ReadOnlyStore, dims()).unwrap();

        let result = engine.update_selection("IMAGE_VERSION", vec!["4.1.2".to_string()]);

        assert!(result.unwrap_err().to_string().contains("disk full"));
        assert!(engine.selection().values("IMAGE_VERSION").is_empty());
        assert_eq!(engine.apply(&dataset), dataset);
    }
}
