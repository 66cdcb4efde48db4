use super::component_record::{ComponentRecord, IMAGE_REF_NAME_KEY, IMAGE_VERSION_KEY};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dimensions offered for filtering unless configured otherwise
pub const DEFAULT_DIMENSIONS: [&str; 2] = [IMAGE_VERSION_KEY, IMAGE_REF_NAME_KEY];

/// Distinct values available for one dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptionSet {
    pub dimension: String,
    pub values: Vec<String>,
}

/// Option sets for every configured dimension, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    sets: Vec<FilterOptionSet>,
}

impl FilterOptions {
    pub fn new(sets: Vec<FilterOptionSet>) -> Self {
        Self { sets }
    }

    /// Empty option sets for the given dimensions
    pub fn empty(dimensions: &[String]) -> Self {
        Self::new(
            dimensions
                .iter()
                .map(|dimension| FilterOptionSet {
                    dimension: dimension.clone(),
                    values: Vec::new(),
                })
                .collect(),
        )
    }

    pub fn get(&self, dimension: &str) -> Option<&[String]> {
        self.sets
            .iter()
            .find(|set| set.dimension == dimension)
            .map(|set| set.values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterOptionSet> {
        self.sets.iter()
    }
}

impl Serialize for FilterOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sets.len()))?;
        for set in &self.sets {
            map.serialize_entry(&set.dimension, &set.values)?;
        }
        map.end()
    }
}

/// Chosen values per dimension
///
/// Serializes as a JSON object mapping each dimension to an array of
/// strings. A dimension with no chosen values places no constraint on
/// the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
    values: BTreeMap<String, Vec<String>>,
}

impl FilterSelection {
    /// Selection with every given dimension present and empty
    pub fn with_dimensions(dimensions: &[String]) -> Self {
        Self {
            values: dimensions
                .iter()
                .map(|dimension| (dimension.clone(), Vec::new()))
                .collect(),
        }
    }

    pub fn values(&self, dimension: &str) -> &[String] {
        self.values
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Replaces the chosen values of one dimension. Repeated values keep
    /// their first occurrence only.
    pub fn set(&mut self, dimension: &str, values: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        self.values.insert(dimension.to_string(), unique);
    }

    /// Overlays another selection: its dimensions replace ours, the rest
    /// keep their current values.
    pub fn merge(&mut self, other: FilterSelection) {
        for (dimension, values) in other.values {
            self.set(&dimension, values);
        }
    }

    /// True when the record satisfies every given dimension's selection
    pub fn matches(&self, record: &ComponentRecord, dimensions: &[String]) -> bool {
        dimensions.iter().all(|dimension| {
            let chosen = self.values(dimension);
            chosen.is_empty()
                || record
                    .get(dimension)
                    .is_some_and(|value| chosen.iter().any(|c| c == value))
        })
    }
}
