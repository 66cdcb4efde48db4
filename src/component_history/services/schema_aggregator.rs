use crate::component_history::domain::{
    ColumnSchema, ComponentRecord, FilterOptionSet, FilterOptions, COMMIT_KEY, DEFAULT_DIMENSIONS,
    NOT_AVAILABLE,
};
use crate::component_history::policies::ColumnPriority;

/// Output of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub dataset: Vec<ComponentRecord>,
    pub schema: ColumnSchema,
    pub filter_options: FilterOptions,
}

/// SchemaAggregator - combines per-revision records into one table
///
/// The dynamic part of the schema is the union of the keys of *all*
/// records, in first-seen order, so columns introduced by later revisions
/// are not hidden.
#[derive(Debug, Clone)]
pub struct SchemaAggregator {
    priority: ColumnPriority,
    dimensions: Vec<String>,
}

impl SchemaAggregator {
    pub fn new(priority: ColumnPriority, dimensions: Vec<String>) -> Self {
        Self {
            priority,
            dimensions,
        }
    }

    /// Keeps the `Some` records in revision order and derives the schema
    /// and filter options from them
    pub fn aggregate<I>(&self, records: I) -> Aggregation
    where
        I: IntoIterator<Item = Option<ComponentRecord>>,
    {
        let dataset: Vec<ComponentRecord> = records.into_iter().flatten().collect();
        let schema = self.column_schema(&dataset);
        let filter_options = self.filter_options(&dataset);
        Aggregation {
            dataset,
            schema,
            filter_options,
        }
    }

    /// Prioritized columns, then every other key in first-seen order, then `commit`
    pub fn column_schema(&self, dataset: &[ComponentRecord]) -> ColumnSchema {
        let mut keys = self.priority.prioritized_keys();
        for record in dataset {
            for key in record.keys() {
                if key != COMMIT_KEY && !keys.iter().any(|k| k == key) {
                    keys.push(key.to_string());
                }
            }
        }
        keys.push(COMMIT_KEY.to_string());

        ColumnSchema::new(keys.iter().map(|key| ColumnPriority::column(key)).collect())
    }

    /// Distinct values per dimension in first-seen order, without the sentinel
    pub fn filter_options(&self, dataset: &[ComponentRecord]) -> FilterOptions {
        let sets = self
            .dimensions
            .iter()
            .map(|dimension| {
                let mut values: Vec<String> = Vec::new();
                for value in dataset.iter().filter_map(|record| record.get(dimension)) {
                    if value != NOT_AVAILABLE && !values.iter().any(|v| v == value) {
                        values.push(value.to_string());
                    }
                }
                FilterOptionSet {
                    dimension: dimension.clone(),
                    values,
                }
            })
            .collect();
        FilterOptions::new(sets)
    }
}

impl Default for SchemaAggregator {
    fn default() -> Self {
        Self::new(
            ColumnPriority::default(),
            DEFAULT_DIMENSIONS.iter().map(|d| d.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_history::domain::RevisionRef;

    fn record(sha: &str, version: &str, components: &[(&str, &str)]) -> ComponentRecord {
        let mut record = ComponentRecord::new(
            version.to_string(),
            "debian-12".to_string(),
            RevisionRef::new(sha),
        );
        for (key, spec) in components {
            record.insert_component(key.to_string(), spec.to_string());
        }
        record
    }

    #[test]
    fn test_aggregate_drops_none_and_keeps_order() {
        let aggregation = SchemaAggregator::default().aggregate(vec![
            Some(record("c3", "4.1.2", &[])),
            None,
            Some(record("c1", "4.1.0", &[])),
            None,
        ]);

        let commits: Vec<&str> = aggregation
            .dataset
            .iter()
            .map(|r| r.commit().as_str())
            .collect();
        assert_eq!(commits, vec!["c3", "c1"]);
    }

    #[test]
    fn test_schema_is_union_of_all_records() {
        let aggregation = SchemaAggregator::default().aggregate(vec![
            Some(record("c2", "4.1.2", &[("php", "php-8.1.2-0"), ("gosu", "gosu-1.16.0")])),
            Some(record("c1", "4.1.0", &[("mysql", "mysql-client-10.6"), ("gosu", "gosu-1.14.0")])),
        ]);

        assert_eq!(
            aggregation.schema.keys(),
            vec![
                "IMAGE_VERSION",
                "IMAGE_REF_NAME",
                "moodle",
                "php",
                "apache",
                "gosu",
                "mysql",
                "commit"
            ]
        );
        assert_eq!(aggregation.schema.columns()[5].title, "Gosu");
    }

    #[test]
    fn test_schema_for_empty_dataset() {
        let schema = SchemaAggregator::default().column_schema(&[]);
        assert_eq!(
            schema.keys(),
            vec!["IMAGE_VERSION", "IMAGE_REF_NAME", "moodle", "php", "apache", "commit"]
        );
    }

    #[test]
    fn test_filter_options_exclude_sentinel_and_duplicates() {
        let aggregation = SchemaAggregator::default().aggregate(vec![
            Some(record("c4", "4.1.2", &[])),
            Some(record("c3", "N/A", &[])),
            Some(record("c2", "4.1.2", &[])),
            Some(record("c1", "4.1.0", &[])),
        ]);

        assert_eq!(
            aggregation.filter_options.get("IMAGE_VERSION"),
            Some(&["4.1.2".to_string(), "4.1.0".to_string()][..])
        );
        assert_eq!(
            aggregation.filter_options.get("IMAGE_REF_NAME"),
            Some(&["debian-12".to_string()][..])
        );
    }

    #[test]
    fn test_filter_options_only_sentinel_values() {
        let mut only_na = ComponentRecord::new(
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            RevisionRef::new("c1"),
        );
        only_na.insert_component("php".to_string(), "php-8.1.2-0".to_string());

        let options = SchemaAggregator::default().filter_options(&[only_na]);
        assert_eq!(options.get("IMAGE_VERSION"), Some(&[][..]));
        assert_eq!(options.get("IMAGE_REF_NAME"), Some(&[][..]));
    }

    #[test]
    fn test_component_dimension() {
        let aggregator = SchemaAggregator::new(ColumnPriority::default(), vec!["php".to_string()]);
        let options = aggregator.filter_options(&[
            record("c2", "4.1.2", &[("php", "php-8.1.2-0")]),
            record("c1", "4.1.0", &[]),
        ]);
        assert_eq!(options.get("php"), Some(&["php-8.1.2-0".to_string()][..]));
    }
}
