use crate::application::dto::RunSummary;
use crate::application::read_models::HistoryView;
use crate::component_history::domain::{
    Column, ComponentRecord, FilterOptions, FilterSelection, PipelineStatus,
};
use crate::ports::outbound::HistoryFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonDocument<'a> {
    generated_at: String,
    status: &'a PipelineStatus,
    columns: &'a [Column],
    filter_options: &'a FilterOptions,
    selection: &'a FilterSelection,
    total_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_run: Option<&'a RunSummary>,
    records: &'a [ComponentRecord],
}

/// JsonFormatter adapter rendering the filtered view as one JSON document
///
/// Records keep their column order; the timestamp is RFC 3339.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryFormatter for JsonFormatter {
    fn format(&self, view: &HistoryView) -> Result<String> {
        let document = JsonDocument {
            generated_at: view.generated_at.to_rfc3339(),
            status: &view.status,
            columns: view.columns.columns(),
            filter_options: &view.filter_options,
            selection: &view.selection,
            total_records: view.total_records,
            last_run: view.last_run.as_ref(),
            records: &view.records,
        };
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::PipelineSnapshot;
    use crate::component_history::domain::{RevisionRef, DEFAULT_DIMENSIONS};
    use crate::component_history::services::SchemaAggregator;
    use serde_json::{json, Value};

    fn view() -> HistoryView {
        let mut record = ComponentRecord::new(
            "4.1.2".to_string(),
            "debian-12".to_string(),
            RevisionRef::new("c2"),
        );
        record.insert_component("php".to_string(), "php-8.1.2-0".to_string());

        let aggregator = SchemaAggregator::default();
        let aggregation = aggregator.aggregate(vec![Some(record)]);
        let dimensions: Vec<String> = DEFAULT_DIMENSIONS.iter().map(|d| d.to_string()).collect();
        HistoryView::from_snapshot(PipelineSnapshot {
            dataset: aggregation.dataset,
            schema: aggregation.schema,
            filter_options: aggregation.filter_options,
            selection: FilterSelection::with_dimensions(&dimensions),
            dimensions,
            ..PipelineSnapshot::default()
        })
    }

    #[test]
    fn test_json_document_shape() {
        let output = JsonFormatter::new().format(&view()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert!(value["generated_at"].as_str().unwrap().contains('T'));
        assert_eq!(value["status"], json!({"state": "idle"}));
        assert_eq!(value["total_records"], 1);
        assert_eq!(
            value["columns"][0],
            json!({"key": "IMAGE_VERSION", "title": "Image Version"})
        );
        assert_eq!(
            value["filter_options"],
            json!({"IMAGE_VERSION": ["4.1.2"], "IMAGE_REF_NAME": ["debian-12"]})
        );
        assert_eq!(
            value["selection"],
            json!({"IMAGE_REF_NAME": [], "IMAGE_VERSION": []})
        );
        assert!(value.get("last_run").is_none());
    }

    #[test]
    fn test_records_keep_column_order() {
        let output = JsonFormatter::new().format(&view()).unwrap();
        let record_start = output.find("\"records\"").unwrap();
        let records = &output[record_start..];

        let version = records.find("\"IMAGE_VERSION\"").unwrap();
        let php = records.find("\"php\"").unwrap();
        let commit = records.find("\"commit\"").unwrap();
        assert!(version < php && php < commit);
    }
}
