use super::RunSummary;
use crate::component_history::domain::{
    ColumnSchema, ComponentRecord, FilterOptions, FilterSelection, PipelineStatus,
};

/// Point-in-time copy of the pipeline state handed to presentation
///
/// Holding a snapshot never blocks the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSnapshot {
    pub dataset: Vec<ComponentRecord>,
    pub schema: ColumnSchema,
    pub filter_options: FilterOptions,
    pub selection: FilterSelection,
    pub dimensions: Vec<String>,
    pub status: PipelineStatus,
    pub last_run: Option<RunSummary>,
}

impl PipelineSnapshot {
    /// Records of the dataset that satisfy the selection, in revision order
    pub fn filtered_records(&self) -> Vec<ComponentRecord> {
        self.dataset
            .iter()
            .filter(|record| self.selection.matches(record, &self.dimensions))
            .cloned()
            .collect()
    }
}
