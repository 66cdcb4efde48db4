use crate::application::dto::{PipelineSnapshot, RunSummary};
use crate::component_history::domain::{
    ColumnSchema, ComponentRecord, FilterOptions, FilterSelection, PipelineStatus,
};
use chrono::{DateTime, Utc};

/// Filtered component table ready for rendering
#[derive(Debug, Clone)]
pub struct HistoryView {
    pub generated_at: DateTime<Utc>,
    pub columns: ColumnSchema,
    /// Records that passed the current selection, in revision order
    pub records: Vec<ComponentRecord>,
    pub filter_options: FilterOptions,
    pub selection: FilterSelection,
    /// Size of the unfiltered dataset
    pub total_records: usize,
    pub status: PipelineStatus,
    pub last_run: Option<RunSummary>,
}

impl HistoryView {
    /// Builds the view of a snapshot, applying its selection
    pub fn from_snapshot(snapshot: PipelineSnapshot) -> Self {
        let records = snapshot.filtered_records();
        Self {
            generated_at: Utc::now(),
            total_records: snapshot.dataset.len(),
            columns: snapshot.schema,
            records,
            filter_options: snapshot.filter_options,
            selection: snapshot.selection,
            status: snapshot.status,
            last_run: snapshot.last_run,
        }
    }

    /// Dimensions that currently constrain the view
    pub fn active_filters(&self) -> Vec<(&str, &[String])> {
        self.selection
            .dimensions()
            .map(|dimension| (dimension, self.selection.values(dimension)))
            .filter(|(_, values)| !values.is_empty())
            .collect()
    }
}
