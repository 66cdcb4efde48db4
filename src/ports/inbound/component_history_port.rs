use crate::application::dto::{PipelineSnapshot, RunRequest, RunSummary};
use crate::component_history::domain::{
    ColumnSchema, ComponentRecord, FilterOptions, PipelineStatus,
};
use crate::shared::Result;
use async_trait::async_trait;

/// ComponentHistoryPort - Inbound port for the component history pipeline
///
/// This port is the application's public API: presentation layers start
/// runs, change the filter selection and read cloned state through it.
#[async_trait]
pub trait ComponentHistoryPort: Send + Sync {
    /// Walks the history of the tracked file and rebuilds the dataset
    ///
    /// # Errors
    /// Returns an error if:
    /// - Another run is in progress
    /// - The path parameters are invalid
    /// - The history walk fails
    /// - Every listed revision failed to load
    ///
    /// On failure the previous dataset is kept and the status becomes
    /// `PipelineStatus::Error`.
    async fn run(&self, request: RunRequest) -> Result<RunSummary>;

    /// Copy of the whole pipeline state
    fn snapshot(&self) -> PipelineSnapshot;

    /// All records of the last successful run, newest revision first
    fn dataset(&self) -> Vec<ComponentRecord>;

    fn column_schema(&self) -> ColumnSchema;

    fn filter_options(&self) -> FilterOptions;

    /// Replaces the chosen values of one dimension, persists the selection
    /// and returns the filtered dataset
    ///
    /// # Errors
    /// Returns an error if the dimension is not filterable or the
    /// selection cannot be persisted
    fn update_selection(&self, dimension: &str, values: Vec<String>)
        -> Result<Vec<ComponentRecord>>;

    /// Records of the dataset that satisfy the current selection
    fn filtered_view(&self) -> Vec<ComponentRecord>;

    fn status(&self) -> PipelineStatus;
}
