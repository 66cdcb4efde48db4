use crate::application::dto::{PipelineSnapshot, RunRequest, RunSummary};
use crate::component_history::domain::{
    ColumnSchema, ComponentRecord, FilterOptions, PathTemplate, PipelineStatus,
    DEFAULT_DIMENSIONS,
};
use crate::component_history::policies::ColumnPriority;
use crate::component_history::services::{
    Aggregation, FilterEngine, SchemaAggregator, ScriptParser,
};
use crate::ports::inbound::ComponentHistoryPort;
use crate::ports::outbound::{ContentFetcher, HistoryWalker, ProgressReporter, SelectionStore};
use crate::shared::error::HistoryError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

/// Tunables of the pipeline that do not change between runs
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub path_template: PathTemplate,
    pub parser: ScriptParser,
    pub priority: ColumnPriority,
    /// Columns offered for filtering
    pub dimensions: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            path_template: PathTemplate::default(),
            parser: ScriptParser::default(),
            priority: ColumnPriority::default(),
            dimensions: DEFAULT_DIMENSIONS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Mutable state owned by the pipeline
struct PipelineState<S: SelectionStore> {
    dataset: Vec<ComponentRecord>,
    schema: ColumnSchema,
    filter: FilterEngine<S>,
    status: PipelineStatus,
    last_run: Option<RunSummary>,
}

fn lock_state<S: SelectionStore>(
    state: &Mutex<PipelineState<S>>,
) -> MutexGuard<'_, PipelineState<S>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks the pipeline as `Fetching` for the lifetime of one run
///
/// A guard dropped without `complete` or `fail` (the run future was
/// cancelled) moves the status to `Error` so later runs are not locked out.
struct FetchGuard<'a, S: SelectionStore> {
    state: &'a Mutex<PipelineState<S>>,
    finished: bool,
}

impl<'a, S: SelectionStore> FetchGuard<'a, S> {
    fn acquire(state: &'a Mutex<PipelineState<S>>) -> Result<Self> {
        let mut guard = lock_state(state);
        if guard.status.is_fetching() {
            return Err(HistoryError::RunInProgress.into());
        }
        if guard.status.is_error() {
            log::info!("Retrying after a failed run");
        }
        guard.status = PipelineStatus::Fetching;
        Ok(Self {
            state,
            finished: false,
        })
    }

    fn complete(mut self, aggregation: Aggregation, summary: RunSummary) {
        let mut state = lock_state(self.state);
        state.dataset = aggregation.dataset;
        state.schema = aggregation.schema;
        state.filter.set_options(aggregation.filter_options);
        state.status = PipelineStatus::Idle;
        state.last_run = Some(summary);
        self.finished = true;
    }

    fn fail(mut self, message: String) {
        lock_state(self.state).status = PipelineStatus::Error { message };
        self.finished = true;
    }
}

impl<S: SelectionStore> Drop for FetchGuard<'_, S> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = lock_state(self.state);
        if state.status.is_fetching() {
            log::warn!("Pipeline run was cancelled before completion");
            state.status = PipelineStatus::Error {
                message: "Run was cancelled before completion".to_string(),
            };
        }
    }
}

/// ComponentPipeline - Core use case turning file history into a table
///
/// One run lists the revisions of the tracked file, fetches and parses
/// each revision strictly one at a time, and replaces the dataset with
/// the aggregated result. The state lock is never held across an await.
///
/// # Type Parameters
/// * `H` - HistoryWalker implementation
/// * `C` - ContentFetcher implementation
/// * `S` - SelectionStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ComponentPipeline<H, C, S: SelectionStore, PR> {
    history_walker: H,
    content_fetcher: C,
    progress_reporter: PR,
    parser: ScriptParser,
    aggregator: SchemaAggregator,
    path_template: PathTemplate,
    state: Mutex<PipelineState<S>>,
}

impl<H, C, S, PR> ComponentPipeline<H, C, S, PR>
where
    H: HistoryWalker,
    C: ContentFetcher,
    S: SelectionStore,
    PR: ProgressReporter,
{
    /// Creates a pipeline with default settings
    ///
    /// # Errors
    /// Returns an error if the persisted selection cannot be read
    pub fn new(
        history_walker: H,
        content_fetcher: C,
        selection_store: S,
        progress_reporter: PR,
    ) -> Result<Self> {
        Self::with_settings(
            history_walker,
            content_fetcher,
            selection_store,
            progress_reporter,
            PipelineSettings::default(),
        )
    }

    /// Creates a pipeline and restores the persisted selection
    ///
    /// # Errors
    /// Returns an error if the persisted selection cannot be read
    pub fn with_settings(
        history_walker: H,
        content_fetcher: C,
        selection_store: S,
        progress_reporter: PR,
        settings: PipelineSettings,
    ) -> Result<Self> {
        let filter = FilterEngine::load(selection_store, settings.dimensions.clone())?;
        let aggregator = SchemaAggregator::new(settings.priority, settings.dimensions);
        let schema = aggregator.column_schema(&[]);

        Ok(Self {
            history_walker,
            content_fetcher,
            progress_reporter,
            parser: settings.parser,
            aggregator,
            path_template: settings.path_template,
            state: Mutex::new(PipelineState {
                dataset: Vec::new(),
                schema,
                filter,
                status: PipelineStatus::Idle,
                last_run: None,
            }),
        })
    }

    /// Executes one run
    ///
    /// # Errors
    /// Returns an error if the path parameters are invalid, a run is
    /// already in progress, the history walk fails, or every listed
    /// revision failed to load. The previous dataset survives a failed run.
    pub async fn run(&self, request: RunRequest) -> Result<RunSummary> {
        let path = self
            .path_template
            .render(&request.app_version, &request.os_flavor)?;
        let guard = FetchGuard::acquire(&self.state)?;

        match self.collect(&path, &request).await {
            Ok((aggregation, summary)) => {
                guard.complete(aggregation, summary.clone());
                self.progress_reporter
                    .report_completion(&format!("✅ Component history ready: {}", summary));
                Ok(summary)
            }
            Err(e) => {
                log::error!("Pipeline run failed: {:#}", e);
                guard.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Walks the history and parses every revision
    async fn collect(&self, path: &str, request: &RunRequest) -> Result<(Aggregation, RunSummary)> {
        self.progress_reporter
            .report(&format!("🔍 Listing revisions of {}...", path));
        let revisions = self
            .history_walker
            .list_revisions(path, &request.token)
            .await?;
        let total = revisions.len();
        self.progress_reporter
            .report(&format!("✅ Found {} revision(s)", total));

        let mut records = Vec::with_capacity(total);
        let mut skipped = 0;
        let mut failed = 0;
        let mut last_error = None;

        for (index, revision) in revisions.iter().enumerate() {
            match self
                .content_fetcher
                .fetch_content(path, revision, &request.token)
                .await
            {
                Ok(text) => {
                    let record = self.parser.parse(&text, revision);
                    if record.is_none() {
                        skipped += 1;
                        log::debug!("Revision {} has no component block", revision);
                    }
                    records.push(record);
                }
                Err(e) => {
                    failed += 1;
                    log::warn!("Failed to load revision {}: {:#}", revision, e);
                    let reason = e.to_string();
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Skipping revision {}: {}",
                        revision.short(),
                        reason.lines().next().unwrap_or_default()
                    ));
                    last_error = Some(e);
                }
            }
            self.progress_reporter
                .report_progress(index + 1, total, Some(revision.short()));
        }

        if let Some(error) = last_error {
            if failed == total {
                return Err(error.context(format!("All {} revision(s) failed to load", total)));
            }
        }

        let aggregation = self.aggregator.aggregate(records);
        log::debug!("Column schema: {}", aggregation.schema.keys().join(", "));
        let summary = RunSummary {
            listed: total,
            records: aggregation.dataset.len(),
            skipped,
            failed,
            completed_at: Utc::now(),
        };
        Ok((aggregation, summary))
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        let state = lock_state(&self.state);
        PipelineSnapshot {
            dataset: state.dataset.clone(),
            schema: state.schema.clone(),
            filter_options: state.filter.options().clone(),
            selection: state.filter.selection().clone(),
            dimensions: state.filter.dimensions().to_vec(),
            status: state.status.clone(),
            last_run: state.last_run.clone(),
        }
    }

    pub fn dataset(&self) -> Vec<ComponentRecord> {
        lock_state(&self.state).dataset.clone()
    }

    pub fn column_schema(&self) -> ColumnSchema {
        lock_state(&self.state).schema.clone()
    }

    pub fn filter_options(&self) -> FilterOptions {
        lock_state(&self.state).filter.options().clone()
    }

    /// Replaces one dimension's selection, persists it and returns the
    /// filtered dataset
    ///
    /// # Errors
    /// Returns an error if the dimension is not filterable or the store
    /// cannot be written
    pub fn update_selection(
        &self,
        dimension: &str,
        values: Vec<String>,
    ) -> Result<Vec<ComponentRecord>> {
        let mut state = lock_state(&self.state);
        state.filter.update_selection(dimension, values)?;
        Ok(state.filter.apply(&state.dataset))
    }

    pub fn filtered_view(&self) -> Vec<ComponentRecord> {
        let state = lock_state(&self.state);
        state.filter.apply(&state.dataset)
    }

    pub fn status(&self) -> PipelineStatus {
        lock_state(&self.state).status.clone()
    }
}

#[async_trait]
impl<H, C, S, PR> ComponentHistoryPort for ComponentPipeline<H, C, S, PR>
where
    H: HistoryWalker,
    C: ContentFetcher,
    S: SelectionStore,
    PR: ProgressReporter,
{
    async fn run(&self, request: RunRequest) -> Result<RunSummary> {
        ComponentPipeline::run(self, request).await
    }

    fn snapshot(&self) -> PipelineSnapshot {
        ComponentPipeline::snapshot(self)
    }

    fn dataset(&self) -> Vec<ComponentRecord> {
        ComponentPipeline::dataset(self)
    }

    fn column_schema(&self) -> ColumnSchema {
        ComponentPipeline::column_schema(self)
    }

    fn filter_options(&self) -> FilterOptions {
        ComponentPipeline::filter_options(self)
    }

    fn update_selection(
        &self,
        dimension: &str,
        values: Vec<String>,
    ) -> Result<Vec<ComponentRecord>> {
        ComponentPipeline::update_selection(self, dimension, values)
    }

    fn filtered_view(&self) -> Vec<ComponentRecord> {
        ComponentPipeline::filtered_view(self)
    }

    fn status(&self) -> PipelineStatus {
        ComponentPipeline::status(self)
    }
}
