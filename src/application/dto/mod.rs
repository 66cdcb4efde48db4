/// Data Transfer Objects for application layer
///
/// DTOs carry requests into the pipeline and results back out to the
/// adapters, keeping the domain layer isolated.
mod output_format;
mod pipeline_snapshot;
mod run_request;
mod run_summary;

pub use output_format::OutputFormat;
pub use pipeline_snapshot::PipelineSnapshot;
pub use run_request::RunRequest;
pub use run_summary::RunSummary;
