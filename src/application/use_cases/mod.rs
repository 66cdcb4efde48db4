/// Use cases module containing application business logic orchestration
mod component_pipeline;

pub use component_pipeline::{ComponentPipeline, PipelineSettings};
