//! component-history - component version tracking across Dockerfile history
//!
//! This library walks the commit history of one Dockerfile on GitHub,
//! extracts the image labels and the `COMPONENTS=( ... )` block of every
//! revision, and turns them into a filterable table of component versions.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`component_history`): records, schema, filters and the parser
//! - **Application Layer** (`application`): the pipeline use case, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use component_history::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let client = GitHubClient::new("bitnami/containers".parse()?)?;
//! let pipeline = ComponentPipeline::new(
//!     client.clone(),
//!     client,
//!     InMemorySelectionStore::new(),
//!     StderrProgressReporter::new(),
//! )?;
//!
//! let request = RunRequest::with_defaults(AccessToken::new("ghp_example"));
//! pipeline.run(request).await?;
//!
//! let view = HistoryView::from_snapshot(pipeline.snapshot());
//! println!("{}", MarkdownFormatter::new().format(&view)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod component_history;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::GitHubClient;
    pub use crate::adapters::outbound::persistence::{
        FileSelectionStore, InMemorySelectionStore,
    };
    pub use crate::application::dto::{OutputFormat, PipelineSnapshot, RunRequest, RunSummary};
    pub use crate::application::read_models::HistoryView;
    pub use crate::application::use_cases::{ComponentPipeline, PipelineSettings};
    pub use crate::component_history::domain::{
        AccessToken, ColumnSchema, ComponentRecord, FilterOptions, FilterSelection, PathTemplate,
        PipelineStatus, Repository, RevisionRef,
    };
    pub use crate::component_history::services::{FilterEngine, SchemaAggregator, ScriptParser};
    pub use crate::ports::inbound::ComponentHistoryPort;
    pub use crate::ports::outbound::{
        ContentFetcher, HistoryFormatter, HistoryWalker, OutputPresenter, ProgressReporter,
        SelectionStore,
    };
    pub use crate::shared::error::HistoryError;
    pub use crate::shared::Result;
}
