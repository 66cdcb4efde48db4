pub mod column_schema;
pub mod component_record;
pub mod filter;
pub mod pipeline_status;
pub mod revision;

pub use column_schema::{Column, ColumnSchema};
pub use component_record::{
    ComponentRecord, COMMIT_KEY, IMAGE_REF_NAME_KEY, IMAGE_VERSION_KEY, NOT_AVAILABLE,
};
pub use filter::{FilterOptionSet, FilterOptions, FilterSelection, DEFAULT_DIMENSIONS};
pub use pipeline_status::PipelineStatus;
pub use revision::{AccessToken, PathTemplate, Repository, RevisionRef};
