use serde::Serialize;
use std::fmt;

/// Lifecycle of the fetch pipeline: `Idle -> Fetching -> (Idle | Error)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Fetching,
    /// The last run failed; the previous dataset is still in place
    Error { message: String },
}

impl PipelineStatus {
    pub fn is_fetching(&self) -> bool {
        matches!(self, PipelineStatus::Fetching)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PipelineStatus::Error { .. })
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStatus::Idle => write!(f, "idle"),
            PipelineStatus::Fetching => write!(f, "fetching"),
            PipelineStatus::Error { message } => write!(f, "error: {}", message),
        }
    }
}
