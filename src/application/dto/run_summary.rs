use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics of one completed pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Revisions returned by the history walk
    pub listed: usize,
    /// Revisions that produced a record
    pub records: usize,
    /// Revisions fetched but without a component block
    pub skipped: usize,
    /// Revisions whose content could not be fetched or decoded
    pub failed: usize,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    /// True when some revisions were lost to fetch or decode failures
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} record(s) from {} revision(s)",
            self.records, self.listed
        )?;
        if self.skipped > 0 {
            write!(f, ", {} without a component block", self.skipped)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}
