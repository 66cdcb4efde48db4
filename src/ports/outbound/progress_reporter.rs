/// ProgressReporter port for reporting progress during a pipeline run
///
/// Revision fetching is slow (one round trip per commit), so the pipeline
/// reports what it is doing through this port instead of writing to the
/// terminal directly.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports per-revision progress
    ///
    /// # Arguments
    /// * `current` - Number of revisions processed so far
    /// * `total` - Number of revisions listed
    /// * `message` - Optional message to include (e.g. the short commit id)
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of a run
    fn report_completion(&self, message: &str);
}
