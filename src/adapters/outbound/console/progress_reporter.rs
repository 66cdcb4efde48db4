use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};

const BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the rendered table
/// on stdout. Uses indicatif for the per-revision progress bar.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn bar_slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.progress_bar
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.bar_slot();
        if let Some(pb) = slot.as_ref() {
            pb.set_length(total as u64);
            return pb.clone();
        }

        let pb = ProgressBar::new(total as u64);
        match ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("=>-")),
            Err(e) => log::debug!("Falling back to default progress style: {}", e),
        }
        *slot = Some(pb.clone());
        pb
    }

    /// Clears the bar so the next run starts a fresh one
    fn finish_progress_bar(&self) {
        if let Some(pb) = self.bar_slot().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        match self.bar_slot().as_ref() {
            Some(pb) => pb.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        match self.bar_slot().as_ref() {
            Some(pb) => pb.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        reporter.report("🔍 Listing revisions");
        reporter.report_progress(1, 3, Some("abc1234"));
        reporter.report_error("⚠️  Skipping revision");
        reporter.report_progress(3, 3, None);
        reporter.report_completion("✅ Done");
        assert!(reporter.bar_slot().is_none());
    }

    #[test]
    fn test_progress_bar_is_reused_within_a_run() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 2, None);
        reporter.report_progress(2, 2, None);
        assert_eq!(
            reporter.bar_slot().as_ref().map(|pb| pb.position()),
            Some(2)
        );
    }

    #[test]
    fn test_reporter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StderrProgressReporter>();
    }
}
