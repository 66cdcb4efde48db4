/// Mock implementations for testing
mod mock_content_fetcher;
mod mock_history_walker;
mod mock_progress_reporter;

pub use mock_content_fetcher::MockContentFetcher;
pub use mock_history_walker::MockHistoryWalker;
pub use mock_progress_reporter::MockProgressReporter;
