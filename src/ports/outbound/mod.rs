/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (version-control API, durable
/// storage, console, output destinations).
pub mod content_fetcher;
pub mod history_formatter;
pub mod history_walker;
pub mod output_presenter;
pub mod progress_reporter;
pub mod selection_store;

pub use content_fetcher::ContentFetcher;
pub use history_formatter::HistoryFormatter;
pub use history_walker::HistoryWalker;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use selection_store::SelectionStore;
