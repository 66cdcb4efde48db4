use crate::application::read_models::HistoryView;
use crate::shared::Result;

/// HistoryFormatter port for rendering the filtered component table
pub trait HistoryFormatter {
    /// Formats the view for presentation
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, view: &HistoryView) -> Result<String>;
}
