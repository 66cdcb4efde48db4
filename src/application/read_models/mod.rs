//! Read models for presentation
//!
//! View-optimized structs built from pipeline snapshots; formatters
//! consume these instead of the pipeline state.

mod history_view;

pub use history_view::HistoryView;
