/// Persistence adapters implementing the SelectionStore port
mod file_selection_store;
mod in_memory_selection_store;

pub use file_selection_store::FileSelectionStore;
pub use in_memory_selection_store::InMemorySelectionStore;
