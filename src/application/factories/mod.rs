/// Factories selecting adapters from application-level choices
mod formatter_factory;
mod presenter_factory;

pub use formatter_factory::FormatterFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
