mod filter_engine;
mod schema_aggregator;
mod script_parser;

pub use filter_engine::{FilterEngine, FILTER_VALUES_KEY};
pub use schema_aggregator::{Aggregation, SchemaAggregator};
pub use script_parser::ScriptParser;
