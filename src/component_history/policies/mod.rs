mod column_priority;

pub use column_priority::ColumnPriority;
