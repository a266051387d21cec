// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other pickwick crates

pub mod config;
pub mod record;

// Re-export commonly used types
pub use config::{Filter, PickerConfig, PicklistOption};
pub use record::{DEFAULT_ID_FIELD, Record, RecordSchema, sort_by_title};
