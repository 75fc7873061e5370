//! Utility functions for string and value formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_class_date, format_duration, format_optional, truncate_string};
