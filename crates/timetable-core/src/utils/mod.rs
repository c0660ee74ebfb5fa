//! Utility functions for string comparison and formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{cmp_natural, unescape_text};
