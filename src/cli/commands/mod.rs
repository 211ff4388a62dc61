//! Command implementations.

pub mod completions;
pub mod merge;
pub mod sync;
pub mod version;
