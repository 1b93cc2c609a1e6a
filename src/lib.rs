// src/lib.rs

pub mod core;

// Re-export
pub use crate::core::ListIndexError;
pub use crate::core::storage::data_types::{InsertPosition, SnapshotRecord};
pub use crate::core::storage::list_index::ListIndex;
