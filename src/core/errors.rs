// src/core/errors.rs

//! Defines the primary error type for the crate.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all possible failures within the index.
/// Using `thiserror` allows for clean error definitions and automatic `From` trait implementations.
#[derive(Error, Debug)]
pub enum ListIndexError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Snapshot Error: {0}")]
    Snapshot(String),

    #[error("Corrupted snapshot record: {0}")]
    Corrupted(String),
}

// Manual implementation of Clone because `std::io::Error` is not cloneable.
// We wrap it in an Arc to allow for cheap, shared cloning.
impl Clone for ListIndexError {
    fn clone(&self) -> Self {
        match self {
            ListIndexError::Io(e) => ListIndexError::Io(Arc::clone(e)),
            ListIndexError::Snapshot(s) => ListIndexError::Snapshot(s.clone()),
            ListIndexError::Corrupted(s) => ListIndexError::Corrupted(s.clone()),
        }
    }
}

impl PartialEq for ListIndexError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ListIndexError::Io(e1), ListIndexError::Io(e2)) => e1.to_string() == e2.to_string(),
            (ListIndexError::Snapshot(s1), ListIndexError::Snapshot(s2)) => s1 == s2,
            (ListIndexError::Corrupted(s1), ListIndexError::Corrupted(s2)) => s1 == s2,
            _ => false,
        }
    }
}

// --- From trait implementations for easy error conversion ---

impl From<std::io::Error> for ListIndexError {
    fn from(e: std::io::Error) -> Self {
        ListIndexError::Io(Arc::new(e))
    }
}

impl From<String> for ListIndexError {
    fn from(s: String) -> Self {
        ListIndexError::Snapshot(s)
    }
}
