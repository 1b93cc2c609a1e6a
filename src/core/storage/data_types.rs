// src/core/storage/data_types.rs

//! Defines the core data structures for storing lists in the index,
//! such as `StoredList` and the snapshot record type.

use bytes::Bytes;
use std::collections::VecDeque;

/// Opaque tag identifying a snapshot record that belongs to a list.
/// The meaning of the value is owned by the host persistence format.
pub const RECORD_TYPE_LIST: u16 = 1;

/// Opaque tag identifying a snapshot record that replays as a tail-push.
pub const RECORD_MARK_PUSH_TAIL: u16 = 1;

/// The direction of a push operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushDirection {
    Left,
    Right,
}

/// The direction of a pop operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopDirection {
    Left,
    Right,
}

/// The anchor side for `linsert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    #[default]
    Before,
    After,
}

/// One element-level record emitted during snapshot iteration.
///
/// A host persistence layer writes these out verbatim and later feeds them
/// back through [`crate::ListIndex::apply_record`] to rebuild the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub key: Bytes,
    pub value: Bytes,
    pub record_type: u16,
    pub mark: u16,
}

impl SnapshotRecord {
    /// Creates a record that replays as a push to the tail of `key`'s list.
    pub fn push_tail(key: Bytes, value: Bytes) -> Self {
        Self {
            key,
            value,
            record_type: RECORD_TYPE_LIST,
            mark: RECORD_MARK_PUSH_TAIL,
        }
    }
}

/// A stored list value together with its metadata.
#[derive(Debug, Clone, Default)]
pub struct StoredList {
    /// The elements, head first.
    pub elements: VecDeque<Bytes>,
    /// The calculated size of all elements in bytes, maintained incrementally
    /// by every mutating operation.
    pub size: usize,
}

impl StoredList {
    /// Creates a new, empty `StoredList`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the total memory usage of this stored list in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.size
    }
}
