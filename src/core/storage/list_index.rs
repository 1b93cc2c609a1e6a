// src/core/storage/list_index.rs

//! The in-memory list index engine: a keyed collection of ordered sequences
//! of byte-string elements with Redis-style list semantics.

use crate::core::errors::ListIndexError;
use crate::core::storage::data_types::{
    InsertPosition, PopDirection, PushDirection, RECORD_MARK_PUSH_TAIL, RECORD_TYPE_LIST,
    SnapshotRecord, StoredList,
};
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// A keyed index of lists.
///
/// One instance owns its entire key space. Every operation assumes exclusive
/// access for its duration; callers with concurrent access must serialize
/// operations externally.
#[derive(Debug, Clone, Default)]
pub struct ListIndex {
    /// Saves the list of a specified key.
    record: HashMap<Bytes, StoredList>,
}

impl ListIndex {
    /// Creates a new, empty list index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts all the specified values at the head of the list stored at `key`.
    /// If the key does not exist, it is created as an empty list before performing
    /// the push operations. Returns the length of the list after the push.
    pub fn lpush(&mut self, key: Bytes, values: &[Bytes]) -> usize {
        self.push(PushDirection::Left, key, values)
    }

    /// Inserts all the specified values at the tail of the list stored at `key`.
    /// If the key does not exist, it is created as an empty list before performing
    /// the push operations. Returns the length of the list after the push.
    pub fn rpush(&mut self, key: Bytes, values: &[Bytes]) -> usize {
        self.push(PushDirection::Right, key, values)
    }

    /// Removes and returns the first element of the list stored at `key`.
    pub fn lpop(&mut self, key: &Bytes) -> Option<Bytes> {
        self.pop(PopDirection::Left, key)
    }

    /// Removes and returns the last element of the list stored at `key`.
    pub fn rpop(&mut self, key: &Bytes) -> Option<Bytes> {
        self.pop(PopDirection::Right, key)
    }

    /// Returns the element at `index` in the list stored at `key`.
    ///
    /// The index is zero-based. Negative indices designate elements starting at
    /// the tail of the list: -1 is the last element, -2 the penultimate, and so on.
    pub fn lindex(&self, key: &Bytes, index: i64) -> Option<Bytes> {
        let list = self.record.get(key)?;
        let at = Self::normalize_index(list.len() as i64, index)?;
        list.elements.get(at).cloned()
    }

    /// Sets the list element at `index` to `value`.
    ///
    /// Returns `false` when the key holds no list or the index is out of range.
    pub fn lset(&mut self, key: &Bytes, index: i64, value: Bytes) -> bool {
        let Some(list) = self.record.get_mut(key) else {
            return false;
        };
        let Some(at) = Self::normalize_index(list.len() as i64, index) else {
            return false;
        };
        let Some(old_element) = list.elements.get_mut(at) else {
            return false;
        };

        let mem_diff = value.len() as isize - old_element.len() as isize;
        *old_element = value;

        if mem_diff > 0 {
            list.size = list.size.saturating_add(mem_diff as usize);
        } else {
            list.size = list.size.saturating_sub((-mem_diff) as usize);
        }
        true
    }

    /// Inserts `element` in the list stored at `key`, either before or after the
    /// first occurrence of `pivot`.
    ///
    /// Returns the new length of the list, or -1 when the pivot is not found or
    /// the key holds no list.
    pub fn linsert(
        &mut self,
        key: &Bytes,
        position: InsertPosition,
        pivot: &Bytes,
        element: Bytes,
    ) -> i64 {
        let Some(list) = self.record.get_mut(key) else {
            return -1;
        };
        let Some(pos) = list.elements.iter().position(|x| x == pivot) else {
            return -1;
        };

        let insert_at = match position {
            InsertPosition::Before => pos,
            InsertPosition::After => pos + 1,
        };
        list.size += element.len();
        list.elements.insert(insert_at, element);
        list.len() as i64
    }

    /// Removes occurrences of elements equal to `value` from the list stored at `key`.
    ///
    /// The `count` argument influences the operation in the following ways:
    /// - `count > 0`: remove elements equal to `value` moving from head to tail.
    /// - `count < 0`: remove elements equal to `value` moving from tail to head.
    /// - `count = 0`: remove all elements equal to `value`.
    ///
    /// Returns the number of removed elements.
    pub fn lrem(&mut self, key: &Bytes, value: &Bytes, count: i64) -> usize {
        let Some(list) = self.record.get_mut(key) else {
            return 0;
        };

        let mut removed = 0usize;
        let mut mem_freed = 0usize;
        let element_len = value.len();

        if count > 0 {
            // Remove from head to tail using an in-place retain.
            let limit = count as usize;
            list.elements.retain(|val| {
                if removed < limit && val == value {
                    removed += 1;
                    mem_freed += element_len;
                    false
                } else {
                    true
                }
            });
        } else if count < 0 {
            // Remove from tail to head with a single reverse pass into a fresh deque.
            let limit = count.unsigned_abs() as usize;
            let mut kept = VecDeque::with_capacity(list.elements.len());
            for item in list.elements.iter().rev() {
                if removed < limit && item == value {
                    removed += 1;
                    mem_freed += element_len;
                } else {
                    kept.push_front(item.clone());
                }
            }
            list.elements = kept;
        } else {
            // count == 0: remove all occurrences.
            let original_len = list.elements.len();
            list.elements.retain(|val| {
                if val == value {
                    mem_freed += element_len;
                    false
                } else {
                    true
                }
            });
            removed = original_len - list.elements.len();
        }

        list.size -= mem_freed;
        removed
    }

    /// Returns the specified elements of the list stored at `key`, head first.
    ///
    /// `start` and `stop` are zero-based and may be negative to indicate offsets
    /// from the tail of the list. Out-of-range offsets are clamped; an inverted
    /// range yields an empty result.
    pub fn lrange(&self, key: &Bytes, start: i64, stop: i64) -> Vec<Bytes> {
        let Some(list) = self.record.get(key) else {
            return Vec::new();
        };
        if list.is_empty() {
            return Vec::new();
        }

        let len = list.len() as i64;
        let (start, stop) = Self::normalize_range(len, start, stop);
        if start > stop || start >= len {
            return Vec::new();
        }

        let span = (stop - start + 1) as usize;
        let mid = len >> 1;

        // Walk whichever end is closer to the requested window.
        if stop <= mid || stop - mid < mid - start {
            list.elements
                .iter()
                .skip(start as usize)
                .take(span)
                .cloned()
                .collect()
        } else {
            let mut values: Vec<Bytes> = list
                .elements
                .iter()
                .rev()
                .skip((len - 1 - stop) as usize)
                .take(span)
                .cloned()
                .collect();
            values.reverse();
            values
        }
    }

    /// Trims the list stored at `key` so that it contains only the elements in
    /// the specified range, with `start` and `stop` interpreted as in [`Self::lrange`].
    ///
    /// Trimming to an empty range empties the list but leaves the key entry in
    /// place; use [`Self::clear`] to remove the entry itself. Returns `true`
    /// whenever the list was structurally changed.
    pub fn ltrim(&mut self, key: &Bytes, start: i64, stop: i64) -> bool {
        let Some(list) = self.record.get_mut(key) else {
            return false;
        };
        if list.is_empty() {
            return false;
        }

        let len = list.len() as i64;
        let (start, stop) = Self::normalize_range(len, start, stop);

        if start <= 0 && stop >= len - 1 {
            // The range covers the whole list; nothing to trim.
            return false;
        }

        if start > stop || start >= len {
            // The kept range is empty. The list becomes logically empty, but
            // the key entry itself stays in the map.
            list.elements.clear();
            list.size = 0;
            return true;
        }

        let start_usize = start as usize;
        let kept_span = (stop - start + 1) as usize;

        if kept_span < (len >> 1) as usize {
            // Keeping a small window: rebuild a fresh list from the kept range.
            let elements: VecDeque<Bytes> = list
                .elements
                .iter()
                .skip(start_usize)
                .take(kept_span)
                .cloned()
                .collect();
            let size = elements.iter().map(Bytes::len).sum();
            *list = StoredList { elements, size };
        } else {
            // Keeping most of the list: drain the discarded prefix from the
            // head and the discarded suffix from the tail, in place.
            let mut mem_freed = 0;
            for val in list.elements.drain(0..start_usize) {
                mem_freed += val.len();
            }
            if list.elements.len() > kept_span {
                for val in list.elements.drain(kept_span..) {
                    mem_freed += val.len();
                }
            }
            list.size -= mem_freed;
        }
        true
    }

    /// Returns the length of the list stored at `key`, or 0 when the key
    /// does not exist.
    pub fn llen(&self, key: &Bytes) -> usize {
        self.record.get(key).map_or(0, StoredList::len)
    }

    /// Removes `key` and its list from the index entirely.
    pub fn clear(&mut self, key: &Bytes) {
        if self.record.remove(key).is_some() {
            debug!(key = ?key, "cleared list key");
        }
    }

    /// Checks whether `key` has an entry in the index.
    ///
    /// A key trimmed down to an empty list still has an entry; a cleared key
    /// does not. This is therefore not equivalent to `llen(key) > 0`.
    pub fn contains_key(&self, key: &Bytes) -> bool {
        self.record.contains_key(key)
    }

    /// Returns the memory attributable to the list stored at `key`, in bytes,
    /// or 0 when the key does not exist.
    pub fn memory_usage(&self, key: &Bytes) -> usize {
        self.record.get(key).map_or(0, StoredList::memory_usage)
    }

    /// Returns the memory attributable to every stored list, in bytes.
    pub fn total_memory_usage(&self) -> usize {
        self.record.values().map(StoredList::memory_usage).sum()
    }

    /// Iterates every stored element for snapshotting.
    ///
    /// For each key, elements are visited head to tail as [`SnapshotRecord`]s
    /// that replay as tail-pushes. The first visitor error aborts the
    /// iteration and is returned to the caller unmodified.
    pub fn for_each_record<F>(&self, mut visitor: F) -> Result<(), ListIndexError>
    where
        F: FnMut(SnapshotRecord) -> Result<(), ListIndexError>,
    {
        debug!(keys = self.record.len(), "starting list snapshot iteration");
        for (key, list) in &self.record {
            for value in &list.elements {
                visitor(SnapshotRecord::push_tail(key.clone(), value.clone()))?;
            }
        }
        Ok(())
    }

    /// Replays one snapshot record, appending its value at the tail of the
    /// record's list. Returns the new length of that list.
    pub fn apply_record(&mut self, record: SnapshotRecord) -> Result<usize, ListIndexError> {
        if record.record_type != RECORD_TYPE_LIST {
            return Err(ListIndexError::Corrupted(format!(
                "unexpected record type {}",
                record.record_type
            )));
        }
        if record.mark != RECORD_MARK_PUSH_TAIL {
            return Err(ListIndexError::Corrupted(format!(
                "unexpected record mark {}",
                record.mark
            )));
        }
        Ok(self.push(
            PushDirection::Right,
            record.key,
            std::slice::from_ref(&record.value),
        ))
    }

    fn push(&mut self, direction: PushDirection, key: Bytes, values: &[Bytes]) -> usize {
        let list = self.record.entry(key).or_insert_with(StoredList::new);

        for value in values {
            list.size += value.len();
            match direction {
                PushDirection::Left => list.elements.push_front(value.clone()),
                PushDirection::Right => list.elements.push_back(value.clone()),
            }
        }
        list.len()
    }

    // The entry stays in the map even when the pop empties the list.
    fn pop(&mut self, direction: PopDirection, key: &Bytes) -> Option<Bytes> {
        let list = self.record.get_mut(key)?;

        let popped = match direction {
            PopDirection::Left => list.elements.pop_front(),
            PopDirection::Right => list.elements.pop_back(),
        };
        if let Some(val) = &popped {
            list.size -= val.len();
        }
        popped
    }

    /// Converts a possibly negative logical index into an absolute offset,
    /// or `None` when it falls outside `[0, len)`.
    fn normalize_index(len: i64, index: i64) -> Option<usize> {
        let index = if index < 0 { len + index } else { index };
        (0..len).contains(&index).then_some(index as usize)
    }

    /// Normalizes a `start`/`stop` pair against `len`: negative offsets count
    /// from the tail, `start` is floored to 0 and `stop` is capped to `len - 1`.
    fn normalize_range(len: i64, start: i64, stop: i64) -> (i64, i64) {
        let mut start = if start < 0 { start + len } else { start };
        let mut stop = if stop < 0 { stop + len } else { stop };

        if start < 0 {
            start = 0;
        }
        if stop >= len {
            stop = len - 1;
        }
        (start, stop)
    }
}
