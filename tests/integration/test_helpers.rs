// tests/integration/test_helpers.rs

//! Shared helpers for integration tests.

use bytes::Bytes;
use listdb::ListIndex;

/// Converts a slice of string literals into owned byte values.
pub fn values(vals: &[&'static str]) -> Vec<Bytes> {
    vals.iter().map(|v| Bytes::from_static(v.as_bytes())).collect()
}

/// Builds an index holding a single list at `key` with the given values.
pub fn seeded_index(key: &Bytes, vals: &[&'static str]) -> ListIndex {
    let mut index = ListIndex::new();
    index.rpush(key.clone(), &values(vals));
    index
}

/// Asserts that `lrange(start, stop)` over `key` yields exactly `expected`.
pub fn assert_range_equals(
    index: &ListIndex,
    key: &Bytes,
    start: i64,
    stop: i64,
    expected: &[&'static str],
    test_name: &str,
) {
    let got = index.lrange(key, start, stop);
    assert_eq!(
        got,
        values(expected),
        "unexpected range contents in {test_name}"
    );
}
