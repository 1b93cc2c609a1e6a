// tests/integration/list_ops_test.rs

//! End-to-end scenarios combining push, pop, index, insert, remove,
//! range and trim on one index instance.

use super::test_helpers::{assert_range_equals, seeded_index, values};
use bytes::Bytes;
use listdb::{InsertPosition, ListIndex};

#[test]
fn test_push_index_rem_trim_scenario() {
    let key = Bytes::from_static(b"mylist");
    let mut index = seeded_index(&key, &["a", "b", "c"]);

    assert_range_equals(&index, &key, 0, -1, &["a", "b", "c"], "initial contents");
    assert_eq!(index.lindex(&key, -1), Some(Bytes::from_static(b"c")));

    // Remove every "b", then trim down to the head element.
    assert_eq!(index.lrem(&key, &Bytes::from_static(b"b"), 0), 1);
    assert_eq!(index.llen(&key), 2);

    assert!(index.ltrim(&key, 0, 0));
    assert_range_equals(&index, &key, 0, -1, &["a"], "after trim");
}

#[test]
fn test_empty_key_scenario() {
    let mut index = ListIndex::new();
    let key = Bytes::from_static(b"nosuchkey");

    assert_eq!(index.llen(&key), 0);
    assert_eq!(index.lpop(&key), None);
    assert_eq!(index.lindex(&key, 0), None);
    assert!(!index.contains_key(&key));
}

#[test]
fn test_range_equals_repeated_lpop() {
    let key = Bytes::from_static(b"mylist");
    let vals = ["one", "two", "three", "four"];
    let mut index = seeded_index(&key, &vals);

    let ranged = index.lrange(&key, 0, index.llen(&key) as i64 - 1);

    let mut popped = Vec::new();
    while let Some(val) = index.lpop(&key) {
        popped.push(val);
    }

    assert_eq!(ranged, popped);
    assert_eq!(popped, values(&vals));
}

#[test]
fn test_lpush_rpush_combination() {
    let mut index = ListIndex::new();
    let key = Bytes::from_static(b"mylist");

    index.lpush(key.clone(), &values(&["left1"]));
    index.rpush(key.clone(), &values(&["right1"]));
    index.lpush(key.clone(), &values(&["left2"]));

    // Sequence: [left1] -> [left1, right1] -> [left2, left1, right1]
    assert_range_equals(
        &index,
        &key,
        0,
        -1,
        &["left2", "left1", "right1"],
        "test_lpush_rpush_combination",
    );
}

#[test]
fn test_insert_preserves_surrounding_order() {
    let key = Bytes::from_static(b"mylist");
    let mut index = seeded_index(&key, &["a", "b", "d"]);

    let len = index.linsert(
        &key,
        InsertPosition::Before,
        &Bytes::from_static(b"d"),
        Bytes::from_static(b"c"),
    );
    assert_eq!(len, 4);
    assert_range_equals(&index, &key, 0, -1, &["a", "b", "c", "d"], "after insert");
}

#[test]
fn test_keys_are_independent() {
    let mut index = ListIndex::new();
    let first = Bytes::from_static(b"first");
    let second = Bytes::from_static(b"second");

    index.rpush(first.clone(), &values(&["a", "b"]));
    index.rpush(second.clone(), &values(&["x"]));

    index.ltrim(&first, 0, 0);
    assert_range_equals(&index, &first, 0, -1, &["a"], "trimmed first key");
    assert_range_equals(&index, &second, 0, -1, &["x"], "untouched second key");

    index.clear(&first);
    assert!(!index.contains_key(&first));
    assert!(index.contains_key(&second));
}

#[test]
fn test_pop_emptied_then_repushed_key() {
    let key = Bytes::from_static(b"mylist");
    let mut index = seeded_index(&key, &["a"]);

    index.lpop(&key);
    assert!(index.contains_key(&key));

    // The empty placeholder keeps working as a normal list.
    assert_eq!(index.rpush(key.clone(), &values(&["b"])), 1);
    assert_range_equals(&index, &key, 0, -1, &["b"], "repushed after emptying");
}
