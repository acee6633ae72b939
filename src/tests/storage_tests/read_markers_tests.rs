// Read Markers Tests - Testing ReadMarkers over the in-memory key-value store

use crate::storage::{ConversationKey, KeyValueStore, MemoryKeyValueStore, ReadMarkers};
use crate::tests::support::at;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[test]
fn test_missing_marker() {
    let markers = ReadMarkers::in_memory();
    let key = ConversationKey::pair("a", "b");

    assert_eq!(markers.get(&key).unwrap(), None);
    assert_eq!(markers.get_or_epoch(&key), DateTime::<Utc>::UNIX_EPOCH);
}

#[test]
fn test_mark_read_stores_rfc3339() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let markers = ReadMarkers::new(kv.clone());
    let key = ConversationKey::pair("a", "b");

    let stored = markers.mark_read(&key, at(100)).unwrap();
    assert_eq!(stored, at(100));
    assert_eq!(markers.get(&key).unwrap(), Some(at(100)));

    let raw = kv.get("lastRead_a_b").unwrap().unwrap();
    assert!(raw.starts_with("1970-01-01T00:01:40"));
}

#[test]
fn test_mark_read_never_moves_backwards() {
    let markers = ReadMarkers::in_memory();
    let key = ConversationKey::pair("a", "b");

    markers.mark_read(&key, at(200)).unwrap();
    let kept = markers.mark_read(&key, at(150)).unwrap();
    assert_eq!(kept, at(200));
    assert_eq!(markers.get_or_epoch(&key), at(200));

    markers.mark_read(&key, at(300)).unwrap();
    assert_eq!(markers.get_or_epoch(&key), at(300));
}

#[test]
fn test_mark_read_keeps_subsecond_precision() {
    let markers = ReadMarkers::in_memory();
    let key = ConversationKey::pair("a", "b");
    let now = at(10) + chrono::Duration::microseconds(123_456);

    markers.mark_read(&key, now).unwrap();
    assert_eq!(markers.get_or_epoch(&key), now);
}

#[test]
fn test_unreadable_marker_is_absent() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    kv.set("lastRead_a_b", "yesterday-ish").unwrap();
    let markers = ReadMarkers::new(kv);
    let key = ConversationKey::pair("a", "b");

    assert_eq!(markers.get(&key).unwrap(), None);
    assert_eq!(markers.get_or_epoch(&key), DateTime::<Utc>::UNIX_EPOCH);
}

#[test]
fn test_markers_are_per_conversation() {
    let markers = ReadMarkers::in_memory();
    let ab = ConversationKey::pair("a", "b");
    let ac = ConversationKey::pair("a", "c");

    markers.mark_read(&ab, at(50)).unwrap();
    assert_eq!(markers.get_or_epoch(&ab), at(50));
    assert_eq!(markers.get_or_epoch(&ac), DateTime::<Utc>::UNIX_EPOCH);
}
