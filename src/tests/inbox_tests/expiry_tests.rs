// Expiry Tests - Testing is_live, MessageState and live_messages

use crate::inbox::{expiry::retain_live, is_live, live_messages, MessageState};
use crate::storage::{ChatKind, RawMessage};
use crate::tests::support::{at, msg, raw_msg};

#[test]
fn test_live_until_expiry_instant() {
    let message = msg("m1", "a", 0, 100);
    assert!(is_live(&message, at(99)));
    // Expired at exactly expires_at
    assert!(!is_live(&message, at(100)));
    assert_eq!(MessageState::at(&message, at(50)), MessageState::Active);
    assert_eq!(MessageState::at(&message, at(101)), MessageState::Expired);
}

#[test]
fn test_group_message_gone_after_twelve_hours() {
    let ttl = ChatKind::Group.ttl().num_seconds();
    let snapshot = vec![raw_msg("g1", "a", 0, ttl)];

    assert_eq!(live_messages(snapshot.clone(), at(ttl - 1)).len(), 1);
    assert!(live_messages(snapshot, at(ttl + 1)).is_empty());
}

#[test]
fn test_live_messages_sorted_oldest_first() {
    // Snapshot arrives newest first and out of order
    let snapshot = vec![
        raw_msg("c", "a", 30, 1000),
        raw_msg("a", "a", 10, 1000),
        raw_msg("b", "b", 20, 1000),
    ];

    let ids: Vec<String> = live_messages(snapshot, at(40)).into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_live_messages_ties_break_by_id() {
    let snapshot = vec![raw_msg("y", "a", 10, 1000), raw_msg("x", "b", 10, 1000)];
    let ids: Vec<String> = live_messages(snapshot, at(20)).into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["x", "y"]);
}

#[test]
fn test_missing_expiry_is_not_live() {
    let raw = RawMessage {
        id: "pending".to_string(),
        sender_id: "a".to_string(),
        created_at: Some(at(10)),
        ..Default::default()
    };
    assert!(live_messages(vec![raw], at(20)).is_empty());
}

#[test]
fn test_expired_messages_dropped_from_mixed_snapshot() {
    let snapshot = vec![
        raw_msg("old", "a", 0, 50),
        raw_msg("new", "a", 60, 500),
    ];
    let live = live_messages(snapshot, at(100));
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, "new");
}

#[test]
fn test_retain_live() {
    let messages = vec![msg("a", "x", 0, 10), msg("b", "x", 0, 200)];
    let live = retain_live(&messages, at(100));
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, "b");
}
