// Message Tests - Testing RawMessage decoding, ChatKind and clock labels

use crate::storage::{clock_label, ChatKind, Message, NewMessage, RawMessage};
use crate::tests::support::{at, raw_msg};
use chrono::Duration;

#[test]
fn test_chat_kind_ttl() {
    assert_eq!(ChatKind::Group.ttl(), Duration::hours(12));
    assert_eq!(ChatKind::Private.ttl(), Duration::days(7));
}

#[test]
fn test_from_raw_keeps_fields() {
    let mut raw = raw_msg("m1", "alice", 10, 20);
    raw.sender_name = Some("Alice".to_string());

    let message = Message::from_raw(raw, at(99));
    assert_eq!(message.id, "m1");
    assert_eq!(message.body, "text of m1");
    assert_eq!(message.sender_name.as_deref(), Some("Alice"));
    assert_eq!(message.created_at, at(10));
    assert_eq!(message.expires_at, at(20));
    assert!(message.is_from("alice"));
    assert!(!message.is_from("bob"));
}

#[test]
fn test_from_raw_missing_timestamps_use_now() {
    let raw = RawMessage {
        id: "pending".to_string(),
        text: "hello".to_string(),
        sender_id: "alice".to_string(),
        ..Default::default()
    };

    let message = Message::from_raw(raw, at(500));
    assert_eq!(message.created_at, at(500));
    assert_eq!(message.expires_at, at(500));
}

#[test]
fn test_raw_message_deserialize_with_missing_fields() {
    let raw: RawMessage = serde_json::from_str(r#"{"id": "m9", "text": "hi"}"#).unwrap();
    assert_eq!(raw.id, "m9");
    assert!(raw.sender_id.is_empty());
    assert!(raw.created_at.is_none());
    assert!(raw.expires_at.is_none());
}

#[test]
fn test_clock_label_in_campus_offset() {
    // 00:00 UTC is 05:30 at +05:30
    assert_eq!(clock_label(at(0), 330), "05:30 AM");
    // 08:00 UTC is 01:30 PM at +05:30
    assert_eq!(clock_label(at(8 * 3600), 330), "01:30 PM");
}

#[test]
fn test_clock_label_utc_and_out_of_range_offset() {
    assert_eq!(clock_label(at(13 * 3600 + 5 * 60), 0), "01:05 PM");
    // Offsets beyond a day fall back to UTC
    assert_eq!(clock_label(at(13 * 3600 + 5 * 60), 100_000), "01:05 PM");
}

#[test]
fn test_new_message_ttl() {
    let message = NewMessage {
        text: "hi".to_string(),
        sender_id: "alice".to_string(),
        sender_name: None,
        sender_photo: None,
        ttl_secs: 3600,
    };
    assert_eq!(message.ttl(), Some(Duration::hours(1)));
}
