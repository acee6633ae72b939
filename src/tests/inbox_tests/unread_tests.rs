// Unread Tests - Testing unread counts and inbox entries

use crate::inbox::{compute_entry, peers_with_unread, total_unread, unread::is_unread, unread_count, InboxEntry};
use crate::tests::support::{at, msg};

const VIEWER: &str = "me";
const PEER: &str = "them";

#[test]
fn test_marker_separates_read_from_unread() {
    let marker = at(100);
    let before = msg("m90", PEER, 90, 10_000);
    let after = msg("m150", PEER, 150, 10_000);

    assert!(!is_unread(&before, VIEWER, marker));
    assert!(is_unread(&after, VIEWER, marker));
    assert_eq!(unread_count(&[before, after], VIEWER, marker, at(200)), 1);
}

#[test]
fn test_own_messages_never_unread() {
    let mine = msg("mine", VIEWER, 500, 10_000);
    assert!(!is_unread(&mine, VIEWER, at(0)));
}

#[test]
fn test_message_at_marker_is_read() {
    let exact = msg("m", PEER, 100, 10_000);
    assert!(!is_unread(&exact, VIEWER, at(100)));
}

#[test]
fn test_expired_messages_not_counted() {
    let expired = msg("old", PEER, 10, 20);
    let live = msg("new", PEER, 30, 10_000);
    assert_eq!(unread_count(&[expired, live], VIEWER, at(0), at(100)), 1);
}

#[test]
fn test_compute_entry() {
    let messages = vec![
        msg("a", PEER, 110, 10_000),
        msg("b", VIEWER, 130, 10_000),
        msg("c", PEER, 120, 10_000),
        msg("d", PEER, 50, 10_000),
    ];

    let entry = compute_entry(PEER, &messages, VIEWER, at(100), at(200), true);
    assert_eq!(entry.peer_uid, PEER);
    assert_eq!(entry.unread_count, 2);
    assert_eq!(entry.last_activity_at, Some(at(130)));
    assert_eq!(entry.last_activity_by_viewer, Some(true));
    assert_eq!(entry.last_unread_at, Some(at(120)));
    assert!(entry.is_online);
    assert!(entry.has_unread());
    assert!(entry.has_history());
}

#[test]
fn test_compute_entry_empty_conversation() {
    let entry = compute_entry(PEER, &[], VIEWER, at(0), at(10), false);
    assert_eq!(entry, InboxEntry::empty(PEER, false));
    assert!(!entry.has_history());
    assert_eq!(entry.time_ago(at(10)), None);
}

#[test]
fn test_compute_entry_only_expired() {
    let entry = compute_entry(PEER, &[msg("x", PEER, 1, 5)], VIEWER, at(0), at(10), false);
    assert_eq!(entry.unread_count, 0);
    assert!(!entry.has_history());
}

#[test]
fn test_compute_entry_is_idempotent() {
    let messages = vec![msg("a", PEER, 110, 10_000), msg("b", VIEWER, 130, 10_000)];
    let first = compute_entry(PEER, &messages, VIEWER, at(100), at(200), true);
    let second = compute_entry(PEER, &messages, VIEWER, at(100), at(200), true);
    assert_eq!(first, second);
}

#[test]
fn test_notification_count_counts_peers() {
    let mut heavy = InboxEntry::empty("p1", true);
    heavy.unread_count = 5;
    let mut light = InboxEntry::empty("p2", false);
    light.unread_count = 1;
    let quiet = InboxEntry::empty("p3", true);

    let entries = vec![heavy, light, quiet];
    assert_eq!(peers_with_unread(&entries), 2);
    assert_eq!(total_unread(&entries), 6);
}

#[test]
fn test_entry_time_ago() {
    let messages = vec![msg("a", PEER, 0, 100_000)];
    let entry = compute_entry(PEER, &messages, VIEWER, at(0), at(120), false);
    assert_eq!(entry.time_ago(at(120)).as_deref(), Some("Received 2 mins ago"));
}
