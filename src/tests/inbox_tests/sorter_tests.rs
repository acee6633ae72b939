// Sorter Tests - Testing roster ordering

use crate::inbox::{compare_peers, sort_by_recency, InboxEntry};
use crate::tests::support::at;
use std::cmp::Ordering;

fn entry(uid: &str, unread: usize, last_unread: Option<i64>, last_activity: Option<i64>, online: bool) -> InboxEntry {
    InboxEntry {
        peer_uid: uid.to_string(),
        unread_count: unread,
        last_activity_at: last_activity.map(at),
        last_activity_by_viewer: last_activity.map(|_| false),
        last_unread_at: last_unread.map(at),
        is_online: online,
    }
}

fn order(mut rows: Vec<(InboxEntry, &str)>) -> Vec<String> {
    sort_by_recency(&mut rows, |(e, name)| (e, *name));
    rows.into_iter().map(|(e, _)| e.peer_uid).collect()
}

#[test]
fn test_example_order() {
    // A: no unread, last message at 500
    // B: 2 unread, newest unread at 300
    // C: 1 unread, newest unread at 400
    // D: no history, online
    // E: no history, offline
    let rows = vec![
        (entry("A", 0, None, Some(500), false), "A"),
        (entry("B", 2, Some(300), Some(300), false), "B"),
        (entry("C", 1, Some(400), Some(400), false), "C"),
        (entry("D", 0, None, None, true), "D"),
        (entry("E", 0, None, None, false), "E"),
    ];

    assert_eq!(order(rows), vec!["C", "B", "A", "D", "E"]);
}

#[test]
fn test_unread_beats_more_recent_activity() {
    let read_recent = entry("r", 0, None, Some(1000), true);
    let unread_old = entry("u", 1, Some(10), Some(10), false);
    assert_eq!(compare_peers(&unread_old, "u", &read_recent, "r"), Ordering::Less);
}

#[test]
fn test_history_before_no_history() {
    let history = entry("h", 0, None, Some(1), false);
    let none_online = entry("n", 0, None, None, true);
    assert_eq!(compare_peers(&history, "h", &none_online, "n"), Ordering::Less);
}

#[test]
fn test_ties_fall_back_to_name_then_uid() {
    let a = entry("uid-2", 0, None, None, true);
    let b = entry("uid-1", 0, None, None, true);

    assert_eq!(compare_peers(&a, "alice", &b, "Bob"), Ordering::Less);
    assert_eq!(compare_peers(&a, "Sam", &b, "sam"), Ordering::Greater);
}

#[test]
fn test_sort_is_deterministic() {
    let rows = || {
        vec![
            (entry("x", 0, None, None, false), "Same"),
            (entry("y", 0, None, None, false), "Same"),
            (entry("z", 3, Some(5), Some(5), true), "Zed"),
        ]
    };
    let first = order(rows());
    let mut reversed = rows();
    reversed.reverse();
    assert_eq!(first, order(reversed));
    assert_eq!(first, vec!["z", "x", "y"]);
}
