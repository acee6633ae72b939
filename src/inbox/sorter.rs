//! Roster ordering
//!
//! Keys, earlier ones dominating:
//! 1. peers with unread messages first
//! 2. among those, newest unread message first
//! 3. among peers with history, newest message first
//! 4. peers with history before peers without
//! 5. without history: online first
//!
//! Remaining ties fall through to the display name (case-insensitive) and
//! finally the uid, so equal inputs always produce the same order.

use crate::inbox::InboxEntry;
use std::cmp::Ordering;

/// Compare two peers for roster order
pub fn compare_peers(a: &InboxEntry, a_name: &str, b: &InboxEntry, b_name: &str) -> Ordering {
    compare_activity(a, b)
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a.peer_uid.cmp(&b.peer_uid))
}

fn compare_activity(a: &InboxEntry, b: &InboxEntry) -> Ordering {
    match (a.has_unread(), b.has_unread()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (true, true) => {
            let by_unread = b.last_unread_at.cmp(&a.last_unread_at);
            if by_unread != Ordering::Equal {
                return by_unread;
            }
        }
        (false, false) => {}
    }

    match (a.last_activity_at, b.last_activity_at) {
        (Some(a_at), Some(b_at)) => b_at.cmp(&a_at),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.is_online.cmp(&a.is_online),
    }
}

/// Sort items in roster order
///
/// `key` exposes the inbox entry and display name of each item.
pub fn sort_by_recency<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (&InboxEntry, &str),
{
    items.sort_by(|x, y| {
        let (a, a_name) = key(x);
        let (b, b_name) = key(y);
        compare_peers(a, a_name, b, b_name)
    });
}
