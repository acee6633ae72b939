//! Unread tracking
//!
//! Pure functions over a conversation snapshot. Marking a conversation read
//! is a separate explicit action (see [`crate::storage::ReadMarkers`]).

use crate::inbox::{expiry::retain_live, InboxEntry};
use crate::storage::Message;
use chrono::{DateTime, Utc};

/// Check whether a message counts as unread for `viewer`
///
/// Expiry is not checked here; callers filter first.
pub fn is_unread(message: &Message, viewer: &str, marker: DateTime<Utc>) -> bool {
    !message.is_from(viewer) && message.created_at > marker
}

/// Number of live messages from the other side newer than the read marker
pub fn unread_count(
    messages: &[Message],
    viewer: &str,
    marker: DateTime<Utc>,
    now: DateTime<Utc>,
) -> usize {
    retain_live(messages, now)
        .into_iter()
        .filter(|m| is_unread(m, viewer, marker))
        .count()
}

/// Derive the inbox entry for one peer's conversation
///
/// # Arguments
/// * `peer_uid` - The other participant
/// * `messages` - Complete current snapshot of the conversation, any order
/// * `viewer` - The local user
/// * `marker` - Viewer's read marker (epoch when never opened)
/// * `now` - Instant used for expiry
/// * `is_online` - Peer presence
pub fn compute_entry(
    peer_uid: &str,
    messages: &[Message],
    viewer: &str,
    marker: DateTime<Utc>,
    now: DateTime<Utc>,
    is_online: bool,
) -> InboxEntry {
    let live = retain_live(messages, now);

    let last = live
        .iter()
        .copied()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    let unread: Vec<&Message> = live
        .iter()
        .copied()
        .filter(|m| is_unread(m, viewer, marker))
        .collect();

    InboxEntry {
        peer_uid: peer_uid.to_string(),
        unread_count: unread.len(),
        last_activity_at: last.map(|m| m.created_at),
        last_activity_by_viewer: last.map(|m| m.is_from(viewer)),
        last_unread_at: unread.iter().map(|m| m.created_at).max(),
        is_online,
    }
}

/// Roster-level notification count: peers with at least one unread message
///
/// Each peer contributes at most 1, however many unread messages it has.
pub fn peers_with_unread<'a, I>(entries: I) -> usize
where
    I: IntoIterator<Item = &'a InboxEntry>,
{
    entries.into_iter().filter(|e| e.has_unread()).count()
}

/// Total unread messages across entries
pub fn total_unread<'a, I>(entries: I) -> usize
where
    I: IntoIterator<Item = &'a InboxEntry>,
{
    entries.into_iter().map(|e| e.unread_count).sum()
}
