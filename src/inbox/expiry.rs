//! Message expiry
//!
//! Every message carries a fixed expiry instant. Once it has passed, the
//! message is logically deleted on every read path, whether or not the store
//! has physically removed it yet.

use crate::storage::{Message, RawMessage};
use chrono::{DateTime, Utc};

/// Lifecycle state of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// `now < expires_at`
    Active,
    /// `now >= expires_at`; irreversible
    Expired,
}

impl MessageState {
    /// State of `message` at `now`
    pub fn at(message: &Message, now: DateTime<Utc>) -> Self {
        if is_live(message, now) {
            Self::Active
        } else {
            Self::Expired
        }
    }
}

/// Check whether a message is still visible at `now`
pub fn is_live(message: &Message, now: DateTime<Utc>) -> bool {
    message.expires_at > now
}

/// Decode a store snapshot and keep only live messages, oldest first
///
/// Snapshots arrive newest-first and their order is not trusted, so the
/// result is re-sorted by `created_at` (then id) every time.
pub fn live_messages(snapshot: Vec<RawMessage>, now: DateTime<Utc>) -> Vec<Message> {
    let mut messages: Vec<Message> = snapshot
        .into_iter()
        .map(|raw| Message::from_raw(raw, now))
        .filter(|m| is_live(m, now))
        .collect();

    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    messages
}

/// Keep only the live messages of an already decoded list
pub fn retain_live(messages: &[Message], now: DateTime<Utc>) -> Vec<&Message> {
    messages.iter().filter(|m| is_live(m, now)).collect()
}
