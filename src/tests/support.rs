//! Shared builders for tests

use crate::clock::ManualClock;
use crate::storage::{ConversationKey, Message, Presence, RawMessage, RawPeer};
use crate::store::MemoryStore;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Instant `secs` seconds after the epoch
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
}

/// Raw message created at `created` seconds and expiring at `expires` seconds
pub fn raw_msg(id: &str, sender: &str, created: i64, expires: i64) -> RawMessage {
    RawMessage {
        id: id.to_string(),
        text: format!("text of {}", id),
        sender_id: sender.to_string(),
        sender_name: None,
        sender_photo: None,
        created_at: Some(at(created)),
        expires_at: Some(at(expires)),
    }
}

/// Decoded message created at `created` seconds and expiring at `expires` seconds
pub fn msg(id: &str, sender: &str, created: i64, expires: i64) -> Message {
    Message::from_raw(raw_msg(id, sender, created, expires), at(0))
}

/// Raw peer document with a name and presence
pub fn raw_peer(uid: &str, name: &str, status: Presence) -> RawPeer {
    RawPeer {
        uid: uid.to_string(),
        name: Some(name.to_string()),
        email: Some(format!("{}@campus.edu", uid)),
        photo_url: None,
        status: Some(status),
        custom_status: None,
        last_seen: Some(at(0)),
    }
}

/// Store and clock sharing one manual instant
pub fn store_at(secs: i64) -> (Arc<MemoryStore>, ManualClock) {
    let clock = ManualClock::at_secs(secs);
    let store = Arc::new(MemoryStore::with_clock(Arc::new(clock.clone())));
    (store, clock)
}

/// Private conversation key between two uids
pub fn pair(a: &str, b: &str) -> ConversationKey {
    ConversationKey::pair(a, b)
}
