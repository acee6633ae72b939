//! Demo data for the terminal client
//!
//! There is no hosted store behind the TUI, so it runs against a
//! [`MemoryStore`] filled with a few classmates and a bit of history.

use crate::{
    auth::Viewer,
    clock::Clock,
    storage::{ChatKind, ConversationKey, Presence, RawMessage, RawPeer},
    store::MemoryStore,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Uid the demo signs in as
pub const DEMO_VIEWER_UID: &str = "student-you";

/// Identity the demo signs in as
pub fn demo_viewer() -> Viewer {
    Viewer::new(DEMO_VIEWER_UID)
        .with_name("You")
        .with_email("you@campus.edu")
}

fn peer(uid: &str, name: &str, status: Presence, custom_status: &str, now: DateTime<Utc>) -> RawPeer {
    RawPeer {
        uid: uid.to_string(),
        name: Some(name.to_string()),
        email: Some(format!("{}@campus.edu", uid)),
        photo_url: None,
        status: Some(status),
        custom_status: Some(custom_status.to_string()),
        last_seen: Some(now),
    }
}

fn message(
    id: &str,
    sender: &str,
    sender_name: Option<&str>,
    text: &str,
    kind: ChatKind,
    created_at: DateTime<Utc>,
) -> RawMessage {
    RawMessage {
        id: id.to_string(),
        text: text.to_string(),
        sender_id: sender.to_string(),
        sender_name: sender_name.map(str::to_string),
        sender_photo: None,
        created_at: Some(created_at),
        expires_at: Some(created_at + kind.ttl()),
    }
}

/// Build a store with demo peers and messages, stamped with `clock`
pub fn seeded_store(clock: Arc<dyn Clock>) -> MemoryStore {
    let now = clock.now();
    let store = MemoryStore::with_clock(clock);

    store.insert_peer(peer("student-asha", "Asha Rao", Presence::Online, "In the library", now));
    store.insert_peer(peer("student-ben", "Ben Carter", Presence::Offline, "", now));
    store.insert_peer(peer("student-chen", "Chen Wei", Presence::Online, "", now));
    store.insert_peer(peer("student-dara", "Dara Okafor", Presence::Offline, "Back Monday", now));

    let group = ConversationKey::group();
    store.insert_raw_message(
        &group,
        message(
            "seed-g1",
            "student-asha",
            Some("Asha Rao"),
            "Anyone up for the robotics meetup tonight?",
            ChatKind::Group,
            now - Duration::hours(2),
        ),
    );
    store.insert_raw_message(
        &group,
        message(
            "seed-g2",
            "student-chen",
            Some("Chen Wei"),
            "Count me in",
            ChatKind::Group,
            now - Duration::minutes(95),
        ),
    );
    store.insert_raw_message(
        &group,
        message(
            "seed-g3",
            "student-ben",
            Some("Ben Carter"),
            "Old news from yesterday",
            ChatKind::Group,
            now - Duration::hours(13),
        ),
    );

    let with_asha = ConversationKey::pair(DEMO_VIEWER_UID, "student-asha");
    store.insert_raw_message(
        &with_asha,
        message(
            "seed-a1",
            "student-asha",
            None,
            "Did you submit the lab report?",
            ChatKind::Private,
            now - Duration::minutes(12),
        ),
    );
    store.insert_raw_message(
        &with_asha,
        message(
            "seed-a2",
            "student-asha",
            None,
            "Deadline is 5pm",
            ChatKind::Private,
            now - Duration::minutes(3),
        ),
    );

    let with_ben = ConversationKey::pair(DEMO_VIEWER_UID, "student-ben");
    store.insert_raw_message(
        &with_ben,
        message(
            "seed-b1",
            DEMO_VIEWER_UID,
            None,
            "Thanks for the notes!",
            ChatKind::Private,
            now - Duration::days(2),
        ),
    );

    store
}
