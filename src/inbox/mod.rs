//! Derived inbox state
//!
//! Everything here is recomputed from the complete current snapshot on every
//! notification and never persisted:
//! - `expiry` - the live/expired predicate applied before any aggregation
//! - `unread` - per-conversation unread counts and roster notification count
//! - `sorter` - total order over roster rows
//! - `time_ago` - recency and badge labels

pub mod expiry;
pub mod sorter;
pub mod time_ago;
pub mod unread;

pub use expiry::{is_live, live_messages, MessageState};
pub use sorter::{compare_peers, sort_by_recency};
pub use time_ago::{badge_label, format_time_ago};
pub use unread::{compute_entry, peers_with_unread, total_unread, unread_count};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unread and recency summary of the viewer's conversation with one peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxEntry {
    /// The other participant
    pub peer_uid: String,
    /// Live messages from the peer newer than the read marker
    pub unread_count: usize,
    /// Creation time of the newest live message from either side
    pub last_activity_at: Option<DateTime<Utc>>,
    /// Whether the newest live message was written by the viewer
    pub last_activity_by_viewer: Option<bool>,
    /// Creation time of the newest unread message
    pub last_unread_at: Option<DateTime<Utc>>,
    /// Peer presence
    pub is_online: bool,
}

impl InboxEntry {
    /// Entry for a peer with no conversation yet
    pub fn empty(peer_uid: &str, is_online: bool) -> Self {
        Self {
            peer_uid: peer_uid.to_string(),
            unread_count: 0,
            last_activity_at: None,
            last_activity_by_viewer: None,
            last_unread_at: None,
            is_online,
        }
    }

    /// Check whether any message is unread
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    /// Check whether the conversation has any live message
    pub fn has_history(&self) -> bool {
        self.last_activity_at.is_some()
    }

    /// Recency label, when there is history
    pub fn time_ago(&self, now: DateTime<Utc>) -> Option<String> {
        let at = self.last_activity_at?;
        let by_viewer = self.last_activity_by_viewer.unwrap_or(false);
        Some(format_time_ago(at, by_viewer, now))
    }
}
