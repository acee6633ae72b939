//! Message structures as delivered by the document store

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Which chat a message belongs to
///
/// The kind fixes the message lifespan at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// Campus-wide group chat
    Group,
    /// One-to-one conversation between two participants
    Private,
}

impl ChatKind {
    /// Time-to-live applied to new messages of this kind
    pub fn ttl(&self) -> Duration {
        match self {
            Self::Group => Duration::hours(12),
            Self::Private => Duration::days(7),
        }
    }
}

/// Message document exactly as it arrives from the store
///
/// Timestamps are optional because the store may deliver a pending write
/// before its server timestamps resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Store-assigned document id
    pub id: String,
    /// Message text
    #[serde(default)]
    pub text: String,
    /// Author uid
    #[serde(default)]
    pub sender_id: String,
    /// Author display name (group chat only)
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Author photo URL (group chat only)
    #[serde(default)]
    pub sender_photo: Option<String>,
    /// Server creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Server expiry time
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A decoded message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Store-assigned document id
    pub id: String,
    /// Author uid
    pub sender_id: String,
    /// Author display name, when denormalised into the message
    pub sender_name: Option<String>,
    /// Author photo URL, when denormalised into the message
    pub sender_photo: Option<String>,
    /// Message text
    pub body: String,
    /// Server creation time
    pub created_at: DateTime<Utc>,
    /// Instant after which the message is treated as absent
    pub expires_at: DateTime<Utc>,
}

impl Message {
    /// Decode a raw document, substituting `now` for missing timestamps
    ///
    /// A missing `expires_at` therefore yields a message that is already
    /// expired, and a missing `created_at` sorts as the newest message.
    pub fn from_raw(raw: RawMessage, now: DateTime<Utc>) -> Self {
        if raw.created_at.is_none() || raw.expires_at.is_none() {
            tracing::debug!("Message {} is missing server timestamps", raw.id);
        }

        Self {
            id: raw.id,
            sender_id: raw.sender_id,
            sender_name: raw.sender_name,
            sender_photo: raw.sender_photo,
            body: raw.text,
            created_at: raw.created_at.unwrap_or(now),
            expires_at: raw.expires_at.unwrap_or(now),
        }
    }

    /// Check whether the message was written by `uid`
    pub fn is_from(&self, uid: &str) -> bool {
        self.sender_id == uid
    }

    /// 12-hour clock label shown under the message bubble
    ///
    /// # Arguments
    /// * `offset_minutes` - Display time zone offset from UTC in minutes
    pub fn clock_label(&self, offset_minutes: i32) -> String {
        clock_label(self.created_at, offset_minutes)
    }
}

/// Format an instant as `hh:mm AM/PM` in a fixed display offset
///
/// Offsets outside ±24h fall back to UTC.
pub fn clock_label(at: DateTime<Utc>, offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix());
    at.with_timezone(&offset).format("%I:%M %p").to_string()
}

/// New message write request
///
/// `created_at` and `expires_at` are not part of the request: the store
/// stamps both from its own clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Message text (already validated)
    pub text: String,
    /// Author uid
    pub sender_id: String,
    /// Author display name, for group messages
    pub sender_name: Option<String>,
    /// Author photo URL, for group messages
    pub sender_photo: Option<String>,
    /// Lifespan the store adds to its creation timestamp
    pub ttl_secs: i64,
}

impl NewMessage {
    /// Lifespan as a duration, or `None` when it is out of range
    pub fn ttl(&self) -> Option<Duration> {
        Duration::try_seconds(self.ttl_secs)
    }
}
