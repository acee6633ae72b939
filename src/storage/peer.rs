//! Peer (user) records and presence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presence status of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Has an active session
    Online,
    /// No active session
    #[default]
    Offline,
}

impl Presence {
    /// Check whether this is [`Presence::Online`]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// Label shown for a peer with no unread messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Active now",
            Self::Offline => "Offline",
        }
    }
}

/// User document exactly as it arrives from the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPeer {
    /// Document id, equal to the user's uid
    pub uid: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Photo URL
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Presence
    #[serde(default)]
    pub status: Option<Presence>,
    /// Free-form status line
    #[serde(default)]
    pub custom_status: Option<String>,
    /// Server time of the last presence change
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

/// A decoded peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Unique user id
    pub uid: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Photo URL (empty when unset)
    pub photo_url: String,
    /// Presence
    pub status: Presence,
    /// Free-form status line (empty when unset)
    pub custom_status: String,
    /// Last presence change
    pub last_seen: DateTime<Utc>,
}

impl Peer {
    /// Decode a raw document, filling defaults for missing fields
    pub fn from_raw(raw: RawPeer, now: DateTime<Utc>) -> Self {
        Self {
            uid: raw.uid,
            name: raw.name.unwrap_or_else(|| "Unknown".to_string()),
            email: raw.email.unwrap_or_default(),
            photo_url: raw.photo_url.unwrap_or_default(),
            status: raw.status.unwrap_or_default(),
            custom_status: raw.custom_status.unwrap_or_default(),
            last_seen: raw.last_seen.unwrap_or(now),
        }
    }

    /// Check whether the peer is currently online
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    /// Avatar initials for this peer
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Record written when a user signs in for the first time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    /// Unique user id
    pub uid: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Photo URL
    pub photo_url: String,
    /// Initial presence
    pub status: Presence,
}

/// Partial profile update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New status line
    pub custom_status: Option<String>,
    /// New photo URL
    pub photo_url: Option<String>,
}

/// Avatar initials: first letter of up to two words, uppercased
///
/// Returns `"U"` for a name with no letters to take.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        "U".to_string()
    } else {
        letters
    }
}
