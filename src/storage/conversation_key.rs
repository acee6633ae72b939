//! Conversation identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the campus-wide group chat
pub const GROUP_KEY: &str = "public";

/// Prefix of the local read-marker entry for a conversation
pub const READ_MARKER_PREFIX: &str = "lastRead_";

/// Stable identifier of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationKey(String);

impl ConversationKey {
    /// Key of the private conversation between two participants
    ///
    /// The two uids are sorted before joining, so the key does not depend on
    /// who opened the conversation: `pair(a, b) == pair(b, a)`.
    pub fn pair(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{}_{}", first, second))
    }

    /// Key of the group chat
    pub fn group() -> Self {
        Self(GROUP_KEY.to_string())
    }

    /// Key under which the viewer's read marker is stored locally
    pub fn read_marker_key(&self) -> String {
        format!("{}{}", READ_MARKER_PREFIX, self.0)
    }

    /// Borrow the raw key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
