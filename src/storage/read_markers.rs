//! Local read markers
//!
//! A read marker records when the viewer last opened a conversation. Markers
//! live on the viewer's device, never in the shared store. The backing
//! key-value store is injected so the tracker can run without any particular
//! storage substrate.
//!
//! Several clients on the same device may share one key-value store. No
//! locking is performed across them: concurrent `mark_read` calls race and
//! the last write wins.

use crate::{storage::conversation_key::ConversationKey, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// String key-value store holding local state
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Per-conversation read markers on top of a [`KeyValueStore`]
///
/// Values are stored as RFC 3339 timestamps under
/// [`ConversationKey::read_marker_key`].
#[derive(Clone)]
pub struct ReadMarkers {
    kv: Arc<dyn KeyValueStore>,
}

impl ReadMarkers {
    /// Wrap a key-value store
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Markers backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Read the marker for a conversation
    ///
    /// Returns `None` when the conversation was never opened. A stored value
    /// that does not parse is logged and treated as absent.
    pub fn get(&self, key: &ConversationKey) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.kv.get(&key.read_marker_key())? else {
            return Ok(None);
        };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(at) => Ok(Some(at.with_timezone(&Utc))),
            Err(e) => {
                tracing::warn!("Ignoring unreadable read marker for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Marker for a conversation, defaulting to the Unix epoch
    ///
    /// Storage failures also fall back to the epoch, which makes every
    /// message from the other side count as unread.
    pub fn get_or_epoch(&self, key: &ConversationKey) -> DateTime<Utc> {
        match self.get(key) {
            Ok(marker) => marker.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            Err(e) => {
                tracing::warn!("Failed to read marker for {}: {}", key, e);
                DateTime::<Utc>::UNIX_EPOCH
            }
        }
    }

    /// Record that the viewer opened the conversation at `now`
    ///
    /// The marker never moves backwards: if a later marker is already stored
    /// it is kept. Returns the marker in effect after the call.
    pub fn mark_read(&self, key: &ConversationKey, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        if let Some(existing) = self.get(key)? {
            if existing >= now {
                return Ok(existing);
            }
        }

        self.kv.set(
            &key.read_marker_key(),
            &now.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )?;
        tracing::debug!("Marked {} read at {}", key, now);
        Ok(now)
    }
}

impl std::fmt::Debug for ReadMarkers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadMarkers").finish_non_exhaustive()
    }
}
