//! Data model and local storage
//!
//! - `message` - Message documents, chat kinds and TTLs
//! - `peer` - User records, presence and profile updates
//! - `conversation_key` - Deterministic conversation identity
//! - `read_markers` - Injected key-value store and per-conversation read markers
//! - `settings` - Client configuration
//! - `storage_db` - SQLite key-value store for device-local state

pub mod conversation_key;
pub mod message;
pub mod peer;
pub mod read_markers;
pub mod settings;
pub mod storage_db;

pub use conversation_key::ConversationKey;
pub use message::{clock_label, ChatKind, Message, NewMessage, RawMessage};
pub use peer::{initials, Peer, PeerRecord, Presence, ProfileUpdate, RawPeer};
pub use read_markers::{KeyValueStore, MemoryKeyValueStore, ReadMarkers};
pub use settings::{Settings, MAX_GROUP_TTL_HOURS, MAX_PRIVATE_TTL_DAYS};
pub use storage_db::SqliteKeyValueStore;
