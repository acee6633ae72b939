//! In-process document store
//!
//! Behaves like the hosted store from the client's point of view: writes are
//! stamped with the store clock, listeners get an initial snapshot and then
//! a complete snapshot after every change. Failure switches let tests
//! exercise the client's error paths.

use crate::{
    clock::{Clock, SystemClock},
    storage::{ConversationKey, NewMessage, PeerRecord, Presence, ProfileUpdate, RawMessage, RawPeer},
    store::{DocumentStore, MessagesHandler, PeersHandler, StoreEvent, SubscriptionHandle},
    Error, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

struct MessageListener {
    key: ConversationKey,
    limit: usize,
    handler: MessagesHandler,
}

#[derive(Default)]
struct Inner {
    peers: BTreeMap<String, RawPeer>,
    conversations: HashMap<ConversationKey, Vec<RawMessage>>,
    peer_listeners: HashMap<u64, PeersHandler>,
    message_listeners: HashMap<u64, MessageListener>,
    next_listener: u64,
    unavailable: bool,
    failing_keys: HashSet<ConversationKey>,
}

impl Inner {
    fn peers_snapshot(&self) -> Vec<RawPeer> {
        self.peers.values().cloned().collect()
    }

    fn messages_snapshot(&self, key: &ConversationKey, limit: usize) -> Vec<RawMessage> {
        let mut messages = self.conversations.get(key).cloned().unwrap_or_default();
        // Pending server timestamps sort as newest
        messages.sort_by(|a, b| {
            let a_at = a.created_at.unwrap_or(DateTime::<Utc>::MAX_UTC);
            let b_at = b.created_at.unwrap_or(DateTime::<Utc>::MAX_UTC);
            b_at.cmp(&a_at)
        });
        messages.truncate(limit);
        messages
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::Store("Store unavailable".to_string()));
        }
        Ok(())
    }
}

/// In-process implementation of [`DocumentStore`]
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store stamping writes with wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store stamping writes with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            clock,
        }
    }

    /// Make every read, write and new subscription fail (or recover)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Make new subscriptions and fetches for one conversation fail (or recover)
    pub fn set_conversation_failing(&self, key: &ConversationKey, failing: bool) {
        let mut inner = self.lock();
        if failing {
            inner.failing_keys.insert(key.clone());
        } else {
            inner.failing_keys.remove(key);
        }
    }

    /// Push an error event to every listener of a conversation
    pub fn emit_error(&self, key: &ConversationKey, message: &str) {
        let handlers: Vec<MessagesHandler> = self
            .lock()
            .message_listeners
            .values()
            .filter(|l| &l.key == key)
            .map(|l| l.handler.clone())
            .collect();

        for handler in handlers {
            handler(StoreEvent::Error(message.to_string()));
        }
    }

    /// Insert or replace a raw user record as-is
    pub fn insert_peer(&self, peer: RawPeer) {
        self.lock().peers.insert(peer.uid.clone(), peer);
        self.notify_peers();
    }

    /// Delete a user record
    pub fn remove_peer(&self, uid: &str) {
        self.lock().peers.remove(uid);
        self.notify_peers();
    }

    /// Insert a raw message document as-is, bypassing server stamping
    pub fn insert_raw_message(&self, key: &ConversationKey, message: RawMessage) {
        self.lock()
            .conversations
            .entry(key.clone())
            .or_default()
            .push(message);
        self.notify_messages(key);
    }

    /// Number of live peer and message listeners
    pub fn listener_count(&self) -> usize {
        let inner = self.lock();
        inner.peer_listeners.len() + inner.message_listeners.len()
    }

    /// Number of live listeners on one conversation
    pub fn conversation_listener_count(&self, key: &ConversationKey) -> usize {
        self.lock()
            .message_listeners
            .values()
            .filter(|l| &l.key == key)
            .count()
    }

    /// Number of stored documents in a conversation, expired ones included
    pub fn stored_message_count(&self, key: &ConversationKey) -> usize {
        self.lock().conversations.get(key).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify_peers(&self) {
        let (handlers, snapshot) = {
            let inner = self.lock();
            let handlers: Vec<PeersHandler> = inner.peer_listeners.values().cloned().collect();
            (handlers, inner.peers_snapshot())
        };

        for handler in handlers {
            handler(StoreEvent::Snapshot(snapshot.clone()));
        }
    }

    fn notify_messages(&self, key: &ConversationKey) {
        let deliveries: Vec<(MessagesHandler, Vec<RawMessage>)> = {
            let inner = self.lock();
            inner
                .message_listeners
                .values()
                .filter(|l| &l.key == key)
                .map(|l| (l.handler.clone(), inner.messages_snapshot(key, l.limit)))
                .collect()
        };

        for (handler, snapshot) in deliveries {
            handler(StoreEvent::Snapshot(snapshot));
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn subscribe_peers(&self, handler: PeersHandler) -> Result<SubscriptionHandle> {
        let (id, snapshot) = {
            let mut inner = self.lock();
            inner.check_available()?;
            inner.next_listener += 1;
            let id = inner.next_listener;
            inner.peer_listeners.insert(id, handler.clone());
            (id, inner.peers_snapshot())
        };
        debug!("Peers listener {} attached", id);

        handler(StoreEvent::Snapshot(snapshot));

        let inner = self.inner.clone();
        Ok(SubscriptionHandle::new("users", move || {
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.peer_listeners.remove(&id);
        }))
    }

    async fn subscribe_messages(
        &self,
        key: &ConversationKey,
        limit: usize,
        handler: MessagesHandler,
    ) -> Result<SubscriptionHandle> {
        let (id, snapshot) = {
            let mut inner = self.lock();
            inner.check_available()?;
            if inner.failing_keys.contains(key) {
                return Err(Error::Subscription(format!("Permission denied for {}", key)));
            }
            inner.next_listener += 1;
            let id = inner.next_listener;
            inner.message_listeners.insert(
                id,
                MessageListener {
                    key: key.clone(),
                    limit,
                    handler: handler.clone(),
                },
            );
            (id, inner.messages_snapshot(key, limit))
        };
        debug!("Messages listener {} attached to {}", id, key);

        handler(StoreEvent::Snapshot(snapshot));

        let inner = self.inner.clone();
        Ok(SubscriptionHandle::new(format!("messages/{}", key), move || {
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.message_listeners.remove(&id);
        }))
    }

    async fn fetch_messages(&self, key: &ConversationKey, limit: usize) -> Result<Vec<RawMessage>> {
        let inner = self.lock();
        inner.check_available()?;
        if inner.failing_keys.contains(key) {
            return Err(Error::Store(format!("Permission denied for {}", key)));
        }
        Ok(inner.messages_snapshot(key, limit))
    }

    async fn fetch_peer(&self, uid: &str) -> Result<Option<RawPeer>> {
        let inner = self.lock();
        inner.check_available()?;
        Ok(inner.peers.get(uid).cloned())
    }

    async fn create_peer(&self, record: PeerRecord) -> Result<()> {
        let now = self.clock.now();
        {
            let mut inner = self.lock();
            inner.check_available()?;
            inner.peers.insert(
                record.uid.clone(),
                RawPeer {
                    uid: record.uid,
                    name: Some(record.name),
                    email: Some(record.email),
                    photo_url: Some(record.photo_url),
                    status: Some(record.status),
                    custom_status: Some(String::new()),
                    last_seen: Some(now),
                },
            );
        }
        self.notify_peers();
        Ok(())
    }

    async fn set_presence(&self, uid: &str, status: Presence) -> Result<()> {
        let now = self.clock.now();
        {
            let mut inner = self.lock();
            inner.check_available()?;
            let peer = inner
                .peers
                .get_mut(uid)
                .ok_or_else(|| Error::Store(format!("No user document for {}", uid)))?;
            peer.status = Some(status);
            peer.last_seen = Some(now);
        }
        self.notify_peers();
        Ok(())
    }

    async fn update_profile(&self, uid: &str, update: ProfileUpdate) -> Result<()> {
        {
            let mut inner = self.lock();
            inner.check_available()?;
            let peer = inner
                .peers
                .get_mut(uid)
                .ok_or_else(|| Error::Store(format!("No user document for {}", uid)))?;
            if let Some(name) = update.name {
                peer.name = Some(name);
            }
            if let Some(custom_status) = update.custom_status {
                peer.custom_status = Some(custom_status);
            }
            if let Some(photo_url) = update.photo_url {
                peer.photo_url = Some(photo_url);
            }
        }
        self.notify_peers();
        Ok(())
    }

    async fn append_message(&self, key: &ConversationKey, message: NewMessage) -> Result<String> {
        let now = self.clock.now();
        let expires_at = message
            .ttl()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| Error::Store(format!("Lifespan of {}s is out of range", message.ttl_secs)))?;
        let id = uuid::Uuid::new_v4().to_string();
        {
            let mut inner = self.lock();
            inner.check_available()?;
            inner.conversations.entry(key.clone()).or_default().push(RawMessage {
                id: id.clone(),
                text: message.text,
                sender_id: message.sender_id,
                sender_name: message.sender_name,
                sender_photo: message.sender_photo,
                created_at: Some(now),
                expires_at: Some(expires_at),
            });
        }
        debug!("Appended message {} to {}", id, key);
        self.notify_messages(key);
        Ok(id)
    }
}
