//! Document store collaborator
//!
//! The hosted real-time document database is external to this crate. This
//! module defines the contract the client relies on:
//! - push subscriptions that deliver the *complete* current snapshot on every change
//! - explicit, disposable subscription handles
//! - plain CRUD-style writes where the store stamps server timestamps
//!
//! [`MemoryStore`] implements the contract in-process for tests and the
//! terminal client.

pub mod memory;

pub use memory::MemoryStore;

use crate::{
    storage::{ConversationKey, NewMessage, PeerRecord, Presence, ProfileUpdate, RawMessage, RawPeer},
    Result,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Notification pushed by a subscription
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent<T> {
    /// Complete current result set of the subscribed query
    Snapshot(Vec<T>),
    /// The listener failed; no snapshot accompanies this event
    Error(String),
}

/// Callback receiving peer collection notifications
pub type PeersHandler = Arc<dyn Fn(StoreEvent<RawPeer>) + Send + Sync>;

/// Callback receiving message collection notifications
pub type MessagesHandler = Arc<dyn Fn(StoreEvent<RawMessage>) + Send + Sync>;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Disposable handle to an active listener
///
/// Call [`SubscriptionHandle::cancel`] when the consuming view goes away.
/// A handle dropped without being cancelled is released anyway, with a
/// warning, since that points at a missing teardown path.
pub struct SubscriptionHandle {
    id: u64,
    label: String,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    /// Wrap a release callback
    ///
    /// # Arguments
    /// * `label` - Human-readable description used in logs (e.g. the query path)
    /// * `release` - Detaches the listener from the store; invoked at most once
    pub fn new<F>(label: impl Into<String>, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
            release: Some(Box::new(release)),
        }
    }

    /// Process-unique handle id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Label given at creation
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Release the listener
    pub fn cancel(mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!("Releasing subscription {} ({})", self.id, self.label);
            release();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::warn!(
                "Subscription {} ({}) dropped without cancel; releasing",
                self.id,
                self.label
            );
            release();
        }
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

/// Real-time document store client
///
/// Every read and write is asynchronous. Subscriptions deliver an initial
/// snapshot and then a fresh complete snapshot after every change; delivery
/// order under concurrent writers need not match `created_at` order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Listen to the full collection of user records
    async fn subscribe_peers(&self, handler: PeersHandler) -> Result<SubscriptionHandle>;

    /// Listen to a conversation's newest `limit` messages, newest first
    async fn subscribe_messages(
        &self,
        key: &ConversationKey,
        limit: usize,
        handler: MessagesHandler,
    ) -> Result<SubscriptionHandle>;

    /// One-shot read of a conversation's newest `limit` messages, newest first
    async fn fetch_messages(&self, key: &ConversationKey, limit: usize) -> Result<Vec<RawMessage>>;

    /// One-shot read of a single user record
    async fn fetch_peer(&self, uid: &str) -> Result<Option<RawPeer>>;

    /// Create a user record; `last_seen` is stamped by the store
    async fn create_peer(&self, record: PeerRecord) -> Result<()>;

    /// Update a user's presence; `last_seen` is stamped by the store
    async fn set_presence(&self, uid: &str, status: Presence) -> Result<()>;

    /// Merge a partial profile update into a user record
    async fn update_profile(&self, uid: &str, update: ProfileUpdate) -> Result<()>;

    /// Append a message to a conversation and return its id
    ///
    /// The store sets `created_at` from its clock and
    /// `expires_at = created_at + message.ttl()`.
    async fn append_message(&self, key: &ConversationKey, message: NewMessage) -> Result<String>;
}
