//! Subscription manager
//!
//! One registry owns every listener a view opens: at most one handle per
//! conversation, plus the roster listener. Views release them one at a time
//! as peers disappear and all at once when the view closes, so the number of
//! open listeners is always visible through [`SubscriptionManager::len`].

use crate::{storage::ConversationKey, store::SubscriptionHandle};
use std::collections::HashMap;

/// Registry of active subscription handles keyed by conversation
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    roster: Option<SubscriptionHandle>,
    conversations: HashMap<ConversationKey, SubscriptionHandle>,
}

impl SubscriptionManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the roster (peers) listener, releasing any previous one
    pub fn set_roster(&mut self, handle: SubscriptionHandle) {
        if let Some(previous) = self.roster.replace(handle) {
            previous.cancel();
        }
    }

    /// Register a conversation listener, releasing any previous one for the key
    pub fn insert(&mut self, key: ConversationKey, handle: SubscriptionHandle) {
        if let Some(previous) = self.conversations.insert(key, handle) {
            previous.cancel();
        }
    }

    /// Check whether a conversation has a registered listener
    pub fn contains(&self, key: &ConversationKey) -> bool {
        self.conversations.contains_key(key)
    }

    /// Release one conversation listener
    ///
    /// Returns `true` if a listener was registered for the key.
    pub fn release(&mut self, key: &ConversationKey) -> bool {
        match self.conversations.remove(key) {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Release every listener, the roster listener included
    ///
    /// Returns the number of handles released.
    pub fn release_all(&mut self) -> usize {
        let mut released = 0;

        if let Some(handle) = self.roster.take() {
            handle.cancel();
            released += 1;
        }

        for (_, handle) in self.conversations.drain() {
            handle.cancel();
            released += 1;
        }

        if released > 0 {
            tracing::debug!("Released {} subscriptions", released);
        }
        released
    }

    /// Conversations with a registered listener
    pub fn keys(&self) -> impl Iterator<Item = &ConversationKey> {
        self.conversations.keys()
    }

    /// Number of registered handles, the roster listener included
    pub fn len(&self) -> usize {
        self.conversations.len() + usize::from(self.roster.is_some())
    }

    /// Check whether no handle is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
