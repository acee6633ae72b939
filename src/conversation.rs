//! Conversation view
//!
//! Keeps the live message list of one conversation (the group chat or a
//! private chat) in sync with the store. Store callbacks only forward events
//! into a channel; the owner drains it from its event loop, so all state
//! changes happen on one task.

use crate::{
    clock::Clock,
    inbox::live_messages,
    messaging::send_message_with_limits,
    storage::{ChatKind, ConversationKey, Message, Peer, RawMessage, ReadMarkers, Settings},
    store::{DocumentStore, MessagesHandler, StoreEvent},
    subscriptions::SubscriptionManager,
    Result,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Live view of one conversation
pub struct ConversationView {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    markers: ReadMarkers,
    settings: Settings,
    kind: ChatKind,
    key: ConversationKey,
    author: Peer,
    peer_uid: Option<String>,
    subscriptions: SubscriptionManager,
    events_tx: mpsc::UnboundedSender<StoreEvent<RawMessage>>,
    events_rx: mpsc::UnboundedReceiver<StoreEvent<RawMessage>>,
    snapshot: Vec<RawMessage>,
    messages: Vec<Message>,
    loaded: bool,
    last_error: Option<String>,
}

impl ConversationView {
    #[allow(clippy::too_many_arguments)]
    fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        markers: ReadMarkers,
        settings: Settings,
        kind: ChatKind,
        key: ConversationKey,
        author: Peer,
        peer_uid: Option<String>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            store,
            clock,
            markers,
            settings,
            kind,
            key,
            author,
            peer_uid,
            subscriptions: SubscriptionManager::new(),
            events_tx,
            events_rx,
            snapshot: Vec::new(),
            messages: Vec::new(),
            loaded: false,
            last_error: None,
        }
    }

    /// View of the campus-wide group chat
    pub fn group(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        markers: ReadMarkers,
        settings: Settings,
        author: Peer,
    ) -> Self {
        Self::new(
            store,
            clock,
            markers,
            settings,
            ChatKind::Group,
            ConversationKey::group(),
            author,
            None,
        )
    }

    /// View of the private chat between `author` and `peer_uid`
    pub fn private(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        markers: ReadMarkers,
        settings: Settings,
        author: Peer,
        peer_uid: &str,
    ) -> Self {
        let key = ConversationKey::pair(&author.uid, peer_uid);
        Self::new(
            store,
            clock,
            markers,
            settings,
            ChatKind::Private,
            key,
            author,
            Some(peer_uid.to_string()),
        )
    }

    /// Subscribe to the conversation and mark it read
    ///
    /// The read marker is written at this instant only; messages arriving
    /// later stay unread until the conversation is opened again.
    ///
    /// # Errors
    /// Returns the store error if the listener cannot be set up; the error is
    /// also kept in [`ConversationView::last_error`] for a retry prompt.
    pub async fn open(&mut self) -> Result<()> {
        let tx = self.events_tx.clone();
        let handler: MessagesHandler = Arc::new(move |event| {
            let _ = tx.send(event);
        });

        match self
            .store
            .subscribe_messages(&self.key, self.settings.page_size, handler)
            .await
        {
            Ok(handle) => {
                self.subscriptions.insert(self.key.clone(), handle);
                debug!("Opened conversation {}", self.key);
            }
            Err(e) => {
                warn!("Failed to subscribe to {}: {}", self.key, e);
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        }

        if self.kind == ChatKind::Private {
            if let Err(e) = self.markers.mark_read(&self.key, self.clock.now()) {
                warn!("Failed to store read marker for {}: {}", self.key, e);
            }
        }

        self.drain_events();
        Ok(())
    }

    /// Tear down and set up the subscription again
    pub async fn retry(&mut self) -> Result<()> {
        self.subscriptions.release_all();
        self.open().await
    }

    /// Apply one store notification
    pub fn handle_event(&mut self, event: StoreEvent<RawMessage>) {
        match event {
            StoreEvent::Snapshot(snapshot) => {
                self.snapshot = snapshot;
                self.loaded = true;
                self.last_error = None;
                self.refresh();
            }
            StoreEvent::Error(e) => {
                warn!("Listener error on {}: {}", self.key, e);
                self.last_error = Some(e);
            }
        }
    }

    /// Apply every queued notification; returns how many were applied
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next notification and apply it
    ///
    /// Returns `false` once the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Re-filter the last snapshot against the current time
    ///
    /// Messages expire without any store notification, so callers tick this
    /// periodically.
    pub fn refresh(&mut self) {
        self.messages = live_messages(self.snapshot.clone(), self.clock.now());
    }

    /// Validate and send a message as the viewer
    pub async fn send(&mut self, text: &str) -> Result<String> {
        let id = send_message_with_limits(
            self.store.as_ref(),
            self.kind,
            &self.key,
            &self.author,
            text,
            self.settings.max_body_chars,
            self.settings.ttl_for(self.kind),
        )
        .await?;
        self.drain_events();
        Ok(id)
    }

    /// Release the subscription; returns the number of handles released
    pub fn close(&mut self) -> usize {
        let released = self.subscriptions.release_all();
        debug!("Closed conversation {}", self.key);
        released
    }

    /// Live messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the first snapshot has arrived
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Last listener error, cleared by the next snapshot
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Conversation key
    pub fn key(&self) -> &ConversationKey {
        &self.key
    }

    /// Chat kind
    pub fn kind(&self) -> ChatKind {
        self.kind
    }

    /// The other participant in a private chat
    pub fn peer_uid(&self) -> Option<&str> {
        self.peer_uid.as_deref()
    }

    /// The viewer's profile used as message author
    pub fn author(&self) -> &Peer {
        &self.author
    }

    /// Replace the author profile after a profile edit
    pub fn set_author(&mut self, author: Peer) {
        self.author = author;
    }

    /// Number of open subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
