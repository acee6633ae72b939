//! Roster view
//!
//! The contact list: every peer, its presence, and the unread/recency state
//! of the viewer's private conversation with it. The roster opens one
//! conversation listener per peer through a [`SubscriptionManager`], so
//! listener count grows with the roster and is torn down in one batch on
//! [`Roster::close`].
//!
//! Every notification carries a complete snapshot. Entries are recomputed
//! from scratch each time, and a periodic poll re-fetches every
//! conversation in case a push was missed. Failures stay local to the
//! affected row: its last known entry is kept and flagged stale.

use crate::{
    clock::Clock,
    inbox::{badge_label, compute_entry, peers_with_unread, sort_by_recency, total_unread, InboxEntry},
    storage::{ConversationKey, Message, Peer, RawMessage, RawPeer, ReadMarkers, Settings},
    store::{DocumentStore, MessagesHandler, PeersHandler, StoreEvent},
    subscriptions::SubscriptionManager,
    Result,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Notification forwarded from a store listener
#[derive(Debug, Clone, PartialEq)]
pub enum RosterEvent {
    /// Change in the peers collection
    Peers(StoreEvent<RawPeer>),
    /// Change in the conversation with one peer
    Messages {
        /// The peer whose conversation changed
        peer_uid: String,
        /// The notification
        event: StoreEvent<RawMessage>,
    },
}

/// One row of the roster, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// The peer
    pub peer: Peer,
    /// Derived unread/recency state
    pub entry: InboxEntry,
    /// Whether the entry may be out of date after a failure
    pub stale: bool,
}

impl RosterRow {
    /// Secondary line under the peer name
    pub fn status_line(&self) -> String {
        if self.entry.has_unread() {
            "New message".to_string()
        } else if !self.peer.custom_status.is_empty() {
            self.peer.custom_status.clone()
        } else {
            self.peer.status.label().to_string()
        }
    }

    /// Unread badge, when there is anything unread
    pub fn badge(&self) -> Option<String> {
        self.entry.has_unread().then(|| badge_label(self.entry.unread_count))
    }

    /// Right-hand label: the badge if unread, otherwise the time-ago text
    pub fn trailing_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.badge().or_else(|| self.entry.time_ago(now))
    }
}

struct PeerState {
    peer: Peer,
    key: ConversationKey,
    snapshot: Option<Vec<RawMessage>>,
    entry: InboxEntry,
    stale: bool,
}

/// Live roster with unread tracking
pub struct Roster {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    markers: ReadMarkers,
    settings: Settings,
    viewer: String,
    subscriptions: SubscriptionManager,
    peers: HashMap<String, PeerState>,
    events_tx: mpsc::UnboundedSender<RosterEvent>,
    events_rx: mpsc::UnboundedReceiver<RosterEvent>,
    loaded: bool,
    last_error: Option<String>,
}

impl Roster {
    /// Create a closed roster for `viewer`
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        markers: ReadMarkers,
        settings: Settings,
        viewer: &str,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            store,
            clock,
            markers,
            settings,
            viewer: viewer.to_string(),
            subscriptions: SubscriptionManager::new(),
            peers: HashMap::new(),
            events_tx,
            events_rx,
            loaded: false,
            last_error: None,
        }
    }

    /// Subscribe to the peers collection and apply the initial snapshot
    ///
    /// # Errors
    /// Returns the store error if the peers listener cannot be set up. This
    /// is the only failure that keeps the roster from loading at all.
    pub async fn open(&mut self) -> Result<()> {
        let tx = self.events_tx.clone();
        let handler: PeersHandler = Arc::new(move |event| {
            let _ = tx.send(RosterEvent::Peers(event));
        });

        match self.store.subscribe_peers(handler).await {
            Ok(handle) => self.subscriptions.set_roster(handle),
            Err(e) => {
                warn!("Failed to subscribe to peers: {}", e);
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        }

        info!("Roster opened for {}", self.viewer);
        self.drain_events().await;
        Ok(())
    }

    /// Apply one notification
    pub async fn handle_event(&mut self, event: RosterEvent) {
        match event {
            RosterEvent::Peers(StoreEvent::Snapshot(raw)) => self.apply_peers(raw).await,
            RosterEvent::Peers(StoreEvent::Error(e)) => {
                warn!("Peers listener error: {}", e);
                self.last_error = Some(e);
            }
            RosterEvent::Messages { peer_uid, event } => self.apply_messages(&peer_uid, event),
        }
    }

    /// Apply every queued notification; returns how many were applied
    pub async fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event).await;
            applied += 1;
        }
        applied
    }

    async fn apply_peers(&mut self, raw: Vec<RawPeer>) {
        let now = self.clock.now();
        let incoming: Vec<Peer> = raw
            .into_iter()
            .map(|p| Peer::from_raw(p, now))
            .filter(|p| p.uid != self.viewer)
            .collect();
        let present: HashSet<&str> = incoming.iter().map(|p| p.uid.as_str()).collect();

        let removed: Vec<String> = self
            .peers
            .keys()
            .filter(|uid| !present.contains(uid.as_str()))
            .cloned()
            .collect();
        for uid in removed {
            if let Some(state) = self.peers.remove(&uid) {
                self.subscriptions.release(&state.key);
                debug!("Peer {} left the roster", uid);
            }
        }

        let mut added = Vec::new();
        for peer in incoming {
            match self.peers.get_mut(&peer.uid) {
                Some(state) => {
                    state.entry.is_online = peer.is_online();
                    if !self.subscriptions.contains(&state.key) {
                        // Listener was released by close() or never came up
                        added.push(peer.uid.clone());
                    }
                    state.peer = peer;
                }
                None => {
                    let key = ConversationKey::pair(&self.viewer, &peer.uid);
                    let entry = InboxEntry::empty(&peer.uid, peer.is_online());
                    added.push(peer.uid.clone());
                    self.peers.insert(
                        peer.uid.clone(),
                        PeerState {
                            peer,
                            key,
                            snapshot: None,
                            entry,
                            stale: false,
                        },
                    );
                }
            }
        }

        for uid in added {
            self.subscribe_conversation(&uid).await;
        }

        self.loaded = true;
        self.last_error = None;
    }

    async fn subscribe_conversation(&mut self, peer_uid: &str) {
        let Some(key) = self.peers.get(peer_uid).map(|s| s.key.clone()) else {
            return;
        };

        let tx = self.events_tx.clone();
        let uid = peer_uid.to_string();
        let handler: MessagesHandler = Arc::new(move |event| {
            let _ = tx.send(RosterEvent::Messages {
                peer_uid: uid.clone(),
                event,
            });
        });

        match self
            .store
            .subscribe_messages(&key, self.settings.page_size, handler)
            .await
        {
            Ok(handle) => self.subscriptions.insert(key, handle),
            Err(e) => {
                warn!("Failed to listen to conversation with {}: {}", peer_uid, e);
                if let Some(state) = self.peers.get_mut(peer_uid) {
                    state.stale = true;
                }
            }
        }
    }

    fn apply_messages(&mut self, peer_uid: &str, event: StoreEvent<RawMessage>) {
        let Some(state) = self.peers.get_mut(peer_uid) else {
            // Late notification for a peer that already left
            return;
        };

        match event {
            StoreEvent::Snapshot(snapshot) => {
                state.snapshot = Some(snapshot);
                state.stale = false;
                self.recompute(peer_uid);
            }
            StoreEvent::Error(e) => {
                warn!("Conversation listener error for {}: {}", peer_uid, e);
                state.stale = true;
            }
        }
    }

    fn recompute(&mut self, peer_uid: &str) {
        let now = self.clock.now();
        let Some(state) = self.peers.get_mut(peer_uid) else {
            return;
        };

        let messages: Vec<Message> = state
            .snapshot
            .iter()
            .flatten()
            .cloned()
            .map(|raw| Message::from_raw(raw, now))
            .collect();
        let marker = self.markers.get_or_epoch(&state.key);

        state.entry = compute_entry(
            peer_uid,
            &messages,
            &self.viewer,
            marker,
            now,
            state.peer.is_online(),
        );
    }

    /// Recompute every entry from its last snapshot
    ///
    /// Needed as time passes even without notifications, since messages
    /// expire on their own.
    pub fn recompute_all(&mut self) {
        let uids: Vec<String> = self.peers.keys().cloned().collect();
        for uid in uids {
            self.recompute(&uid);
        }
    }

    /// Re-fetch every conversation and recompute from scratch
    ///
    /// Peers whose listener failed to set up get another attempt. A failed
    /// fetch keeps that peer's previous entry and marks it stale.
    pub async fn poll_unread(&mut self) {
        let targets: Vec<(String, ConversationKey)> = self
            .peers
            .iter()
            .map(|(uid, state)| (uid.clone(), state.key.clone()))
            .collect();

        for (uid, key) in targets {
            if !self.subscriptions.contains(&key) {
                self.subscribe_conversation(&uid).await;
            }

            match self.store.fetch_messages(&key, self.settings.page_size).await {
                Ok(snapshot) => {
                    let listening = self.subscriptions.contains(&key);
                    if let Some(state) = self.peers.get_mut(&uid) {
                        state.snapshot = Some(snapshot);
                        // Without a listener, pushes are still being missed
                        state.stale = !listening;
                    }
                }
                Err(e) => {
                    debug!("Poll for {} failed: {}", uid, e);
                    if let Some(state) = self.peers.get_mut(&uid) {
                        state.stale = true;
                    }
                    continue;
                }
            }
            self.recompute(&uid);
        }
    }

    /// Mark the conversation with `peer_uid` read as of now
    ///
    /// Returns the conversation key to open.
    pub fn open_conversation(&mut self, peer_uid: &str) -> Result<ConversationKey> {
        let key = ConversationKey::pair(&self.viewer, peer_uid);
        self.markers.mark_read(&key, self.clock.now())?;
        self.recompute(peer_uid);
        Ok(key)
    }

    /// Drive the roster until `shutdown` flips to `true` or its sender drops
    ///
    /// Applies notifications as they arrive and polls every
    /// `Settings::poll_interval_ms`. Releases all subscriptions before
    /// returning and reports how many were released.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> usize {
        let mut ticker = tokio::time::interval(self.settings.poll_interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                Some(event) = self.events_rx.recv() => {
                    self.handle_event(event).await;
                }
                _ = ticker.tick() => {
                    self.poll_unread().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        self.close()
    }

    /// Release every subscription; returns how many were released
    ///
    /// Rows keep their last entries. A later [`Roster::open`] subscribes
    /// every peer again.
    pub fn close(&mut self) -> usize {
        let released = self.subscriptions.release_all();
        info!("Roster closed, released {} subscriptions", released);
        released
    }

    /// Rows in roster order
    pub fn rows(&self) -> Vec<RosterRow> {
        let mut rows: Vec<RosterRow> = self
            .peers
            .values()
            .map(|state| RosterRow {
                peer: state.peer.clone(),
                entry: state.entry.clone(),
                stale: state.stale,
            })
            .collect();
        sort_by_recency(&mut rows, |row| (&row.entry, row.peer.name.as_str()));
        rows
    }

    /// Current entry for one peer
    pub fn entry(&self, peer_uid: &str) -> Option<&InboxEntry> {
        self.peers.get(peer_uid).map(|s| &s.entry)
    }

    /// Peer record for one peer
    pub fn peer(&self, peer_uid: &str) -> Option<&Peer> {
        self.peers.get(peer_uid).map(|s| &s.peer)
    }

    /// Bell badge count: peers with at least one unread message
    pub fn notification_count(&self) -> usize {
        peers_with_unread(self.peers.values().map(|s| &s.entry))
    }

    /// Unread messages across all conversations
    pub fn unread_message_count(&self) -> usize {
        total_unread(self.peers.values().map(|s| &s.entry))
    }

    /// Number of online peers
    pub fn online_count(&self) -> usize {
        self.peers.values().filter(|s| s.peer.is_online()).count()
    }

    /// Number of peers
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check whether the roster has no peers
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Whether the first peers snapshot has arrived
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Last peers listener error, for a retry prompt
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of open subscriptions, the peers listener included
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// The viewer uid
    pub fn viewer(&self) -> &str {
        &self.viewer
    }
}
