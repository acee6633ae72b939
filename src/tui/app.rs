//! Main TUI application state and logic

use crate::auth::{AuthProvider, Session};
use crate::clock::Clock;
use crate::conversation::ConversationView;
use crate::roster::{Roster, RosterRow};
use crate::storage::{ReadMarkers, Settings};
use crate::store::DocumentStore;
use crate::tui::screens::*;
use crate::tui::types::{Screen, Tab};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;

/// Application state
///
/// The library views are async; the TUI loop is not. The app owns a
/// current-thread runtime and blocks on it for each store round trip.
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Should quit
    pub should_quit: bool,
    /// Roster view
    pub roster: Roster,
    /// Group chat view
    pub group: ConversationView,
    /// Private chat view (when open)
    pub private: Option<ConversationView>,
    /// Group chat screen
    pub group_screen: ChatScreen,
    /// Roster screen
    pub roster_screen: RosterScreen,
    /// Private chat screen
    pub private_screen: ChatScreen,
    /// Profile screen
    pub profile_screen: ProfileScreen,
    /// Loaded settings
    pub settings: Settings,
    runtime: Runtime,
    session: Session,
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    markers: ReadMarkers,
    last_poll: Instant,
}

impl App {
    /// Create the application and open the group chat and roster
    ///
    /// # Arguments
    /// * `store` - Document store
    /// * `auth` - Identity provider
    /// * `clock` - Time source
    /// * `markers` - Read marker storage
    /// * `settings` - Loaded settings
    ///
    /// # Errors
    /// Fails when nobody is signed in or the runtime cannot start. Views that
    /// fail to subscribe show a retry prompt instead.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: &dyn AuthProvider,
        clock: Arc<dyn Clock>,
        markers: ReadMarkers,
        settings: Settings,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let session = runtime.block_on(Session::start(store.clone(), auth, clock.as_ref()))?;
        let profile = session.profile().clone();

        let mut group = ConversationView::group(
            store.clone(),
            clock.clone(),
            markers.clone(),
            settings.clone(),
            profile.clone(),
        );
        let mut group_screen = ChatScreen::new();
        if let Err(e) = runtime.block_on(group.open()) {
            group_screen.set_status(format!("Could not load messages: {} (Ctrl+R: Retry)", e));
        }

        let mut roster = Roster::new(
            store.clone(),
            clock.clone(),
            markers.clone(),
            settings.clone(),
            session.uid(),
        );
        let mut roster_screen = RosterScreen::new();
        if let Err(e) = runtime.block_on(roster.open()) {
            roster_screen.set_status(format!("Could not load people: {} (r: Retry)", e));
        }

        let mut profile_screen = ProfileScreen::new(&profile);
        if session.is_fallback_profile() {
            profile_screen.set_error("Offline profile: changes may not be saved".to_string());
        }

        Ok(Self {
            current_screen: Screen::GroupChat,
            should_quit: false,
            roster,
            group,
            private: None,
            group_screen,
            roster_screen,
            private_screen: ChatScreen::new(),
            profile_screen,
            settings,
            runtime,
            session,
            store,
            clock,
            markers,
            last_poll: Instant::now(),
        })
    }

    /// Signed-in session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current time from the app clock
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Current tab
    pub fn current_tab(&self) -> Tab {
        Tab::for_screen(self.current_screen)
    }

    /// Apply pending store notifications and poll when due
    ///
    /// Called once per frame. Also re-filters the open chats so messages
    /// disappear as they expire.
    pub fn tick(&mut self) {
        self.runtime.block_on(self.roster.drain_events());
        self.group.drain_events();
        self.group.refresh();
        if let Some(view) = &mut self.private {
            view.drain_events();
            view.refresh();
        }

        if self.last_poll.elapsed() >= self.settings.poll_interval() {
            self.poll_now();
        }
        self.roster_screen.clamp(self.roster.len());
    }

    /// Re-fetch every roster conversation immediately
    pub fn poll_now(&mut self) {
        self.runtime.block_on(self.roster.poll_unread());
        self.last_poll = Instant::now();
    }

    /// Switch to the next tab
    pub fn next_tab(&mut self) {
        let next = self.current_tab().next();
        self.show_tab(next);
    }

    /// Switch to a tab
    pub fn show_tab(&mut self, tab: Tab) {
        if self.current_screen == Screen::PrivateChat {
            self.close_private_chat();
        }
        if tab == Tab::Profile {
            self.profile_screen = ProfileScreen::new(self.session.profile());
        }
        self.current_screen = tab.screen();
    }

    /// Rows currently shown on the roster
    pub fn roster_rows(&self) -> Vec<RosterRow> {
        self.roster.rows()
    }

    /// Uid of the selected roster row
    pub fn selected_peer_uid(&self) -> Option<String> {
        self.roster
            .rows()
            .get(self.roster_screen.selected_index)
            .map(|row| row.peer.uid.clone())
    }

    /// Open the private chat with the selected roster row
    pub fn open_selected_chat(&mut self) {
        if let Some(uid) = self.selected_peer_uid() {
            self.open_private_chat(&uid);
        }
    }

    /// Open the private chat with `peer_uid`
    pub fn open_private_chat(&mut self, peer_uid: &str) {
        if let Err(e) = self.roster.open_conversation(peer_uid) {
            self.roster_screen.set_status(format!("Could not mark chat read: {}", e));
        }

        let mut view = ConversationView::private(
            self.store.clone(),
            self.clock.clone(),
            self.markers.clone(),
            self.settings.clone(),
            self.session.profile().clone(),
            peer_uid,
        );

        self.private_screen = ChatScreen::new();
        if let Err(e) = self.runtime.block_on(view.open()) {
            self.private_screen
                .set_status(format!("Could not load messages: {} (Ctrl+R: Retry)", e));
        }

        self.private = Some(view);
        self.current_screen = Screen::PrivateChat;
    }

    /// Close the private chat and return to the roster
    pub fn close_private_chat(&mut self) {
        if let Some(mut view) = self.private.take() {
            view.close();
        }
        self.roster.recompute_all();
        self.current_screen = Screen::Roster;
    }

    /// Display name of the peer in the open private chat
    pub fn private_peer_name(&self) -> Option<String> {
        let uid = self.private.as_ref()?.peer_uid()?;
        Some(
            self.roster
                .peer(uid)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| uid.to_string()),
        )
    }

    /// Add a character to the focused input
    pub fn input_char(&mut self, c: char) {
        match self.current_screen {
            Screen::GroupChat => self.group_screen.add_char(c),
            Screen::PrivateChat => self.private_screen.add_char(c),
            Screen::Profile => self.profile_screen.add_char(c),
            Screen::Roster => {}
        }
    }

    /// Remove a character from the focused input
    pub fn input_backspace(&mut self) {
        match self.current_screen {
            Screen::GroupChat => self.group_screen.backspace(),
            Screen::PrivateChat => self.private_screen.backspace(),
            Screen::Profile => self.profile_screen.backspace(),
            Screen::Roster => {}
        }
    }

    /// Send the input of the current chat screen
    pub fn send_message_in_chat(&mut self) {
        let (view, screen) = match self.current_screen {
            Screen::GroupChat => (Some(&mut self.group), &mut self.group_screen),
            Screen::PrivateChat => (self.private.as_mut(), &mut self.private_screen),
            _ => return,
        };
        let Some(view) = view else {
            return;
        };

        match self.runtime.block_on(view.send(&screen.input)) {
            Ok(_) => {
                screen.clear_input();
                screen.clear_status();
                screen.scroll_offset = 0;
            }
            Err(e) => screen.set_status(e.to_string()),
        }
    }

    /// Retry the failed subscription on the current screen
    pub fn retry_current(&mut self) {
        match self.current_screen {
            Screen::GroupChat => match self.runtime.block_on(self.group.retry()) {
                Ok(()) => self.group_screen.clear_status(),
                Err(e) => self
                    .group_screen
                    .set_status(format!("Could not load messages: {} (Ctrl+R: Retry)", e)),
            },
            Screen::PrivateChat => {
                if let Some(view) = &mut self.private {
                    match self.runtime.block_on(view.retry()) {
                        Ok(()) => self.private_screen.clear_status(),
                        Err(e) => self
                            .private_screen
                            .set_status(format!("Could not load messages: {} (Ctrl+R: Retry)", e)),
                    }
                }
            }
            Screen::Roster => {
                if self.roster.is_loaded() {
                    self.poll_now();
                    self.roster_screen.clear_status();
                } else {
                    self.roster.close();
                    match self.runtime.block_on(self.roster.open()) {
                        Ok(()) => self.roster_screen.clear_status(),
                        Err(e) => self
                            .roster_screen
                            .set_status(format!("Could not load people: {} (r: Retry)", e)),
                    }
                }
            }
            Screen::Profile => {}
        }
    }

    /// Validate and save the profile form
    pub fn save_profile(&mut self) {
        let update = self.profile_screen.to_update();
        match self.runtime.block_on(self.session.update_profile(update)) {
            Ok(()) => {
                let profile = self.session.profile().clone();
                self.group.set_author(profile.clone());
                if let Some(view) = &mut self.private {
                    view.set_author(profile);
                }
                self.profile_screen.set_saved("Profile saved".to_string());
            }
            Err(e) => self.profile_screen.set_error(e.to_string()),
        }
    }

    /// Close every view and end the session
    ///
    /// Returns the number of subscriptions released.
    pub fn shutdown(mut self) -> usize {
        let mut released = self.group.close();
        if let Some(mut view) = self.private.take() {
            released += view.close();
        }
        released += self.roster.close();
        self.runtime.block_on(self.session.end());
        released
    }
}
