// App Tests - Testing App struct against the seeded demo store
//
// App owns its own runtime, so these are plain #[test] functions.

use crate::auth::StaticAuth;
use crate::clock::ManualClock;
use crate::storage::{ConversationKey, Presence, ReadMarkers, Settings};
use crate::store::{DocumentStore, MemoryStore};
use crate::tests::support::raw_msg;
use crate::tui::demo::{demo_viewer, seeded_store, DEMO_VIEWER_UID};
use crate::tui::{App, Screen, Tab};
use std::sync::Arc;

const NOW: i64 = 1_700_000_000;

fn demo_app() -> (App, Arc<MemoryStore>, ManualClock) {
    let clock = ManualClock::at_secs(NOW);
    let store = Arc::new(seeded_store(Arc::new(clock.clone())));
    let app = App::new(
        store.clone(),
        &StaticAuth::signed_in(demo_viewer()),
        Arc::new(clock.clone()),
        ReadMarkers::in_memory(),
        Settings::default(),
    )
    .expect("Failed to create app");
    (app, store, clock)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.input_char(c);
    }
}

#[test]
fn test_app_initialization() {
    let (app, store, _clock) = demo_app();

    assert_eq!(app.current_screen, Screen::GroupChat);
    assert!(!app.should_quit);
    assert_eq!(app.session().uid(), DEMO_VIEWER_UID);
    // The 13-hour-old group message has already expired
    assert_eq!(app.group.messages().len(), 2);
    assert_eq!(app.roster.len(), 4);
    assert!(app.group_screen.status_message.is_none());
    // Group listener, peers listener and one per peer
    assert_eq!(store.listener_count(), 6);
}

#[test]
fn test_roster_order_and_badge() {
    let (app, _store, _clock) = demo_app();

    let order: Vec<String> = app.roster_rows().into_iter().map(|r| r.peer.uid).collect();
    assert_eq!(order, vec!["student-asha", "student-ben", "student-chen", "student-dara"]);
    assert_eq!(app.roster.notification_count(), 1);
    assert_eq!(app.roster.unread_message_count(), 2);
    assert_eq!(app.selected_peer_uid().as_deref(), Some("student-asha"));
}

#[test]
fn test_tab_navigation() {
    let (mut app, _store, _clock) = demo_app();

    app.next_tab();
    assert_eq!(app.current_screen, Screen::Roster);
    app.next_tab();
    assert_eq!(app.current_screen, Screen::Profile);
    app.next_tab();
    assert_eq!(app.current_screen, Screen::GroupChat);
}

#[test]
fn test_open_private_chat_clears_unread() {
    let (mut app, store, _clock) = demo_app();
    app.show_tab(Tab::Roster);
    app.open_selected_chat();

    assert_eq!(app.current_screen, Screen::PrivateChat);
    assert_eq!(app.current_tab(), Tab::Roster);
    assert_eq!(app.private_peer_name().as_deref(), Some("Asha Rao"));
    assert_eq!(app.private.as_ref().unwrap().messages().len(), 2);
    assert_eq!(app.roster.notification_count(), 0);
    assert_eq!(store.listener_count(), 7);

    app.close_private_chat();
    assert_eq!(app.current_screen, Screen::Roster);
    assert!(app.private.is_none());
    assert_eq!(store.listener_count(), 6);
    assert_eq!(app.roster.notification_count(), 0);
}

#[test]
fn test_switching_tab_closes_private_chat() {
    let (mut app, store, _clock) = demo_app();
    app.open_private_chat("student-chen");
    assert_eq!(store.listener_count(), 7);

    app.show_tab(Tab::Group);
    assert_eq!(app.current_screen, Screen::GroupChat);
    assert!(app.private.is_none());
    assert_eq!(store.listener_count(), 6);
}

#[test]
fn test_send_group_message() {
    let (mut app, _store, _clock) = demo_app();
    type_text(&mut app, "see you there");
    assert_eq!(app.group_screen.input, "see you there");

    app.send_message_in_chat();
    assert!(app.group_screen.input.is_empty());
    assert!(app.group_screen.status_message.is_none());
    let last = app.group.messages().last().unwrap();
    assert_eq!(last.body, "see you there");
    assert_eq!(last.sender_id, DEMO_VIEWER_UID);
}

#[test]
fn test_send_empty_message_shows_error() {
    let (mut app, _store, _clock) = demo_app();
    type_text(&mut app, "   ");
    app.send_message_in_chat();

    assert!(app.group_screen.status_message.is_some());
    assert_eq!(app.group.messages().len(), 2);
}

#[test]
fn test_send_private_message() {
    let (mut app, store, _clock) = demo_app();
    app.open_private_chat("student-ben");
    type_text(&mut app, "got them, thanks");
    app.send_message_in_chat();

    assert!(app.private_screen.input.is_empty());
    let key = ConversationKey::pair(DEMO_VIEWER_UID, "student-ben");
    assert_eq!(store.stored_message_count(&key), 2);
}

#[test]
fn test_tick_picks_up_new_messages() {
    let (mut app, store, _clock) = demo_app();
    let key = ConversationKey::pair(DEMO_VIEWER_UID, "student-chen");
    store.insert_raw_message(&key, raw_msg("c1", "student-chen", NOW, NOW + 3600));
    app.tick();

    assert_eq!(app.roster.notification_count(), 2);
    assert_eq!(app.roster.entry("student-chen").unwrap().unread_count, 1);
}

#[test]
fn test_save_profile_updates_session_and_chats() {
    let (mut app, store, _clock) = demo_app();
    app.show_tab(Tab::Profile);
    assert_eq!(app.profile_screen.name_input, "You");

    app.profile_screen.clear_input();
    type_text(&mut app, "Sam Student");
    app.profile_screen.toggle_field();
    type_text(&mut app, "Studying");
    app.save_profile();

    assert!(!app.profile_screen.is_error);
    assert_eq!(app.profile_screen.status_message.as_deref(), Some("Profile saved"));
    assert_eq!(app.session().profile().name, "Sam Student");
    assert_eq!(app.session().profile().custom_status, "Studying");

    app.show_tab(Tab::Group);
    type_text(&mut app, "hi");
    app.send_message_in_chat();
    let last = app.group.messages().last().unwrap();
    assert_eq!(last.sender_name.as_deref(), Some("Sam Student"));

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let record = runtime.block_on(store.fetch_peer(DEMO_VIEWER_UID)).unwrap().unwrap();
    assert_eq!(record.name.as_deref(), Some("Sam Student"));
}

#[test]
fn test_save_invalid_profile() {
    let (mut app, _store, _clock) = demo_app();
    app.show_tab(Tab::Profile);
    app.profile_screen.clear_input();
    app.save_profile();

    assert!(app.profile_screen.is_error);
    assert_eq!(app.session().profile().name, "You");
}

#[test]
fn test_unavailable_store_then_retry() {
    let clock = ManualClock::at_secs(NOW);
    let store = Arc::new(seeded_store(Arc::new(clock.clone())));
    store.set_unavailable(true);
    let mut app = App::new(
        store.clone(),
        &StaticAuth::signed_in(demo_viewer()),
        Arc::new(clock.clone()),
        ReadMarkers::in_memory(),
        Settings::default(),
    )
    .unwrap();

    assert!(app.session().is_fallback_profile());
    assert!(app.profile_screen.is_error);
    assert!(app.group_screen.status_message.is_some());
    assert!(!app.roster.is_loaded());
    assert_eq!(store.listener_count(), 0);

    store.set_unavailable(false);
    app.retry_current();
    assert!(app.group_screen.status_message.is_none());
    assert_eq!(app.group.messages().len(), 2);

    app.show_tab(Tab::Roster);
    app.retry_current();
    assert!(app.roster.is_loaded());
    assert!(app.roster_screen.status_message.is_none());
    assert_eq!(app.roster.len(), 4);
}

#[test]
fn test_shutdown_releases_everything() {
    let (mut app, store, _clock) = demo_app();
    app.open_private_chat("student-asha");
    assert_eq!(store.listener_count(), 7);

    assert_eq!(app.shutdown(), 7);
    assert_eq!(store.listener_count(), 0);

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let record = runtime.block_on(store.fetch_peer(DEMO_VIEWER_UID)).unwrap().unwrap();
    assert_eq!(record.status, Some(Presence::Offline));
}
