// UI Tests - Testing UI helper functions and rendering

use crate::auth::StaticAuth;
use crate::clock::ManualClock;
use crate::storage::{Presence, ReadMarkers, Settings};
use crate::tui::demo::{demo_viewer, seeded_store};
use crate::tui::ui::{format_duration_until, presence_indicator, ui};
use crate::tui::{App, Tab};
use chrono::{Duration, Utc};
use ratatui::{backend::TestBackend, style::Color, Terminal};
use std::sync::Arc;

#[test]
fn test_format_duration_until() {
    let now = Utc::now();

    assert_eq!(format_duration_until(now + Duration::days(3) + Duration::hours(1), now), "3 days");
    assert_eq!(format_duration_until(now + Duration::hours(5) + Duration::minutes(1), now), "5 hours");
    assert_eq!(format_duration_until(now + Duration::minutes(30) + Duration::seconds(1), now), "30 minutes");
    assert_eq!(format_duration_until(now + Duration::seconds(20), now), "expired");
    assert_eq!(format_duration_until(now - Duration::hours(1), now), "expired");
}

#[test]
fn test_presence_indicator() {
    let (online, online_style) = presence_indicator(Presence::Online);
    let (offline, offline_style) = presence_indicator(Presence::Offline);

    assert_eq!(online, "● ");
    assert_eq!(offline, "○ ");
    assert_eq!(online_style.fg, Some(Color::Green));
    assert_eq!(offline_style.fg, Some(Color::DarkGray));
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| ui(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn demo_app() -> App {
    let clock = ManualClock::at_secs(1_700_000_000);
    let store = Arc::new(seeded_store(Arc::new(clock.clone())));
    App::new(
        store,
        &StaticAuth::signed_in(demo_viewer()),
        Arc::new(clock),
        ReadMarkers::in_memory(),
        Settings::default(),
    )
    .unwrap()
}

#[test]
fn test_render_group_chat() {
    let app = demo_app();
    let screen = render(&app);

    assert!(screen.contains("Campus Chat - You"));
    assert!(screen.contains("People (1)"));
    assert!(screen.contains("Count me in"));
    assert!(!screen.contains("Old news from yesterday"));
}

#[test]
fn test_render_roster() {
    let mut app = demo_app();
    app.show_tab(Tab::Roster);
    let screen = render(&app);

    assert!(screen.contains("People (2 online, 1 with new messages)"));
    assert!(screen.contains("Asha Rao - New message"));
    assert!(screen.contains("Dara Okafor - Back Monday"));
    assert!(screen.contains("[2]"));
}

#[test]
fn test_render_private_chat_and_profile() {
    let mut app = demo_app();
    app.open_private_chat("student-asha");
    let screen = render(&app);
    assert!(screen.contains("Chat with Asha Rao"));
    assert!(screen.contains("Deadline is 5pm"));

    app.show_tab(Tab::Profile);
    let screen = render(&app);
    assert!(screen.contains("Name (3/50)"));
}
