//! UI rendering module - screen-specific rendering functions
//!
//! Each screen has its own file; the group and private chats share one.

mod chat_view;
mod helpers;
mod profile;
mod roster;

use crate::tui::app::App;
use crate::tui::types::Screen;
use ratatui::Frame;

// Re-export render functions
pub use chat_view::{render_group_chat, render_private_chat};
pub use profile::render_profile;
pub use roster::render_roster;

// Re-export helper functions
pub use helpers::{format_duration_until, presence_indicator};

/// Main UI rendering function - dispatches to screen-specific render functions
pub fn ui(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::GroupChat => render_group_chat(f, app),
        Screen::Roster => render_roster(f, app),
        Screen::PrivateChat => render_private_chat(f, app),
        Screen::Profile => render_profile(f, app),
    }
}
