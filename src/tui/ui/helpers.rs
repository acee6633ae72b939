//! UI helper functions

use crate::storage::Presence;
use crate::tui::app::App;
use crate::tui::types::Tab;
use chrono::{DateTime, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Format the time left until a message expires
pub fn format_duration_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = expiry.signed_duration_since(now);

    if duration.num_days() > 0 {
        format!("{} days", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{} hours", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{} minutes", duration.num_minutes())
    } else {
        "expired".to_string()
    }
}

/// Presence indicator and its style
pub fn presence_indicator(status: Presence) -> (&'static str, Style) {
    match status {
        Presence::Online => ("● ", Style::default().fg(Color::Green)),
        Presence::Offline => ("○ ", Style::default().fg(Color::DarkGray)),
    }
}

/// Tab bar with the roster's notification count on the People tab
pub fn tab_bar(app: &App) -> Paragraph<'static> {
    let current = app.current_tab();
    let mut spans = Vec::new();

    for tab in Tab::all() {
        let label = if tab == Tab::Roster && app.roster.notification_count() > 0 {
            format!(" {} ({}) ", tab.label(), app.roster.notification_count())
        } else {
            format!(" {} ", tab.label())
        };

        let style = if tab == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Campus Chat - {}", app.session().profile().name)),
    )
}
