//! Roster screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use crate::tui::app::App;
use crate::tui::ui::helpers::{presence_indicator, tab_bar};

/// Renders the screen

pub fn render_roster(f: &mut Frame, app: &App) {
    let size = f.size();
    let now = app.now();
    let screen = &app.roster_screen;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Tabs
            Constraint::Length(3),  // Title
            Constraint::Min(5),     // Peer list
            Constraint::Length(3),  // Status message
            Constraint::Length(3),  // Help text
        ])
        .split(size);

    f.render_widget(tab_bar(app), chunks[0]);

    let title = Paragraph::new(format!(
        "People ({} online, {} with new messages)",
        app.roster.online_count(),
        app.roster.notification_count()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[1]);

    let rows = app.roster_rows();
    if !app.roster.is_loaded() {
        let loading = Paragraph::new("Loading people...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("People"));
        f.render_widget(loading, chunks[2]);
    } else if rows.is_empty() {
        let empty_msg = Paragraph::new("Nobody else is here yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("People"));
        f.render_widget(empty_msg, chunks[2]);
    } else {
        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let (dot, dot_style) = presence_indicator(row.peer.status);

                let name_style = if row.entry.has_unread() {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let status_style = if row.entry.has_unread() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let trailing = match (row.badge(), row.entry.time_ago(now)) {
                    (Some(badge), _) => Span::styled(
                        format!("  [{}]", badge),
                        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    (None, Some(ago)) => Span::styled(format!("  {}", ago), Style::default().fg(Color::DarkGray)),
                    (None, None) => Span::raw(""),
                };

                let cursor = if i == screen.selected_index {
                    Span::styled("→ ", Style::default().fg(Color::Cyan))
                } else {
                    Span::raw("  ")
                };

                let mut spans = vec![
                    cursor,
                    Span::styled(dot, dot_style),
                    Span::styled(format!("[{}] ", row.peer.initials()), Style::default().fg(Color::Cyan)),
                    Span::styled(row.peer.name.clone(), name_style),
                    Span::styled(format!(" - {}", row.status_line()), status_style),
                    trailing,
                ];
                if row.stale {
                    spans.push(Span::styled(" (!)", Style::default().fg(Color::Yellow)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("People (● Online | ○ Offline | ! Out of date)"),
        );
        f.render_widget(list, chunks[2]);
    }

    let (status_text, status_color) = match (&screen.status_message, app.roster.last_error()) {
        (Some(status), _) => (status.clone(), Color::Red),
        (None, Some(error)) => (format!("Connection problem: {} (r: Retry)", error), Color::Red),
        (None, None) => (
            format!("{} unread messages", app.roster.unread_message_count()),
            Color::Green,
        ),
    };
    let status_widget = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_widget, chunks[3]);

    let help_text = "↑↓/j/k: Navigate | Enter: Open | r: Refresh | Tab: Switch | q: Quit";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}
