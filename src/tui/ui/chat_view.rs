//! Chat view screen rendering, for both group and private chats

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use crate::conversation::ConversationView;
use crate::storage::ChatKind;
use crate::tui::app::App;
use crate::tui::screens::ChatScreen;
use crate::tui::ui::helpers::{format_duration_until, tab_bar};

/// Renders the group chat
pub fn render_group_chat(f: &mut Frame, app: &App) {
    render_chat(f, app, &app.group, &app.group_screen, "Campus chat".to_string());
}

/// Renders the open private chat
pub fn render_private_chat(f: &mut Frame, app: &App) {
    if let Some(view) = &app.private {
        let title = format!(
            "Chat with {}",
            app.private_peer_name().unwrap_or_default()
        );
        render_chat(f, app, view, &app.private_screen, title);
    }
}

fn render_chat(f: &mut Frame, app: &App, view: &ConversationView, screen: &ChatScreen, title: String) {
    let size = f.size();
    let now = app.now();
    let viewer = app.session().uid();
    let offset = app.settings.display_offset_minutes;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Tabs
            Constraint::Length(3),  // Title
            Constraint::Min(5),     // Message history
            Constraint::Length(3),  // Input box
            Constraint::Length(3),  // Status/Help
        ])
        .split(size);

    f.render_widget(tab_bar(app), chunks[0]);

    let ttl = app.settings.ttl_for(view.kind());
    let lifespan = if ttl.num_hours() >= 24 && ttl.num_hours() % 24 == 0 {
        format!("{} days", ttl.num_days())
    } else {
        format!("{} hours", ttl.num_hours())
    };
    let title_widget = Paragraph::new(Line::from(vec![
        Span::styled(title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  (messages vanish after {})", lifespan),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title_widget, chunks[1]);

    let messages = view.messages();
    if !view.is_loaded() {
        let loading = Paragraph::new("Loading messages...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Messages"));
        f.render_widget(loading, chunks[2]);
    } else if messages.is_empty() {
        let empty_msg = Paragraph::new("No messages yet. Type a message below and press Enter to send.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Messages"));
        f.render_widget(empty_msg, chunks[2]);
    } else {
        // Newest message at the bottom; scroll_offset counts back from it
        let total = messages.len();
        let visible_height = chunks[2].height.saturating_sub(2) as usize;
        let end_idx = total.saturating_sub(screen.scroll_offset.min(total));
        let start_idx = end_idx.saturating_sub(visible_height);

        let message_lines: Vec<Line> = messages[start_idx..end_idx]
            .iter()
            .map(|msg| {
                let is_from_me = msg.is_from(viewer);
                let sender_label = if is_from_me {
                    "You".to_string()
                } else {
                    match view.kind() {
                        ChatKind::Group => msg.sender_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                        ChatKind::Private => app.private_peer_name().unwrap_or_else(|| "Them".to_string()),
                    }
                };
                let sender_color = if is_from_me { Color::Green } else { Color::Blue };

                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", msg.clock_label(offset)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{}: ", sender_label),
                        Style::default().fg(sender_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(msg.body.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  ({} left)", format_duration_until(msg.expires_at, now)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();

        let messages_widget = Paragraph::new(message_lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Messages ({}/{})", end_idx, total)),
            );
        f.render_widget(messages_widget, chunks[2]);
    }

    let counter = format!(
        "Type your message ({}/{})",
        screen.input.trim().chars().count(),
        app.settings.max_body_chars
    );
    let input_widget = Paragraph::new(screen.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(counter));
    f.render_widget(input_widget, chunks[3]);

    let (help_text, help_color) = if let Some(status) = &screen.status_message {
        (status.clone(), Color::Red)
    } else if let Some(error) = view.last_error() {
        (format!("Connection problem: {} (Ctrl+R: Retry)", error), Color::Red)
    } else {
        let back = match view.kind() {
            ChatKind::Group => "Tab: Switch",
            ChatKind::Private => "Esc: Back to People",
        };
        (
            format!("Enter: Send | PgUp/PgDn: Scroll | {} | Ctrl+C: Quit", back),
            Color::DarkGray,
        )
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(help_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}
