//! Profile screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::auth::{MAX_NAME_CHARS, MAX_STATUS_CHARS};
use crate::tui::app::App;
use crate::tui::screens::ProfileField;
use crate::tui::ui::helpers::tab_bar;

/// Renders the screen

pub fn render_profile(f: &mut Frame, app: &App) {
    let size = f.size();
    let screen = &app.profile_screen;
    let profile = app.session().profile();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Tabs
            Constraint::Length(4),  // Card
            Constraint::Length(4),  // Name field
            Constraint::Length(4),  // Status field
            Constraint::Length(3),  // Status message
            Constraint::Length(3),  // Help text
        ])
        .split(size);

    f.render_widget(tab_bar(app), chunks[0]);

    let card = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] ", profile.initials()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(profile.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(profile.email.clone(), Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("You"));
    f.render_widget(card, chunks[1]);

    let field_block = |label: String, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default().borders(Borders::ALL).border_style(style).title(label)
    };

    let name = Paragraph::new(screen.name_input.as_str())
        .style(Style::default().fg(Color::Green))
        .block(field_block(
            format!("Name ({}/{})", screen.name_input.trim().chars().count(), MAX_NAME_CHARS),
            screen.selected_field == ProfileField::Name,
        ));
    f.render_widget(name, chunks[2]);

    let status = Paragraph::new(screen.status_input.as_str())
        .style(Style::default().fg(Color::Green))
        .block(field_block(
            format!("Status ({}/{})", screen.status_input.trim().chars().count(), MAX_STATUS_CHARS),
            screen.selected_field == ProfileField::Status,
        ));
    f.render_widget(status, chunks[3]);

    let status_text = screen.status_message.as_deref().unwrap_or("");
    let status_color = if screen.is_error { Color::Red } else { Color::Green };
    let status_widget = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_widget, chunks[4]);

    let help_text = "Enter: Save | ↑↓: Switch field | Delete: Clear | Tab: Switch | Ctrl+C: Quit";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[5]);
}
