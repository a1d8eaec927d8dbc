//! Chat-room directory
//!
//! Displays the role's chat rooms with status badges and last messages.

use colloq_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";
const LAST_MESSAGE_MAX_CHARS: usize = 48;

/// Render the chat-room directory.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Chats ");

    let directory = app.directory();
    if directory.is_loading() {
        let paragraph = Paragraph::new("Loading chats...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }
    if let Some(message) = directory.error() {
        let lines = vec![
            Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
            Line::from(Span::styled("Press 'r' to retry", Style::default().fg(Color::DarkGray))),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }
    if directory.rooms().is_empty() {
        let paragraph = Paragraph::new("No chats yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = directory
        .rooms()
        .iter()
        .enumerate()
        .map(|(index, room)| {
            let selected = index == app.directory_cursor();
            let prefix = if selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX };
            let title_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::raw(prefix),
                Span::styled(room.title().to_string(), title_style),
                Span::raw(" "),
                status_badge(room.status),
            ];
            if let Some(reviewer) = &room.reviewer_name {
                spans.push(Span::styled(
                    format!("  {reviewer}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
            if let Some(last) = &room.last_message {
                spans.push(Span::styled(
                    format!("  {}", snippet(&last.message)),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn status_badge(status: colloq_proto::RoomStatus) -> Span<'static> {
    use colloq_proto::RoomStatus;
    let color = match status {
        RoomStatus::Pending => Color::Green,
        RoomStatus::Completed => Color::Blue,
        RoomStatus::Declined => Color::Red,
    };
    Span::styled(format!("[{status}]"), Style::default().fg(color))
}

/// Truncate a last-message preview on a char boundary.
fn snippet(text: &str) -> String {
    if text.chars().count() <= LAST_MESSAGE_MAX_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(LAST_MESSAGE_MAX_CHARS).collect();
    format!("{cut}…")
}
