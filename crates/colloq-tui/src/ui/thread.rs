//! Thread view
//!
//! Displays the message history of the open room, oldest first, with
//! pending markers on optimistic entries.

use colloq_app::{App, HistoryState};
use colloq_proto::RoomStatus;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const PENDING_MARKER: &str = " (sending)";

/// Render the thread view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .active_room()
        .map_or_else(|| " Chat ".to_string(), |room| format!(" {} ", room.title()));
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(session) = app.session() else {
        let placeholder = ListItem::new(Line::from(Span::styled(
            "Opening chat...",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(List::new(vec![placeholder]).block(block), area);
        return;
    };

    let own_role = app.auth().role;
    let mut items: Vec<ListItem> = match session.history() {
        HistoryState::Loading => vec![ListItem::new(Line::from(Span::styled(
            "Loading messages...",
            Style::default().fg(Color::DarkGray),
        )))],
        HistoryState::Failed => vec![ListItem::new(Line::from(Span::styled(
            "Could not load messages. Re-open the chat to retry.",
            Style::default().fg(Color::Red),
        )))],
        HistoryState::Ready if session.messages().is_empty() => {
            vec![ListItem::new(Line::from(Span::styled(
                "No messages yet.",
                Style::default().fg(Color::DarkGray),
            )))]
        },
        HistoryState::Ready => session
            .messages()
            .iter()
            .map(|msg| {
                let own = own_role == Some(msg.sender);
                let sender_style = if own {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                };
                let sender = if own { "you".to_string() } else { msg.sender.to_string() };

                let mut spans = vec![
                    Span::styled(
                        format!("{} ", msg.sent_at.format("%H:%M")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(format!("<{sender}>"), sender_style),
                    Span::raw(" "),
                    Span::raw(msg.body.clone()),
                ];
                if msg.pending {
                    spans.push(Span::styled(
                        PENDING_MARKER,
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect(),
    };

    if app.active_room().is_some_and(|room| room.status != RoomStatus::Pending) {
        items.push(ListItem::new(Line::from(Span::styled(
            "This chat is closed. New messages are disabled.",
            Style::default().fg(Color::Yellow),
        ))));
    }

    // Keep the tail visible
    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
