//! Status bar
//!
//! Displays the signed-in role, the current view, and any error or notice.

use colloq_app::{App, Route};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let role = app.auth().role.map_or_else(
        || Span::styled("signed out", Style::default().fg(Color::Red)),
        |role| {
            Span::styled(
                role.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        },
    );

    let view = match app.route() {
        Route::Directory => " | Chats".to_string(),
        Route::Thread { room_id } => format!(" | Chat {room_id}"),
    };

    // One error slot: session error, then directory error, then the notice
    let alert = app
        .session()
        .and_then(|session| session.error())
        .or_else(|| app.directory().error())
        .or_else(|| app.status_message());

    let mut spans = vec![
        Span::raw(" "),
        role,
        Span::styled(view, Style::default().fg(Color::DarkGray)),
    ];
    if let Some(alert) = alert {
        spans.push(Span::styled(
            format!(" | {alert}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
