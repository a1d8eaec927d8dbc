//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. API calls go over HTTP via
//! [`ApiClient`], each one spawned as a tokio task whose completion is
//! funneled back through a channel and drained by the runtime.

use std::io::{self, Stdout, stdout};

use chrono::Utc;
use colloq_app::{App, AppAction, AppEvent, Driver, KeyInput};
use colloq_client::{ApiClient, ClientError};
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// API client error.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the HTTP
/// API (reqwest via [`ApiClient`]). Submitted calls run on detached tokio
/// tasks; their outcomes arrive as tagged [`AppEvent`]s on an unbounded
/// channel and surface through [`Driver::poll_outcome`].
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    api: ApiClient,
    outcome_tx: mpsc::UnboundedSender<AppEvent>,
    outcome_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl TerminalDriver {
    /// Create a new terminal driver against an API client.
    pub fn new(api: ApiClient) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self { terminal, event_stream, api, outcome_tx, outcome_rx })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        match Self::convert_key(key_event.code) {
                            Some(key_input) => Ok(app.handle_key(key_input, Utc::now())),
                            None => Ok(vec![]),
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(app.handle(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(vec![]),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => {
                Ok(app.handle(AppEvent::Tick))
            }
        }
    }

    fn submit(&mut self, action: AppAction) -> Result<(), Self::Error> {
        let api = self.api.clone();
        let tx = self.outcome_tx.clone();

        match action {
            AppAction::FetchRooms { role, generation } => {
                tokio::spawn(async move {
                    let outcome = match api.fetch_rooms(role).await {
                        Ok(rooms) => AppEvent::RoomsLoaded { generation, rooms },
                        Err(e) => AppEvent::RoomsFailed { generation, message: e.to_string() },
                    };
                    let _ = tx.send(outcome);
                });
            },
            AppAction::FetchHistory { room_id, generation } => {
                tokio::spawn(async move {
                    let outcome = match api.fetch_history(&room_id).await {
                        Ok(messages) => AppEvent::HistoryLoaded { room_id, generation, messages },
                        Err(e) => AppEvent::HistoryFailed {
                            room_id,
                            generation,
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(outcome);
                });
            },
            AppAction::PostMessage { role, room_id, local_id, request } => {
                tokio::spawn(async move {
                    let outcome = match api.post_message(role, &room_id, &request).await {
                        Ok(()) => AppEvent::SendAcked { room_id, local_id },
                        Err(e) => {
                            AppEvent::SendFailed { room_id, local_id, message: e.to_string() }
                        },
                    };
                    let _ = tx.send(outcome);
                });
            },
            // The runtime never submits these
            AppAction::Render | AppAction::Quit => {},
        }
        Ok(())
    }

    async fn poll_outcome(&mut self) -> Option<AppEvent> {
        self.outcome_rx.try_recv().ok()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.outcome_rx.close();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
