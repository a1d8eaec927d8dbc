//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the chat
//! feature's interactive state completely decoupled from I/O: the chat-room
//! directory, the active session, the composer, and routing between the
//! directory view and a room thread.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! keyboard input, and produces [`crate::AppAction`] instructions for the
//! runtime to execute.
//!
//! # Stale-response suppression
//!
//! Directory fetches are tagged with a monotonic generation, as is each
//! session's history fetch; sends are tagged with per-message local ids.
//! A completion is applied only if its tag still matches live state, so a
//! response that outlived its role, room selection, or session can never
//! corrupt newer state.

use chrono::{DateTime, Utc};
use colloq_proto::{ChatRoom, RoomStatus, envelope::SendMessageRequest};

use crate::{
    AppAction, AppEvent, Composer, Directory, KeyInput, Resolution, Session, ThreadMessage,
    session::LocalId,
};

/// Authentication context, passed in explicitly rather than read from a
/// shared provider. The chat feature only consumes the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthContext {
    /// Authenticated role, `None` when signed out.
    pub role: Option<colloq_proto::Role>,
}

/// Current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Chat-room directory (the role-scoped root).
    Directory,
    /// Thread view for one room.
    Thread {
        /// Room the route points at. The session may lag behind this while
        /// the directory is still loading.
        room_id: String,
    },
}

/// Status notice shown after redirecting away from an unknown room.
const ROOM_NOT_FOUND: &str = "Chat room not found";

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal or network.
#[derive(Debug, Clone)]
pub struct App {
    /// Authentication context.
    auth: AuthContext,
    /// Chat-room directory for the current role.
    directory: Directory,
    /// Generation of the latest directory fetch.
    directory_generation: u64,
    /// Selected row in the directory view.
    directory_cursor: usize,
    /// Current view.
    route: Route,
    /// Active session. `None` on the directory, or while a thread route
    /// waits for the directory to load.
    session: Option<Session>,
    /// Generation source for session history fetches.
    history_generation: u64,
    /// Correlation id source for optimistic sends.
    next_local_id: LocalId,
    /// Message composer for the thread view.
    composer: Composer,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status notice. `None` if no notice.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the given auth context.
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            directory: Directory::NotLoaded,
            directory_generation: 0,
            directory_cursor: 0,
            route: Route::Directory,
            session: None,
            history_generation: 0,
            next_local_id: 0,
            composer: Composer::new(),
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Issue the initial directory fetch.
    ///
    /// With no role present the directory short-circuits to an empty ready
    /// state: non-loading, non-error, and no request issued.
    pub fn start(&mut self) -> Vec<AppAction> {
        // Always advance the generation, fetch or not: signing out must
        // invalidate a fetch still in flight for the prior role.
        self.directory_generation += 1;
        match self.auth.role {
            Some(role) => {
                self.directory = Directory::Loading;
                vec![
                    AppAction::FetchRooms { role, generation: self.directory_generation },
                    AppAction::Render,
                ]
            },
            None => {
                self.directory = Directory::Ready(Vec::new());
                vec![AppAction::Render]
            },
        }
    }

    /// Process an event and return actions for the runtime.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::RoleChanged { role } => {
                self.auth = AuthContext { role };
                self.route = Route::Directory;
                self.session = None;
                self.composer.clear();
                self.directory_cursor = 0;
                self.status_message = None;
                self.start()
            },
            AppEvent::RoomsLoaded { generation, rooms } => {
                if generation != self.directory_generation {
                    tracing::debug!(generation, "dropping stale directory response");
                    return vec![];
                }
                self.directory_cursor = self.directory_cursor.min(rooms.len().saturating_sub(1));
                self.directory = Directory::Ready(rooms);
                self.resolve_route()
            },
            AppEvent::RoomsFailed { generation, message } => {
                if generation != self.directory_generation {
                    tracing::debug!(generation, "dropping stale directory failure");
                    return vec![];
                }
                self.directory = Directory::Failed { message };
                self.resolve_route()
            },
            AppEvent::HistoryLoaded { room_id, generation, messages } => {
                match self.session.as_mut() {
                    Some(s) if s.generation() == generation && s.room_id() == room_id => {
                        s.apply_history(messages);
                        vec![AppAction::Render]
                    },
                    _ => {
                        tracing::debug!(%room_id, generation, "dropping stale history response");
                        vec![]
                    },
                }
            },
            AppEvent::HistoryFailed { room_id, generation, message } => {
                match self.session.as_mut() {
                    Some(s) if s.generation() == generation && s.room_id() == room_id => {
                        s.fail_history(message);
                        vec![AppAction::Render]
                    },
                    _ => {
                        tracing::debug!(%room_id, generation, "dropping stale history failure");
                        vec![]
                    },
                }
            },
            AppEvent::SendAcked { room_id, local_id } => match self.session.as_mut() {
                Some(s) if s.room_id() == room_id => {
                    if s.mark_delivered(local_id) {
                        vec![AppAction::Render]
                    } else {
                        tracing::debug!(%room_id, local_id, "dropping ack for unknown local id");
                        vec![]
                    }
                },
                _ => {
                    tracing::debug!(%room_id, local_id, "dropping ack for inactive session");
                    vec![]
                },
            },
            AppEvent::SendFailed { room_id, local_id, message } => {
                let Some(session) = self.session.as_mut() else {
                    tracing::debug!(%room_id, local_id, "dropping send failure, no session");
                    return vec![];
                };
                if session.room_id() != room_id {
                    tracing::debug!(%room_id, local_id, "dropping send failure for other room");
                    return vec![];
                }
                match session.revert(local_id, message) {
                    Some(entry) => {
                        // Restore the failed text only into an empty
                        // composer; a draft typed after the send wins.
                        if self.composer.is_empty() {
                            self.composer.set(entry.body);
                        }
                        vec![AppAction::Render]
                    },
                    None => {
                        tracing::debug!(local_id, "send failure for unknown local id");
                        vec![]
                    },
                }
            },
        }
    }

    /// Handle a key input event. `now` is the caller's clock reading, used
    /// to timestamp outgoing messages.
    pub fn handle_key(&mut self, key: KeyInput, now: DateTime<Utc>) -> Vec<AppAction> {
        match self.route {
            Route::Directory => self.handle_directory_key(key),
            Route::Thread { .. } => self.handle_thread_key(key, now),
        }
    }

    /// Navigate to a room by id.
    ///
    /// If the directory has not loaded yet, the route is held and resolved
    /// when it does; redirecting back to the directory happens only once
    /// the directory is settled and the room is absent.
    pub fn open_room(&mut self, room_id: &str) -> Vec<AppAction> {
        self.route = Route::Thread { room_id: room_id.to_string() };
        self.session = None;
        self.composer.clear();
        self.status_message = None;
        self.resolve_route()
    }

    fn handle_directory_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Up => {
                self.directory_cursor = self.directory_cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Down => {
                let last = self.directory.rooms().len().saturating_sub(1);
                self.directory_cursor = (self.directory_cursor + 1).min(last);
                vec![AppAction::Render]
            },
            KeyInput::Enter => {
                match self.directory.rooms().get(self.directory_cursor).map(|r| r.id.clone()) {
                    Some(room_id) => self.open_room(&room_id),
                    None => vec![],
                }
            },
            // Manual retry after a failed directory load (also a refresh)
            KeyInput::Char('r') => self.start(),
            KeyInput::Esc => vec![AppAction::Quit],
            _ => vec![],
        }
    }

    fn handle_thread_key(&mut self, key: KeyInput, now: DateTime<Utc>) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => {
                // First Esc dismisses a visible error, the next one leaves
                if self.session.as_ref().is_some_and(|s| s.error().is_some()) {
                    if let Some(s) = self.session.as_mut() {
                        s.dismiss_error();
                    }
                    return vec![AppAction::Render];
                }
                self.route = Route::Directory;
                self.session = None;
                self.composer.clear();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.send_message(now),
            KeyInput::Char(c) => {
                if self.can_send() {
                    self.composer.insert(c);
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            KeyInput::Backspace => {
                self.composer.backspace();
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                self.composer.delete();
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.composer.left();
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                self.composer.right();
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.composer.home();
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.composer.end();
                vec![AppAction::Render]
            },
            KeyInput::Up | KeyInput::Down => vec![],
        }
    }

    /// Send the composer contents to the active room.
    ///
    /// A no-op unless the room status is `pending` and the trimmed text is
    /// non-empty. The optimistic entry is appended and the composer cleared
    /// before the request is issued; sends are not serialized.
    pub fn send_message(&mut self, now: DateTime<Utc>) -> Vec<AppAction> {
        let Some(role) = self.auth.role else {
            return vec![];
        };
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };
        let Resolution::Found(room) = self.directory.resolve(session.room_id()) else {
            return vec![];
        };
        if room.status != RoomStatus::Pending {
            return vec![];
        }

        let text = self.composer.buffer().trim();
        if text.is_empty() {
            return vec![];
        }
        let body = text.to_string();
        let reviewer_id = room.reviewer_id.clone();
        let room_id = session.room_id().to_string();

        self.next_local_id += 1;
        let local_id = self.next_local_id;
        session.push_optimistic(ThreadMessage::optimistic(local_id, body.clone(), role, now));
        self.composer.clear();

        let request =
            SendMessageRequest { reviewer_id, message: body, sender: role, timestamp: now };
        vec![AppAction::PostMessage { role, room_id, local_id, request }, AppAction::Render]
    }

    /// Re-resolve a thread route against the directory.
    fn resolve_route(&mut self) -> Vec<AppAction> {
        let Route::Thread { room_id } = &self.route else {
            return vec![AppAction::Render];
        };
        if self.session.is_some() {
            return vec![AppAction::Render];
        }
        let room_id = room_id.clone();

        match self.directory.resolve(&room_id) {
            Resolution::Found(_) => {
                self.history_generation += 1;
                let generation = self.history_generation;
                self.session = Some(Session::new(room_id.clone(), generation));
                vec![AppAction::FetchHistory { room_id, generation }, AppAction::Render]
            },
            Resolution::Pending => vec![AppAction::Render],
            Resolution::Missing => {
                tracing::debug!(%room_id, "room absent from settled directory, redirecting");
                self.route = Route::Directory;
                self.status_message = Some(ROOM_NOT_FOUND.to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// True when the active room accepts messages (status `pending`).
    pub fn can_send(&self) -> bool {
        self.active_room().is_some_and(|room| room.status == RoomStatus::Pending)
    }

    /// Directory entry of the active session's room, when resolvable.
    pub fn active_room(&self) -> Option<&ChatRoom> {
        let session = self.session.as_ref()?;
        match self.directory.resolve(session.room_id()) {
            Resolution::Found(room) => Some(room),
            _ => None,
        }
    }

    /// Authentication context.
    pub fn auth(&self) -> AuthContext {
        self.auth
    }

    /// Chat-room directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Selected row in the directory view.
    pub fn directory_cursor(&self) -> usize {
        self.directory_cursor
    }

    /// Current view.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Active session, if a room is resolved.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Message composer.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status notice. `None` if no notice.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use colloq_proto::{Role, RoomStatus};

    use super::*;

    fn room(id: &str, status: RoomStatus) -> ChatRoom {
        ChatRoom {
            id: id.to_string(),
            paper_id: format!("P-{id}"),
            user_id: "u1".to_string(),
            reviewer_id: "rev1".to_string(),
            status,
            paper_title: None,
            reviewer_name: None,
            last_message: None,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    fn user_app() -> App {
        App::new(AuthContext { role: Some(Role::User) })
    }

    #[test]
    fn start_without_role_issues_no_fetch() {
        let mut app = App::new(AuthContext { role: None });
        let actions = app.start();

        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.directory(), &Directory::Ready(Vec::new()));
    }

    #[test]
    fn start_with_role_fetches_rooms() {
        let mut app = user_app();
        let actions = app.start();

        assert!(matches!(
            actions.as_slice(),
            [AppAction::FetchRooms { role: Role::User, generation: 1 }, AppAction::Render]
        ));
        assert!(app.directory().is_loading());
    }

    #[test]
    fn role_change_invalidates_prior_directory_fetch() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.handle(AppEvent::RoleChanged { role: Some(Role::Reviewer) });

        // Completion of the generation-1 fetch arrives late
        let actions = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("stale", RoomStatus::Pending)],
        });
        assert!(actions.is_empty());
        assert!(app.directory().is_loading());

        let _ = app.handle(AppEvent::RoomsLoaded {
            generation: 2,
            rooms: vec![room("fresh", RoomStatus::Pending)],
        });
        assert_eq!(app.directory().rooms()[0].id, "fresh");
    }

    #[test]
    fn sign_out_invalidates_prior_directory_fetch() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.handle(AppEvent::RoleChanged { role: None });

        // The signed-in fetch completes after sign-out; it must not
        // overwrite the signed-out empty directory
        let actions = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("stale", RoomStatus::Pending)],
        });
        assert!(actions.is_empty());
        assert_eq!(app.directory(), &Directory::Ready(Vec::new()));
    }

    #[test]
    fn enter_opens_selected_room() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("r1", RoomStatus::Pending), room("r2", RoomStatus::Pending)],
        });

        let _ = app.handle_key(KeyInput::Down, DateTime::UNIX_EPOCH);
        let actions = app.handle_key(KeyInput::Enter, DateTime::UNIX_EPOCH);

        assert!(matches!(
            actions.as_slice(),
            [AppAction::FetchHistory { room_id, generation: 1 }, AppAction::Render]
                if room_id == "r2"
        ));
        assert_eq!(app.route(), &Route::Thread { room_id: "r2".to_string() });
    }

    #[test]
    fn open_room_defers_until_directory_loads() {
        let mut app = user_app();
        let _ = app.start();

        // Navigation lands before the directory response
        let actions = app.open_room("r1");
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.session().is_none());
        assert_eq!(app.route(), &Route::Thread { room_id: "r1".to_string() });

        // Directory arrives and resolution completes
        let actions = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("r1", RoomStatus::Pending)],
        });
        assert!(matches!(actions.as_slice(), [AppAction::FetchHistory { .. }, AppAction::Render]));
        assert!(app.session().is_some());
    }

    #[test]
    fn unknown_room_redirects_once_directory_settles() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.open_room("ghost");
        assert_eq!(app.route(), &Route::Thread { room_id: "ghost".to_string() });

        let _ = app.handle(AppEvent::RoomsLoaded { generation: 1, rooms: vec![] });
        assert_eq!(app.route(), &Route::Directory);
        assert_eq!(app.status_message(), Some(ROOM_NOT_FOUND));
    }

    #[test]
    fn closed_room_rejects_input_and_send() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("r1", RoomStatus::Completed)],
        });
        let _ = app.open_room("r1");
        let _ = app.handle(AppEvent::HistoryLoaded {
            room_id: "r1".to_string(),
            generation: 1,
            messages: vec![],
        });

        assert!(!app.can_send());
        let _ = app.handle_key(KeyInput::Char('x'), DateTime::UNIX_EPOCH);
        assert!(app.composer().is_empty());

        let actions = app.send_message(DateTime::UNIX_EPOCH);
        assert!(actions.is_empty());
        assert!(app.session().is_some_and(|s| s.messages().is_empty()));
    }

    #[test]
    fn whitespace_only_send_is_a_no_op() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("r1", RoomStatus::Pending)],
        });
        let _ = app.open_room("r1");

        for c in "   ".chars() {
            let _ = app.handle_key(KeyInput::Char(c), DateTime::UNIX_EPOCH);
        }
        let actions = app.send_message(DateTime::UNIX_EPOCH);
        assert!(actions.is_empty());
    }

    #[test]
    fn esc_dismisses_error_before_leaving_thread() {
        let mut app = user_app();
        let _ = app.start();
        let _ = app.handle(AppEvent::RoomsLoaded {
            generation: 1,
            rooms: vec![room("r1", RoomStatus::Pending)],
        });
        let _ = app.open_room("r1");
        let _ = app.handle(AppEvent::HistoryFailed {
            room_id: "r1".to_string(),
            generation: 1,
            message: "boom".to_string(),
        });

        let _ = app.handle_key(KeyInput::Esc, DateTime::UNIX_EPOCH);
        assert_eq!(app.route(), &Route::Thread { room_id: "r1".to_string() });
        assert!(app.session().is_some_and(|s| s.error().is_none()));

        let _ = app.handle_key(KeyInput::Esc, DateTime::UNIX_EPOCH);
        assert_eq!(app.route(), &Route::Directory);
    }
}
