//! Integration tests for the chat session flow.
//!
//! Each test drives the App through the same event sequences the runtime
//! would produce, echoing the tags carried by the issued actions back in
//! the completions, and ends with oracle checks on the observable state.

use chrono::DateTime;
use colloq_app::{App, AppAction, AppEvent, AuthContext, HistoryState, KeyInput, Route};
use colloq_proto::{ChatRoom, Role, RoomStatus};

fn room(id: &str, status: RoomStatus) -> ChatRoom {
    ChatRoom {
        id: id.to_string(),
        paper_id: format!("P-{id}"),
        user_id: "u1".to_string(),
        reviewer_id: "rev1".to_string(),
        status,
        paper_title: Some(format!("Paper {id}")),
        reviewer_name: Some("Dr. Chen".to_string()),
        last_message: None,
        created_at: DateTime::UNIX_EPOCH,
        updated_at: DateTime::UNIX_EPOCH,
    }
}

/// App with a started directory fetch and the given rooms loaded.
fn app_with_rooms(rooms: Vec<ChatRoom>) -> App {
    let mut app = App::new(AuthContext { role: Some(Role::User) });
    let actions = app.start();
    let generation = match actions.first() {
        Some(AppAction::FetchRooms { generation, .. }) => *generation,
        other => panic!("expected FetchRooms, got {other:?}"),
    };
    let _ = app.handle(AppEvent::RoomsLoaded { generation, rooms });
    app
}

/// Extract the single history fetch from a batch of actions.
fn history_fetch(actions: &[AppAction]) -> (String, u64) {
    for action in actions {
        if let AppAction::FetchHistory { room_id, generation } = action {
            return (room_id.clone(), *generation);
        }
    }
    panic!("no FetchHistory in {actions:?}");
}

/// Extract the single posted message from a batch of actions.
fn posted(actions: &[AppAction]) -> (String, u64, String) {
    for action in actions {
        if let AppAction::PostMessage { room_id, local_id, request, .. } = action {
            return (room_id.clone(), *local_id, request.message.clone());
        }
    }
    panic!("no PostMessage in {actions:?}");
}

/// Open a room and complete its history fetch with `history`.
fn open_with_history(app: &mut App, room_id: &str, history: Vec<colloq_proto::Message>) {
    let actions = app.open_room(room_id);
    let (fetched_room, generation) = history_fetch(&actions);
    assert_eq!(fetched_room, room_id);
    let _ = app.handle(AppEvent::HistoryLoaded {
        room_id: fetched_room,
        generation,
        messages: history,
    });
}

/// Type `text` into the composer and press Enter.
fn send(app: &mut App, text: &str) -> Vec<AppAction> {
    for c in text.chars() {
        let _ = app.handle_key(KeyInput::Char(c), DateTime::UNIX_EPOCH);
    }
    app.handle_key(KeyInput::Enter, DateTime::UNIX_EPOCH)
}

#[test]
fn role_with_no_rooms_gets_empty_ready_state() {
    let app = app_with_rooms(vec![]);

    assert!(app.directory().rooms().is_empty());
    assert!(app.directory().error().is_none());
    assert!(!app.directory().is_loading());
}

#[test]
fn directory_failure_surfaces_error_and_retry_refetches() {
    let mut app = App::new(AuthContext { role: Some(Role::User) });
    let _ = app.start();
    let _ = app.handle(AppEvent::RoomsFailed { generation: 1, message: "gateway timeout".into() });
    assert_eq!(app.directory().error(), Some("gateway timeout"));

    // 'r' on the directory is the manual retry
    let actions = app.handle_key(KeyInput::Char('r'), DateTime::UNIX_EPOCH);
    assert!(matches!(actions.as_slice(), [AppAction::FetchRooms { generation: 2, .. }, _]));
    assert!(app.directory().is_loading());
}

#[test]
fn reject_reverts_optimistic_message_and_sets_error() {
    // r1 pending, empty history, "Hello" appended then rejected
    let mut app = app_with_rooms(vec![room("r1", RoomStatus::Pending)]);
    open_with_history(&mut app, "r1", vec![]);
    assert!(app.session().is_some_and(|s| s.messages().is_empty()));

    let actions = send(&mut app, "Hello");
    let (room_id, local_id, body) = posted(&actions);
    assert_eq!(body, "Hello");

    let session = app.session().unwrap();
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].sender, Role::User);
    assert!(session.messages()[0].pending);
    assert!(app.composer().is_empty());

    let _ = app.handle(AppEvent::SendFailed {
        room_id,
        local_id,
        message: "Failed to send message".into(),
    });

    let session = app.session().unwrap();
    assert!(session.messages().is_empty());
    assert_eq!(session.error(), Some("Failed to send message"));
}

#[test]
fn acked_send_leaves_thread_ending_in_the_message() {
    let mut app = app_with_rooms(vec![room("r1", RoomStatus::Pending)]);
    open_with_history(&mut app, "r1", vec![]);

    let actions = send(&mut app, "  Hello  ");
    let (room_id, local_id, body) = posted(&actions);
    // Body is trimmed before it goes on the wire
    assert_eq!(body, "Hello");

    let _ = app.handle(AppEvent::SendAcked { room_id, local_id });

    let session = app.session().unwrap();
    let last = session.messages().last().unwrap();
    assert_eq!(last.body, "Hello");
    assert_eq!(last.sender, Role::User);
    assert!(!last.pending);
}

#[test]
fn failure_of_first_send_spares_the_second() {
    let mut app = app_with_rooms(vec![room("r1", RoomStatus::Pending)]);
    open_with_history(&mut app, "r1", vec![]);

    let first = send(&mut app, "first");
    let second = send(&mut app, "second");
    let (room_id, first_id, _) = posted(&first);
    let (_, second_id, _) = posted(&second);
    assert_ne!(first_id, second_id);

    let _ = app.handle(AppEvent::SendFailed {
        room_id,
        local_id: first_id,
        message: "nope".into(),
    });

    let session = app.session().unwrap();
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].body, "second");
    assert!(session.messages()[0].pending);
}

#[test]
fn room_switch_suppresses_late_history_of_the_old_room() {
    let mut app = app_with_rooms(vec![
        room("r1", RoomStatus::Pending),
        room("r2", RoomStatus::Pending),
    ]);

    // Enter r1; its history fetch stays in flight
    let actions = app.open_room("r1");
    let (old_room, old_generation) = history_fetch(&actions);

    // Switch to r2: previous thread is gone before any new data shows
    let _ = app.handle_key(KeyInput::Esc, DateTime::UNIX_EPOCH);
    let actions = app.open_room("r2");
    let (new_room, new_generation) = history_fetch(&actions);
    assert!(app.session().is_some_and(|s| s.messages().is_empty()));

    // r1's fetch finally resolves; it must not leak into r2's thread
    let leaked = app.handle(AppEvent::HistoryLoaded {
        room_id: old_room,
        generation: old_generation,
        messages: vec![colloq_proto::Message {
            id: Some("m1".into()),
            message: "from r1".into(),
            sender_type: Role::Reviewer,
            created_at: DateTime::UNIX_EPOCH,
        }],
    });
    assert!(leaked.is_empty());
    assert!(app.session().is_some_and(|s| s.messages().is_empty()));

    let _ = app.handle(AppEvent::HistoryLoaded {
        room_id: new_room,
        generation: new_generation,
        messages: vec![],
    });
    assert!(app.session().is_some_and(|s| s.history() == HistoryState::Ready));
}

#[test]
fn completed_room_send_is_a_no_op() {
    let mut app = app_with_rooms(vec![room("r1", RoomStatus::Completed)]);
    open_with_history(&mut app, "r1", vec![]);
    assert!(!app.can_send());

    let actions = send(&mut app, "anything");
    assert!(!actions.iter().any(|a| matches!(a, AppAction::PostMessage { .. })));
    assert!(app.session().is_some_and(|s| s.messages().is_empty()));
}

#[test]
fn failed_send_restores_text_only_into_an_empty_composer() {
    let mut app = app_with_rooms(vec![room("r1", RoomStatus::Pending)]);
    open_with_history(&mut app, "r1", vec![]);

    // Case 1: composer untouched since the send, text comes back
    let actions = send(&mut app, "lost?");
    let (room_id, local_id, _) = posted(&actions);
    let _ = app.handle(AppEvent::SendFailed {
        room_id: room_id.clone(),
        local_id,
        message: "nope".into(),
    });
    assert_eq!(app.composer().buffer(), "lost?");

    // Case 2: a newer draft is not clobbered by a late failure
    let _ = app.handle_key(KeyInput::Esc, DateTime::UNIX_EPOCH); // dismiss error
    for _ in 0.."lost?".len() {
        let _ = app.handle_key(KeyInput::Backspace, DateTime::UNIX_EPOCH);
    }
    let actions = send(&mut app, "again");
    let (_, local_id, _) = posted(&actions);
    for c in "newer draft".chars() {
        let _ = app.handle_key(KeyInput::Char(c), DateTime::UNIX_EPOCH);
    }
    let _ = app.handle(AppEvent::SendFailed { room_id, local_id, message: "nope".into() });
    assert_eq!(app.composer().buffer(), "newer draft");
}

#[test]
fn redirect_from_unknown_room_happens_exactly_once() {
    let mut app = app_with_rooms(vec![room("r1", RoomStatus::Pending)]);

    let _ = app.open_room("ghost");
    assert_eq!(app.route(), &Route::Directory);
    assert_eq!(app.status_message(), Some("Chat room not found"));

    // A later directory completion must not re-trigger the redirect logic
    let stale = app.handle(AppEvent::RoomsLoaded { generation: 99, rooms: vec![] });
    assert!(stale.is_empty());
    assert_eq!(app.route(), &Route::Directory);
}
