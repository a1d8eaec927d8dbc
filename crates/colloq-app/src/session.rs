//! Active chat session.
//!
//! The [`Session`] is the message store for the currently selected room. It
//! exclusively owns the ordered message sequence; nothing else mutates it.
//! A session is created when a room resolves and destroyed when the
//! selection changes, so the thread of one room can never bleed into
//! another.
//!
//! Ordering invariant: entries are kept in append order — history as
//! returned by the server, followed by locally appended optimistic entries.
//! The client never re-sorts by timestamp.

use chrono::{DateTime, Utc};
use colloq_proto::{Message, Role};

/// Correlation id assigned to each optimistic send at append time.
///
/// Acks and failures revert or confirm by this id, never by position, so a
/// failure of an early send cannot touch a later in-flight one.
pub type LocalId = u64;

/// History load state for the active room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// History fetch in flight; the thread shows nothing stale meanwhile.
    Loading,
    /// History applied (empty allowed).
    Ready,
    /// History fetch failed; terminal for this attempt. Re-entering the
    /// room is the retry path.
    Failed,
}

/// One entry in the active room's thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMessage {
    /// Server-assigned id. Present only on entries that arrived via history;
    /// optimistic entries keep their local identity even after the ack.
    pub server_id: Option<String>,

    /// Correlation id for locally appended entries. `None` for history.
    pub local_id: Option<LocalId>,

    /// Text body.
    pub body: String,

    /// Sender role.
    pub sender: Role,

    /// Creation timestamp.
    pub sent_at: DateTime<Utc>,

    /// True between optimistic append and server acknowledgment.
    pub pending: bool,
}

impl ThreadMessage {
    /// Entry from fetched history.
    pub fn from_history(msg: Message) -> Self {
        Self {
            server_id: msg.id,
            local_id: None,
            body: msg.message,
            sender: msg.sender_type,
            sent_at: msg.created_at,
            pending: false,
        }
    }

    /// Locally synthesized entry awaiting server confirmation.
    pub fn optimistic(local_id: LocalId, body: String, sender: Role, now: DateTime<Utc>) -> Self {
        Self {
            server_id: None,
            local_id: Some(local_id),
            body,
            sender,
            sent_at: now,
            pending: true,
        }
    }
}

/// Message store for the active room.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    room_id: String,
    generation: u64,
    history: HistoryState,
    messages: Vec<ThreadMessage>,
    error: Option<String>,
}

impl Session {
    /// Create a session for `room_id` with an empty thread and a history
    /// fetch pending under `generation`.
    pub fn new(room_id: String, generation: u64) -> Self {
        Self {
            room_id,
            generation,
            history: HistoryState::Loading,
            messages: Vec::new(),
            error: None,
        }
    }

    /// Room this session displays.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Generation tag of this session's history fetch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// History load state.
    pub fn history(&self) -> HistoryState {
        self.history
    }

    /// Thread in append order.
    pub fn messages(&self) -> &[ThreadMessage] {
        &self.messages
    }

    /// Error slot (history or send failure).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the error slot (manual dismiss).
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Apply fetched history.
    ///
    /// Optimistic entries appended while the fetch was in flight survive at
    /// the tail; history takes the head.
    pub fn apply_history(&mut self, history: Vec<Message>) {
        let in_flight: Vec<ThreadMessage> =
            self.messages.drain(..).filter(|m| m.local_id.is_some()).collect();

        self.messages = history.into_iter().map(ThreadMessage::from_history).collect();
        self.messages.extend(in_flight);
        self.history = HistoryState::Ready;
    }

    /// Record a history fetch failure. The thread stays empty.
    pub fn fail_history(&mut self, message: String) {
        self.history = HistoryState::Failed;
        self.error = Some(message);
    }

    /// Append an optimistic entry.
    pub fn push_optimistic(&mut self, entry: ThreadMessage) {
        self.messages.push(entry);
    }

    /// Mark the entry with `local_id` as delivered. Returns false if no
    /// such entry exists (already reverted, or from a previous session).
    pub fn mark_delivered(&mut self, local_id: LocalId) -> bool {
        match self.messages.iter_mut().find(|m| m.local_id == Some(local_id)) {
            Some(entry) => {
                entry.pending = false;
                true
            },
            None => false,
        }
    }

    /// Remove exactly the optimistic entry with `local_id` and record the
    /// failure. Returns the removed entry so the caller can restore its
    /// body to the composer.
    pub fn revert(&mut self, local_id: LocalId, message: String) -> Option<ThreadMessage> {
        let index = self.messages.iter().position(|m| m.local_id == Some(local_id))?;
        let entry = self.messages.remove(index);
        self.error = Some(message);
        Some(entry)
    }
}
