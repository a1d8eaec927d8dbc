//! Application input events.
//!
//! This module defines [`AppEvent`], the inputs that drive the [`crate::App`]
//! state machine.
//!
//! Events originate from two sources:
//! - Terminal interactions (resize) and periodic ticks.
//! - Completions of API calls the App previously requested via
//!   [`crate::AppAction`].
//!
//! Every completion echoes the generation tag (and room id, for
//! session-scoped calls) it was issued with. The App applies a completion
//! only if the tag still matches live state; anything else is a stale
//! response from a superseded role or room selection and is dropped.

use colloq_proto::{ChatRoom, Message, Role};

use crate::LocalId;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The authenticated role changed (sign-in, sign-out, role switch).
    RoleChanged {
        /// New role, `None` when signed out.
        role: Option<Role>,
    },

    /// Chat-room list fetch succeeded.
    RoomsLoaded {
        /// Generation the fetch was issued under.
        generation: u64,
        /// Rooms visible to the role, in server order.
        rooms: Vec<ChatRoom>,
    },

    /// Chat-room list fetch failed.
    RoomsFailed {
        /// Generation the fetch was issued under.
        generation: u64,
        /// Human-readable failure description.
        message: String,
    },

    /// Message-history fetch succeeded.
    HistoryLoaded {
        /// Room the history belongs to.
        room_id: String,
        /// Generation of the session that issued the fetch.
        generation: u64,
        /// History in server order.
        messages: Vec<Message>,
    },

    /// Message-history fetch failed.
    HistoryFailed {
        /// Room the fetch was for.
        room_id: String,
        /// Generation of the session that issued the fetch.
        generation: u64,
        /// Human-readable failure description.
        message: String,
    },

    /// Server acknowledged a sent message.
    SendAcked {
        /// Room the message was sent to.
        room_id: String,
        /// Correlation id of the optimistic entry.
        local_id: LocalId,
    },

    /// A send was rejected or failed in transit.
    SendFailed {
        /// Room the message was sent to.
        room_id: String,
        /// Correlation id of the optimistic entry to revert.
        local_id: LocalId,
        /// Human-readable failure description.
        message: String,
    },
}
