//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, instructions produced by the
//! [`crate::App`] state machine for the runtime to execute. API calls carry
//! the tags their completions must echo back as [`crate::AppEvent`] fields.

use colloq_proto::{Role, envelope::SendMessageRequest};

use crate::LocalId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Fetch the chat-room list for `role`.
    FetchRooms {
        /// Role whose rooms to list.
        role: Role,
        /// Directory generation to echo in the completion.
        generation: u64,
    },

    /// Fetch the message history of a room.
    FetchHistory {
        /// Room to load.
        room_id: String,
        /// Session generation to echo in the completion.
        generation: u64,
    },

    /// Post a message to a room.
    PostMessage {
        /// Sending role (appears in the endpoint path).
        role: Role,
        /// Target room.
        room_id: String,
        /// Correlation id of the optimistic thread entry.
        local_id: LocalId,
        /// Wire request body.
        request: SendMessageRequest,
    },
}
