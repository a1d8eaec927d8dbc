//! Endpoint path construction.
//!
//! Paths are relative to the configured base URL. The role segment appears
//! in the list and send endpoints; history is role-agnostic.

use colloq_proto::Role;

/// Path for the chat-room list visible to `role`.
pub fn chat_list(role: Role) -> String {
    format!("/api/events/papers/{role}/chats")
}

/// Path for the message history of `room_id`.
pub fn message_history(room_id: &str) -> String {
    format!("/api/events/paper/chats/messages/{room_id}")
}

/// Path for posting a message to `room_id` as `role`.
pub fn send_message(role: Role, room_id: &str) -> String {
    format!("/api/events/paper/{role}/chats/messages/{room_id}")
}
