//! Request and response envelopes.
//!
//! Every chat endpoint wraps its payload in `{ success: boolean, ... }`.
//! Failure envelopes may carry an optional `message` with a server-provided
//! reason; callers fall back to a generic description when it is absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChatRoom, Message, Role};

/// Response to `GET /api/events/papers/{role}/chats`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatListResponse {
    /// Server-reported outcome.
    pub success: bool,

    /// Rooms visible to the requesting role. Absent on failure.
    #[serde(default)]
    pub chats: Vec<ChatRoom>,

    /// Optional server-provided reason on failure.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to `GET /api/events/paper/chats/messages/{roomId}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageHistoryResponse {
    /// Server-reported outcome.
    pub success: bool,

    /// Message history in server order. Absent on failure.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Optional server-provided reason on failure.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/events/paper/{role}/chats/messages/{roomId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Reviewer participant of the room.
    #[serde(rename = "reviewerId")]
    pub reviewer_id: String,

    /// Trimmed message body.
    pub message: String,

    /// Sending role.
    pub sender: Role,

    /// Client timestamp at send time.
    pub timestamp: DateTime<Utc>,
}

/// Bare acknowledgment envelope for the send endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendAck {
    /// Server-reported outcome.
    pub success: bool,

    /// Optional server-provided reason on failure.
    #[serde(default)]
    pub message: Option<String>,
}
