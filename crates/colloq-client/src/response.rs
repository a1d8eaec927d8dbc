//! Envelope decoding.
//!
//! Turns `{ success, ... }` envelopes into `Result`s. A `success: false`
//! envelope becomes [`ClientError::Rejected`] carrying the server's message
//! when present, else the endpoint's generic fallback.

use colloq_proto::{
    ChatRoom, Message,
    envelope::{ChatListResponse, MessageHistoryResponse, SendAck},
};

use crate::ClientError;

/// Fallback reason for a rejected room-list fetch.
pub const FETCH_ROOMS_FAILED: &str = "Failed to fetch chatrooms";

/// Fallback reason for a rejected history fetch.
pub const FETCH_MESSAGES_FAILED: &str = "Failed to fetch messages";

/// Fallback reason for a rejected send.
pub const SEND_MESSAGE_FAILED: &str = "Failed to send message";

/// Extract the room list from a chat-list envelope.
pub fn into_rooms(resp: ChatListResponse) -> Result<Vec<ChatRoom>, ClientError> {
    if resp.success {
        Ok(resp.chats)
    } else {
        Err(ClientError::rejected(resp.message, FETCH_ROOMS_FAILED))
    }
}

/// Extract the message history from a history envelope.
pub fn into_messages(resp: MessageHistoryResponse) -> Result<Vec<Message>, ClientError> {
    if resp.success {
        Ok(resp.messages)
    } else {
        Err(ClientError::rejected(resp.message, FETCH_MESSAGES_FAILED))
    }
}

/// Check a send acknowledgment.
pub fn check_ack(ack: SendAck) -> Result<(), ClientError> {
    if ack.success { Ok(()) } else { Err(ClientError::rejected(ack.message, SEND_MESSAGE_FAILED)) }
}
