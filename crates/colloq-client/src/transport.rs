//! HTTP transport.
//!
//! [`ApiClient`] performs the actual requests over reqwest. Session
//! credentials are cookie-based and ambient: the client carries a cookie
//! store and never places a token in a request body.

use colloq_proto::{
    ChatRoom, Message, Role,
    envelope::{ChatListResponse, MessageHistoryResponse, SendAck, SendMessageRequest},
};

use crate::{ClientError, endpoint, response};

/// HTTP client for the chat API.
///
/// Cheap to clone; clones share the underlying connection pool and cookie
/// store, which makes it suitable for per-request task spawning.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url` (scheme and authority, no
    /// trailing slash required).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the chat rooms visible to `role`.
    pub async fn fetch_rooms(&self, role: Role) -> Result<Vec<ChatRoom>, ClientError> {
        let url = self.url(&endpoint::chat_list(role));
        tracing::debug!(%role, %url, "fetching chat rooms");

        let resp: ChatListResponse = self.http.get(url).send().await?.json().await?;
        response::into_rooms(resp)
    }

    /// Fetch the message history of `room_id`.
    pub async fn fetch_history(&self, room_id: &str) -> Result<Vec<Message>, ClientError> {
        let url = self.url(&endpoint::message_history(room_id));
        tracing::debug!(room_id, %url, "fetching message history");

        let resp: MessageHistoryResponse = self.http.get(url).send().await?.json().await?;
        response::into_messages(resp)
    }

    /// Post a message to `room_id` as `role`.
    pub async fn post_message(
        &self,
        role: Role,
        room_id: &str,
        request: &SendMessageRequest,
    ) -> Result<(), ClientError> {
        let url = self.url(&endpoint::send_message(role, room_id));
        tracing::debug!(%role, room_id, "posting message");

        let ack: SendAck = self.http.post(url).json(request).send().await?.json().await?;
        response::check_ack(ack)
    }
}
