//! Chat data model.
//!
//! [`ChatRoom`] and [`Message`] mirror the server's documents, including the
//! optional denormalized display fields the list view renders. Both are
//! read-only to the client except for locally synthesized [`Message`] values
//! awaiting server confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Participant role in a paper-review pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Paper author.
    User,
    /// Assigned reviewer.
    Reviewer,
}

impl Role {
    /// Wire representation, also used in endpoint paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Reviewer => "reviewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "author" => Ok(Self::User),
            "reviewer" => Ok(Self::Reviewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error for a role string outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role {0:?} (expected \"user\" or \"reviewer\")")]
pub struct UnknownRole(String);

/// Lifecycle status of a chat room. Server-owned, read-only to the client.
///
/// Message sending is permitted iff the status is [`RoomStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Review in progress; the conversation is open.
    Pending,
    /// Review finished; the conversation is closed.
    Completed,
    /// Review declined; the conversation is closed.
    Declined,
}

impl RoomStatus {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Declined => "declined",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conversation scoped to one (paper, reviewer) pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoom {
    /// Server-assigned unique identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Paper under review.
    #[serde(rename = "paperId")]
    pub paper_id: String,

    /// Author participant.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Reviewer participant.
    pub reviewer_id: String,

    /// Lifecycle status. Sending is allowed only while `pending`.
    pub status: RoomStatus,

    /// Denormalized paper title for display.
    #[serde(rename = "paperTitle", default, skip_serializing_if = "Option::is_none")]
    pub paper_title: Option<String>,

    /// Denormalized reviewer display name.
    #[serde(rename = "reviewerName", default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,

    /// Snapshot of the most recent message, if any.
    #[serde(rename = "lastMessage", default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,

    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl ChatRoom {
    /// Display title: the paper title when denormalized, else the paper id.
    pub fn title(&self) -> &str {
        self.paper_title.as_deref().unwrap_or(&self.paper_id)
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned identifier. Absent on locally synthesized messages
    /// that have not been confirmed by the server.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Text body. Non-empty when sent.
    pub message: String,

    /// Role of the sender.
    pub sender_type: Role,

    /// Creation timestamp (ISO-8601).
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
