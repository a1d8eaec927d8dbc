//! Wire types for the review-platform chat API
//!
//! Data model and JSON envelopes consumed by the chat feature. Field names
//! match the server's wire format exactly (the platform API uses a mix of
//! camelCase and snake_case keys), so every struct carries explicit serde
//! renames rather than a container-level rename rule.
//!
//! # Components
//!
//! - [`Role`], [`RoomStatus`]: closed vocabularies owned by the server
//! - [`ChatRoom`], [`Message`]: the chat data model
//! - [`envelope`]: `{ success, ... }` request/response envelopes

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod envelope;
mod model;

pub use model::{ChatRoom, Message, Role, RoomStatus};
