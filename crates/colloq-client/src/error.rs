//! Client error taxonomy.

use thiserror::Error;

/// Failures surfaced by API calls.
///
/// All variants reduce to a single human-readable message in the UI's error
/// slots; no caller branches on the kind. Room-not-found is a resolver
/// outcome in the application layer, not an error here.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server answered with `success: false`.
    #[error("{message}")]
    Rejected {
        /// Server-provided reason, or a generic fallback for the endpoint.
        message: String,
    },

    /// Network or protocol failure before a well-formed envelope arrived.
    #[cfg(feature = "transport")]
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Rejection with the server's reason when present, else `fallback`.
    pub fn rejected(server_message: Option<String>, fallback: &str) -> Self {
        Self::Rejected { message: server_message.unwrap_or_else(|| fallback.to_string()) }
    }
}
