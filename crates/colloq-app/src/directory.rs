//! Chat-room directory.
//!
//! The directory is the set of chat rooms visible to the current role. It is
//! fetched once per role value, replaced wholesale on completion, and
//! read-only in between. Load progress is an explicit four-state enum so the
//! resolver can distinguish "not there yet" from "not there".

use colloq_proto::ChatRoom;

/// Directory load state.
#[derive(Debug, Clone, PartialEq)]
pub enum Directory {
    /// No fetch has been issued.
    NotLoaded,
    /// A fetch is in flight.
    Loading,
    /// Fetch completed. An empty list is valid and distinct from
    /// [`Directory::NotLoaded`].
    Ready(Vec<ChatRoom>),
    /// Fetch failed; the previous value is discarded.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

/// Outcome of resolving a room id against the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The room is present.
    Found(&'a ChatRoom),
    /// The directory has not finished loading; resolution must be retried
    /// when it completes. Not a redirect.
    Pending,
    /// The directory is settled and the room is absent. The caller redirects
    /// to the directory root, exactly once per resolution attempt.
    Missing,
}

impl Directory {
    /// Resolve a room id. Pure lookup over already-fetched data; no I/O.
    pub fn resolve(&self, room_id: &str) -> Resolution<'_> {
        match self {
            Self::NotLoaded | Self::Loading => Resolution::Pending,
            Self::Ready(rooms) => rooms
                .iter()
                .find(|room| room.id == room_id)
                .map_or(Resolution::Missing, Resolution::Found),
            // A failed directory can never produce the room; the directory
            // root is where the load error is visible.
            Self::Failed { .. } => Resolution::Missing,
        }
    }

    /// Rooms in server order. Empty unless [`Directory::Ready`].
    pub fn rooms(&self) -> &[ChatRoom] {
        match self {
            Self::Ready(rooms) => rooms,
            _ => &[],
        }
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Failure description, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use colloq_proto::RoomStatus;

    use super::*;

    fn room(id: &str) -> ChatRoom {
        ChatRoom {
            id: id.to_string(),
            paper_id: "P1".to_string(),
            user_id: "u1".to_string(),
            reviewer_id: "rev1".to_string(),
            status: RoomStatus::Pending,
            paper_title: None,
            reviewer_name: None,
            last_message: None,
            created_at: chrono::DateTime::UNIX_EPOCH,
            updated_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn resolve_is_pending_until_loaded() {
        assert_eq!(Directory::NotLoaded.resolve("r1"), Resolution::Pending);
        assert_eq!(Directory::Loading.resolve("r1"), Resolution::Pending);
    }

    #[test]
    fn resolve_finds_room_by_id() {
        let dir = Directory::Ready(vec![room("r1"), room("r2")]);
        assert!(matches!(dir.resolve("r2"), Resolution::Found(r) if r.id == "r2"));
    }

    #[test]
    fn resolve_missing_only_when_settled() {
        let dir = Directory::Ready(vec![room("r1")]);
        assert_eq!(dir.resolve("r9"), Resolution::Missing);

        let failed = Directory::Failed { message: "boom".to_string() };
        assert_eq!(failed.resolve("r1"), Resolution::Missing);
    }

    #[test]
    fn empty_ready_is_not_an_error() {
        let dir = Directory::Ready(Vec::new());
        assert!(dir.rooms().is_empty());
        assert!(dir.error().is_none());
        assert!(!dir.is_loading());
    }
}
