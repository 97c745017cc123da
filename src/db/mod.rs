//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Gamification stats (keyed by user_id)
    pub const USER_STATS: &str = "user_stats";
    pub const PEER_CHATS: &str = "peer_chats";
    pub const PEER_MESSAGES: &str = "peer_messages";
    pub const LESSON_PROGRESS: &str = "lesson_progress";
}
