// SPDX-License-Identifier: MIT

//! Peer pairing models for storage and API.

use serde::{Deserialize, Serialize};

/// A two-party peer chat slot stored in Firestore.
///
/// `user_b == None` means the slot is open and waiting for a second party.
/// Once `user_b` is set the membership never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChat {
    /// Chat ID (also used as document ID)
    pub id: String,
    /// Requesting user, set at creation
    pub user_a: String,
    /// Second party, or None while the slot is open
    #[serde(default)]
    pub user_b: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl PeerChat {
    /// An open chat has only one party assigned.
    pub fn is_open(&self) -> bool {
        self.user_b.is_none()
    }

    /// Whether `user_id` is a member of this chat.
    pub fn has_member(&self, user_id: &str) -> bool {
        self.user_a == user_id || self.user_b.as_deref() == Some(user_id)
    }
}

/// A message within a peer chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerMessage {
    /// Message ID (also used as document ID)
    pub id: String,
    /// Chat this message belongs to
    pub chat_id: String,
    /// Sending user
    pub sender_id: String,
    /// Message body
    pub body: String,
    /// Send timestamp (ISO 8601, used for ordering)
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(user_b: Option<&str>) -> PeerChat {
        PeerChat {
            id: "chat-1".to_string(),
            user_a: "alice".to_string(),
            user_b: user_b.map(String::from),
            created_at: "2024-01-15T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_open_chat_membership() {
        let c = chat(None);
        assert!(c.is_open());
        assert!(c.has_member("alice"));
        assert!(!c.has_member("bob"));
    }

    #[test]
    fn test_completed_chat_membership() {
        let c = chat(Some("bob"));
        assert!(!c.is_open());
        assert!(c.has_member("alice"));
        assert!(c.has_member("bob"));
        assert!(!c.has_member("carol"));
    }
}
