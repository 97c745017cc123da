//! Lesson completion records.

use serde::{Deserialize, Serialize};

/// One completion record per (user, lesson) pair.
///
/// Stored at: `lesson_progress/{user_id}_{lesson_id}` (IDs URL-encoded).
/// Re-completing a lesson overwrites the record; it is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonProgress {
    /// Owning user
    pub user_id: String,
    /// Lesson identifier from the course catalog
    pub lesson_id: String,
    /// Always true once the record exists
    pub completed: bool,
    /// XP awarded for this completion
    #[serde(default)]
    pub xp_earned: u32,
    /// Completion timestamp (ISO 8601)
    pub completed_at: String,
}
