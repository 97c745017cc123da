// SPDX-License-Identifier: MIT

//! Lesson completion service.
//!
//! Completing a lesson is two sequential writes: upsert the completion
//! record, then run the stats engine with the standard per-lesson award.
//! There is no transaction across the two; a failure between them leaves a
//! completion record without the XP, which a retry repairs (the completion
//! upsert is idempotent, the streak rule is same-day idempotent).

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{LessonProgress, ProgressDelta, UserStats};
use crate::services::StatsService;
use crate::time_utils::now_rfc3339;

/// XP awarded per completed lesson.
pub const XP_PER_LESSON: u32 = 10;
/// Energy cost per completed lesson.
pub const ENERGY_PER_LESSON: i32 = -5;

/// Records lesson completions and triggers the stats award.
#[derive(Clone)]
pub struct ProgressService {
    db: FirestoreDb,
    stats: StatsService,
}

impl ProgressService {
    pub fn new(db: FirestoreDb, stats: StatsService) -> Self {
        Self { db, stats }
    }

    /// Mark a lesson completed and apply the per-lesson stats award.
    ///
    /// Returns the updated stats. Re-completing the same lesson on the same
    /// day re-awards XP but does not double-count the streak.
    pub async fn complete_lesson(&self, user_id: &str, lesson_id: &str) -> Result<UserStats> {
        let record = LessonProgress {
            user_id: user_id.to_string(),
            lesson_id: lesson_id.to_string(),
            completed: true,
            xp_earned: XP_PER_LESSON,
            completed_at: now_rfc3339(),
        };
        self.db.set_lesson_progress(&record).await?;

        let stats = self
            .stats
            .apply_progress(
                user_id,
                &ProgressDelta {
                    xp_delta: XP_PER_LESSON,
                    energy_delta: ENERGY_PER_LESSON,
                    streak_event: true,
                },
            )
            .await?;

        tracing::info!(user_id, lesson_id, xp = stats.xp, "Lesson completed");
        Ok(stats)
    }

    /// All completion records for a user.
    pub async fn list_progress(&self, user_id: &str) -> Result<Vec<LessonProgress>> {
        self.db.get_lesson_progress_for_user(user_id).await
    }
}
