// SPDX-License-Identifier: MIT

//! Gamification stats service.
//!
//! Read-modify-write updates of the per-user stats record. The read and the
//! write are separate store calls with no version check between them:
//! concurrent updates for the same user race and the last write wins. That
//! matches the product's behavior today; if lost updates ever matter, the
//! write needs a compare-and-swap on `updated_at` (see DESIGN.md).

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{ProgressDelta, UserStats};
use crate::time_utils::{now_rfc3339, today_utc};

/// Reads, updates, and persists per-user gamification stats.
#[derive(Clone)]
pub struct StatsService {
    db: FirestoreDb,
}

impl StatsService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Fetch the stats record for a user, creating the default record
    /// (`xp=0, streak=0, energy=100, last_active=None`) on first read.
    ///
    /// Performs at most one write, and only for a never-before-seen user.
    /// Store failures propagate unchanged; absence is never an error.
    pub async fn get_or_create(&self, user_id: &str) -> Result<UserStats> {
        if let Some(stats) = self.db.get_user_stats(user_id).await? {
            return Ok(stats);
        }

        let stats = UserStats::new_for_user(user_id, &now_rfc3339());
        self.db.set_user_stats(&stats).await?;

        tracing::info!(user_id, "Created default stats record");
        Ok(stats)
    }

    /// Apply a progress delta and persist the result.
    ///
    /// The streak rule uses the current UTC calendar date; see
    /// [`UserStats::apply`] for the transition itself. The write is an
    /// unconditional overwrite of the whole record.
    pub async fn apply_progress(&self, user_id: &str, delta: &ProgressDelta) -> Result<UserStats> {
        let mut stats = self.get_or_create(user_id).await?;

        stats.apply(delta, today_utc(), &now_rfc3339());
        self.db.set_user_stats(&stats).await?;

        tracing::debug!(
            user_id,
            xp = stats.xp,
            streak = stats.streak,
            energy = stats.energy,
            "Applied progress delta"
        );

        Ok(stats)
    }
}
