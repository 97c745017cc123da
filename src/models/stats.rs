//! Per-user gamification record and its update rule.
//!
//! One `UserStats` document exists per user, created lazily on first read.
//! All mutation goes through [`UserStats::apply`] so the streak rule has a
//! single definition.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Energy is a bounded resource; both ends are clamped.
pub const ENERGY_MIN: i32 = 0;
pub const ENERGY_MAX: i32 = 100;

/// Gamification stats for a user.
///
/// Stored at: `user_stats/{user_id}`
///
/// Writes are unconditional (last writer wins); see the service layer for
/// the accepted concurrency caveats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// Opaque user identifier (also used as document ID)
    pub user_id: String,
    /// Cumulative experience points; only ever increases
    #[serde(default)]
    pub xp: u32,
    /// Consecutive calendar days (UTC) with a qualifying event
    #[serde(default)]
    pub streak: u32,
    /// Depletable resource, always within `[0, 100]`
    #[serde(default = "default_energy")]
    pub energy: i32,
    /// UTC date of the most recent streak-qualifying event
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

fn default_energy() -> i32 {
    ENERGY_MAX
}

/// An intended stats change, as reported by a caller (lesson completed,
/// quiz passed, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressDelta {
    /// Experience points gained; never negative
    #[serde(default)]
    pub xp_delta: u32,
    /// Energy change, typically negative (depletion)
    #[serde(default)]
    pub energy_delta: i32,
    /// Whether this event counts toward the daily streak
    #[serde(default)]
    pub streak_event: bool,
}

impl UserStats {
    /// Default record for a never-before-seen user.
    pub fn new_for_user(user_id: &str, now: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            xp: 0,
            streak: 0,
            energy: ENERGY_MAX,
            last_active: None,
            updated_at: now.to_string(),
        }
    }

    /// Apply a progress delta in place.
    ///
    /// `today` is the current UTC calendar date. The streak rule:
    /// - already counted today: unchanged
    /// - last active yesterday: streak + 1
    /// - otherwise (older or never): reset to 1
    ///
    /// Energy is clamped to `[0, 100]`; xp only grows.
    pub fn apply(&mut self, delta: &ProgressDelta, today: NaiveDate, now: &str) {
        // Deltas come straight from client JSON; extreme values must clamp,
        // not wrap or panic.
        self.xp = self.xp.saturating_add(delta.xp_delta);
        self.energy = (i64::from(self.energy) + i64::from(delta.energy_delta))
            .clamp(i64::from(ENERGY_MIN), i64::from(ENERGY_MAX)) as i32;

        if delta.streak_event {
            let yesterday = today.checked_sub_days(Days::new(1));
            if self.last_active == Some(today) {
                // already counted today
            } else if self.last_active.is_some() && self.last_active == yesterday {
                self.streak += 1;
            } else {
                self.streak = 1;
            }
            self.last_active = Some(today);
        }

        self.updated_at = now.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn stats(xp: u32, streak: u32, energy: i32, last_active: Option<&str>) -> UserStats {
        UserStats {
            user_id: "user-1".to_string(),
            xp,
            streak,
            energy,
            last_active: last_active.map(date),
            updated_at: String::new(),
        }
    }

    fn delta(xp_delta: u32, energy_delta: i32, streak_event: bool) -> ProgressDelta {
        ProgressDelta {
            xp_delta,
            energy_delta,
            streak_event,
        }
    }

    #[test]
    fn test_xp_accrues() {
        let mut s = stats(20, 0, 50, None);
        s.apply(&delta(10, 0, false), date("2024-01-02"), "now");
        assert_eq!(s.xp, 30);
    }

    #[test]
    fn test_energy_clamped_at_zero() {
        let mut s = stats(0, 0, 3, None);
        s.apply(&delta(0, -5, false), date("2024-01-02"), "now");
        assert_eq!(s.energy, 0);
    }

    #[test]
    fn test_energy_clamped_at_cap() {
        let mut s = stats(0, 0, 90, None);
        s.apply(&delta(0, 20, false), date("2024-01-02"), "now");
        assert_eq!(s.energy, 100);
    }

    #[test]
    fn test_energy_extreme_positive_delta_stays_at_cap() {
        let mut s = stats(0, 0, 100, None);
        s.apply(&delta(0, i32::MAX, false), date("2024-01-02"), "now");
        assert_eq!(s.energy, 100);
    }

    #[test]
    fn test_energy_extreme_negative_delta_stays_at_floor() {
        let mut s = stats(0, 0, 3, None);
        s.apply(&delta(0, i32::MIN, false), date("2024-01-02"), "now");
        assert_eq!(s.energy, 0);
    }

    #[test]
    fn test_xp_saturates_instead_of_wrapping() {
        let mut s = stats(u32::MAX - 5, 0, 50, None);
        s.apply(&delta(10, 0, false), date("2024-01-02"), "now");
        assert_eq!(s.xp, u32::MAX);
    }

    #[test]
    fn test_streak_continues_from_yesterday() {
        let mut s = stats(0, 3, 100, Some("2024-01-01"));
        s.apply(&delta(0, 0, true), date("2024-01-02"), "now");
        assert_eq!(s.streak, 4);
        assert_eq!(s.last_active, Some(date("2024-01-02")));
    }

    #[test]
    fn test_streak_same_day_idempotent() {
        let mut s = stats(0, 3, 100, Some("2024-01-02"));
        s.apply(&delta(0, 0, true), date("2024-01-02"), "now");
        assert_eq!(s.streak, 3);
        assert_eq!(s.last_active, Some(date("2024-01-02")));
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let mut s = stats(0, 7, 100, Some("2023-12-28"));
        s.apply(&delta(0, 0, true), date("2024-01-02"), "now");
        assert_eq!(s.streak, 1);
    }

    #[test]
    fn test_streak_first_event() {
        let mut s = stats(0, 0, 100, None);
        s.apply(&delta(0, 0, true), date("2024-01-02"), "now");
        assert_eq!(s.streak, 1);
        assert_eq!(s.last_active, Some(date("2024-01-02")));
    }

    #[test]
    fn test_no_streak_event_leaves_streak_alone() {
        let mut s = stats(0, 3, 100, Some("2024-01-01"));
        s.apply(&delta(5, -1, false), date("2024-01-02"), "now");
        assert_eq!(s.streak, 3);
        assert_eq!(s.last_active, Some(date("2024-01-01")));
    }

    #[test]
    fn test_combined_scenario() {
        // xp 20, energy 50, streak 3, last active 2024-01-01;
        // +10 xp, -5 energy, streak event on 2024-01-02.
        let mut s = stats(20, 3, 50, Some("2024-01-01"));
        s.apply(&delta(10, -5, true), date("2024-01-02"), "2024-01-02T09:00:00Z");
        assert_eq!(s.xp, 30);
        assert_eq!(s.energy, 45);
        assert_eq!(s.streak, 4);
        assert_eq!(s.last_active, Some(date("2024-01-02")));
    }

    #[test]
    fn test_month_boundary_counts_as_yesterday() {
        let mut s = stats(0, 10, 100, Some("2024-01-31"));
        s.apply(&delta(0, 0, true), date("2024-02-01"), "now");
        assert_eq!(s.streak, 11);
    }

    #[test]
    fn test_default_record() {
        let s = UserStats::new_for_user("user-9", "2024-01-15T10:00:00Z");
        assert_eq!(s.xp, 0);
        assert_eq!(s.streak, 0);
        assert_eq!(s.energy, 100);
        assert_eq!(s.last_active, None);
    }
}
