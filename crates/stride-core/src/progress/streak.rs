//! Streak and week totals.

use crate::models::{AchievementSummary, Week};

/// Counts consecutive completed weeks, walking back from the most recent one.
///
/// The in-progress current week adds to the streak once completed but never
/// breaks it; the first elapsed incomplete week does.
pub(super) fn streak(weeks: &[Week]) -> u32 {
    let mut streak = 0;
    for week in weeks.iter().rev() {
        if week.is_completed {
            streak += 1;
        } else if !week.is_current {
            break;
        }
    }
    streak
}

pub(super) fn summarize(weeks: &[Week]) -> AchievementSummary {
    let completed_weeks = weeks.iter().filter(|w| w.is_completed).count() as u32;
    let incomplete_weeks = weeks
        .iter()
        .filter(|w| !w.is_completed && !w.is_current)
        .count() as u32;

    AchievementSummary {
        streak: streak(weeks),
        completed_weeks,
        incomplete_weeks,
        total_weeks: weeks.len() as u32,
    }
}
