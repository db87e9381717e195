//! Derived progress types.
//!
//! Nothing in this module is persisted authoritatively: a [`ProgressState`] is
//! recomputed from a plan and its activity entries every time it is read.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{ActivityEntry, DurationType, Junction, PlanState, Session};

/// A 7-day window anchored at the plan's start date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// Position of the week within the plan lifetime (0-indexed)
    pub index: u32,
    /// First day of the window
    pub start_date: Date,
    /// Last day of the window, clipped at the finishing date
    pub end_date: Date,
    /// Sessions planned inside the window
    pub sessions: Vec<Session>,
    /// Entries recorded inside the window
    pub entries: Vec<ActivityEntry>,
    pub is_completed: bool,
    /// True when the evaluation date falls inside this window
    pub is_current: bool,
    pub stats: WeekStats,
}

/// Day counts of a single week.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekStats {
    /// Days that have planned activity
    pub num_active_days_in_the_week: u32,
    /// Days not yet elapsed, today included
    pub num_left_days_in_the_week: u32,
    /// Planned days that are not yet elapsed
    pub num_active_days_left_in_the_week: u32,
    /// Distinct days with a qualifying entry
    pub days_completed_this_week: u32,
}

/// Week level totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementSummary {
    pub streak: u32,
    pub completed_weeks: u32,
    /// Elapsed weeks that were not completed; an in-progress current week is
    /// not counted here
    pub incomplete_weeks: u32,
    pub total_weeks: u32,
}

/// Progress towards a target.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub progress_value: u32,
    pub max_value: u32,
    pub achieved: bool,
    /// Whole percent, capped at 100
    pub percentage: u8,
}

impl Achievement {
    /// Builds an achievement from a progress value and a target.
    pub fn new(progress_value: u32, max_value: u32) -> Self {
        let percentage = if max_value == 0 {
            100
        } else {
            let ratio = u64::from(progress_value) * 100 / u64::from(max_value);
            ratio.min(100) as u8
        };
        Self {
            progress_value,
            max_value,
            achieved: progress_value >= max_value,
            percentage,
        }
    }
}

/// Outcome of one criterion item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaItemProgress {
    pub activity_id: String,
    pub required: u32,
    /// Lifetime total of the activity
    pub actual: u32,
    pub met: bool,
}

/// Outcome of one milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    pub milestone_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junction: Option<Junction>,
    pub items: Vec<CriteriaItemProgress>,
    pub achieved: bool,
}

/// Snapshot of a plan's progress as of one evaluation date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub plan_id: u64,
    /// Civil date "now" fell on
    pub evaluated_on: Date,
    pub duration_type: DurationType,
    pub weeks: Vec<Week>,
    pub summary: AchievementSummary,
    /// Statistics of the week containing the evaluation date (all zero once
    /// the plan has finished)
    pub current_week: WeekStats,
    pub habit: Achievement,
    pub lifestyle: Achievement,
    pub milestones: Vec<MilestoneProgress>,
    /// Freshly derived plan state
    pub current_week_state: PlanState,
    /// True when the plan's stored state disagrees with the derived one
    pub stale_state: bool,
}

impl ProgressState {
    /// Neutral state for callers that must render something when evaluation
    /// is impossible. Reports nothing as achieved.
    pub fn empty(plan_id: u64, evaluated_on: Date, duration_type: DurationType) -> Self {
        Self {
            plan_id,
            evaluated_on,
            duration_type,
            weeks: Vec::new(),
            summary: AchievementSummary::default(),
            current_week: WeekStats::default(),
            habit: Achievement::default(),
            lifestyle: Achievement::default(),
            milestones: Vec::new(),
            current_week_state: PlanState::OnTrack,
            stale_state: false,
        }
    }

    /// Achievement view matching the plan's duration type. Custom plans are
    /// judged by milestones and have none.
    pub fn primary_achievement(&self) -> Option<&Achievement> {
        match self.duration_type {
            DurationType::Habit => Some(&self.habit),
            DurationType::Lifestyle => Some(&self.lifestyle),
            DurationType::Custom => None,
        }
    }

    /// The week containing the evaluation date, if the plan is still running.
    pub fn current(&self) -> Option<&Week> {
        self.weeks.iter().rev().find(|w| w.is_current)
    }

    pub fn achieved_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.achieved).count()
    }
}
