//! Plan model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Activity, DurationType, OutlineType, PlanMilestone, PlanState, Session};

/// A user-defined goal with a schedule, an activity set and milestones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// What the plan is working towards
    pub goal: String,

    /// Optional free-form notes about the plan
    pub description: Option<String>,

    /// Achievement model used to judge the plan
    #[serde(default)]
    pub duration_type: DurationType,

    /// How the weekly schedule is expressed
    #[serde(default)]
    pub outline_type: OutlineType,

    /// Last derived state (cache hint only)
    #[serde(default)]
    pub state: PlanState,

    /// Weekly target for `TIMES_PER_WEEK` plans
    pub times_per_week: Option<u32>,

    /// Target window in weeks for habit and lifestyle achievement
    pub target_weeks: Option<u32>,

    /// Optional date after which the plan stops accruing weeks
    pub finishing_date: Option<Date>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Tombstone set when the plan is deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,

    /// Activities whose entries count towards this plan
    #[serde(default)]
    pub activities: Vec<Activity>,

    /// Milestones in display order
    #[serde(default)]
    pub milestones: Vec<PlanMilestone>,

    /// Planned sessions ordered by date
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl Plan {
    /// Returns true when the plan carries a deletion tombstone.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true when `activity_id` is part of the plan's activity set.
    pub fn has_activity(&self, activity_id: &str) -> bool {
        self.activities.iter().any(|a| a.id == activity_id)
    }

    /// Activity IDs of the plan, in the order they were attached.
    pub fn activity_ids(&self) -> Vec<String> {
        self.activities.iter().map(|a| a.id.clone()).collect()
    }
}
