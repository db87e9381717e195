//! Plan summary types and functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{DurationType, OutlineType, Plan, PlanState};

/// Compact information about a plan for listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Goal of the plan
    pub goal: String,
    pub duration_type: DurationType,
    pub outline_type: OutlineType,
    /// Last derived state
    pub state: PlanState,
    pub finishing_date: Option<Date>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Deletion tombstone
    pub deleted_at: Option<Timestamp>,
    /// Number of attached activities
    pub activity_count: u32,
    /// Number of milestones
    pub milestone_count: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            goal: plan.goal.clone(),
            duration_type: plan.duration_type,
            outline_type: plan.outline_type,
            state: plan.state,
            finishing_date: plan.finishing_date,
            created_at: plan.created_at,
            deleted_at: plan.deleted_at,
            activity_count: plan.activities.len() as u32,
            milestone_count: plan.milestones.len() as u32,
        }
    }
}
