//! Filter types for querying plans and entries.

use jiff::civil::Date;

use super::{DurationType, PlanState};
use crate::params::{ListEntries, ListPlans};

/// Filter criteria for listing plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Include soft-deleted plans
    pub include_deleted: bool,
    /// Only plans whose goal contains this text
    pub goal_contains: Option<String>,
    /// Only plans of this duration type
    pub duration_type: Option<DurationType>,
    /// Only plans whose cached state matches
    pub state: Option<PlanState>,
}

impl From<&ListPlans> for PlanFilter {
    fn from(params: &ListPlans) -> Self {
        Self {
            include_deleted: params.include_deleted,
            ..Default::default()
        }
    }
}

/// Filter for the data-access query returning activity entries.
///
/// Both bounds are inclusive. An empty activity set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub activity_ids: Vec<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl EntryFilter {
    pub fn for_activities(activity_ids: Vec<String>) -> Self {
        Self {
            activity_ids,
            ..Default::default()
        }
    }

    pub fn between(mut self, from: Date, to: Date) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

impl From<&ListEntries> for EntryFilter {
    fn from(params: &ListEntries) -> Self {
        Self {
            activity_ids: vec![params.activity_id.clone()],
            from: params.from,
            to: params.to,
        }
    }
}
