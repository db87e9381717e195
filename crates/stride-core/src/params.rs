//! Parameter structures for Stride operations
//!
//! These structures are shared by every interface (CLI, MCP) and stay free
//! of framework-specific derives. Interface layers define their own wrapper
//! types (clap `Args`, MCP request structs) and convert into these with
//! `From` implementations:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  MCP Requests   │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Types without date fields also derive `JsonSchema` behind the `schema`
//! feature so the MCP server can expose them directly.

use jiff::{civil::Date, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{Criteria, DurationType, OutlineType};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_plan, delete_plan, restore_plan and
/// delete_entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Goal of the plan (required)
    pub goal: String,
    /// Optional notes
    pub description: Option<String>,
    /// Achievement model
    #[serde(default)]
    pub duration_type: DurationType,
    /// Weekly schedule model
    #[serde(default)]
    pub outline_type: OutlineType,
    /// Weekly target, required for `TIMES_PER_WEEK`
    pub times_per_week: Option<u32>,
    /// Target window in weeks
    pub target_weeks: Option<u32>,
    /// Optional last day of the plan
    pub finishing_date: Option<Date>,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Include soft-deleted plans in the listing
    #[serde(default)]
    pub include_deleted: bool,
}

/// Parameters for creating an activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateActivity {
    /// Short identifier (`run`)
    pub id: String,
    /// Human readable name
    pub title: String,
    /// Unit of measure
    pub measure: String,
}

/// Parameters for adding an activity to a plan's activity set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AttachActivity {
    pub plan_id: u64,
    pub activity_id: String,
}

/// Parameters for adding a milestone to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddMilestone {
    pub plan_id: u64,
    pub title: String,
    /// Optional achievement criteria
    pub criteria: Option<Criteria>,
}

/// Parameters for planning a session on a `SPECIFIC` plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSession {
    pub plan_id: u64,
    pub activity_id: String,
    pub date: Date,
    /// Minimum quantity for the session to count
    pub quantity: u32,
    pub description: Option<String>,
}

/// Parameters for recording an activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub activity_id: String,
    pub quantity: u32,
    /// Civil date the activity was performed on
    pub date: Date,
}

/// Parameters for listing the entries of one activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEntries {
    pub activity_id: String,
    /// Inclusive lower bound
    pub from: Option<Date>,
    /// Inclusive upper bound
    pub to: Option<Date>,
}

/// Parameters for evaluating a plan's progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowProgress {
    /// Plan to evaluate
    pub id: u64,
    /// Evaluation instant; the current instant when absent
    pub at: Option<Timestamp>,
}
