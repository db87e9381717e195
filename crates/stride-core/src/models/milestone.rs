//! Milestones and their achievement criteria.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Junction;
use crate::error::{Result, TrackerError};

/// A milestone of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanMilestone {
    /// Unique identifier for the milestone
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// Short description of what the milestone celebrates
    pub title: String,

    /// Achievement criteria; milestones without criteria are never achieved
    /// by activity alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,

    /// Order of the milestone within the plan (0-indexed)
    pub position: u32,
}

/// One `{activityId, quantity}` requirement of a criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CriteriaItem {
    /// Activity whose lifetime total is compared
    pub activity_id: String,
    /// Lifetime total that must be reached
    pub quantity: u32,
}

/// A boolean combination of activity totals.
///
/// Serialized as `{"junction": "AND", "items": [{"activityId": "run",
/// "quantity": 3}]}`, which is also the storage format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Criteria {
    #[serde(default)]
    pub junction: Junction,
    pub items: Vec<CriteriaItem>,
}

impl Criteria {
    /// Creates a criterion where every item must be met.
    pub fn all(items: Vec<CriteriaItem>) -> Self {
        Self {
            junction: Junction::And,
            items,
        }
    }

    /// Creates a criterion where any item suffices.
    pub fn any(items: Vec<CriteriaItem>) -> Self {
        Self {
            junction: Junction::Or,
            items,
        }
    }

    /// Parses and validates a stored or user supplied JSON criterion.
    pub fn from_json(json: &str) -> Result<Self> {
        let criteria: Criteria = serde_json::from_str(json).map_err(|e| {
            TrackerError::invalid_input("criteria").with_reason(format!("malformed criteria: {e}"))
        })?;
        criteria.validate()?;
        Ok(criteria)
    }

    /// Checks the structural rules every criterion must satisfy before it
    /// reaches the evaluator.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` when the item list is empty, an
    /// activity ID is blank, or a quantity is zero.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(TrackerError::invalid_input("criteria")
                .with_reason("criteria must contain at least one item"));
        }
        for item in &self.items {
            if item.activity_id.trim().is_empty() {
                return Err(TrackerError::invalid_input("criteria.items.activityId")
                    .with_reason("activity ID cannot be empty"));
            }
            if item.quantity == 0 {
                return Err(TrackerError::invalid_input("criteria.items.quantity")
                    .with_reason(format!(
                        "quantity for '{}' must be greater than zero",
                        item.activity_id
                    )));
            }
        }
        Ok(())
    }
}

impl CriteriaItem {
    pub fn new(activity_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            activity_id: activity_id.into(),
            quantity,
        }
    }
}
