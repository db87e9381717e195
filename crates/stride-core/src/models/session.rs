//! Planned sessions for `SPECIFIC` plans.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// What should happen on a given day of a `SPECIFIC` plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: u64,
    pub plan_id: u64,
    pub activity_id: String,
    pub date: Date,
    /// Minimum quantity a single entry must reach
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
