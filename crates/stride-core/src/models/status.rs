//! Enumerations describing how a plan is scheduled and how it is doing.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalizes user and database spellings (`times-per-week`, `TIMES_PER_WEEK`).
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// How long a plan runs and which achievement model judges it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationType {
    /// Frequency based: judged by consecutive completed weeks
    #[default]
    Habit,
    /// Cumulative: judged by the total of completed weeks
    Lifestyle,
    /// Judged by milestones only
    Custom,
}

impl FromStr for DurationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "habit" => Ok(DurationType::Habit),
            "lifestyle" => Ok(DurationType::Lifestyle),
            "custom" => Ok(DurationType::Custom),
            _ => Err(format!("Invalid duration type: {s}")),
        }
    }
}

impl DurationType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationType::Habit => "HABIT",
            DurationType::Lifestyle => "LIFESTYLE",
            DurationType::Custom => "CUSTOM",
        }
    }
}

/// How the plan's weekly schedule is expressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutlineType {
    /// Dated sessions say exactly what happens on which day
    Specific,
    /// Any N days per week count
    #[default]
    TimesPerWeek,
}

impl FromStr for OutlineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "specific" => Ok(OutlineType::Specific),
            "times_per_week" => Ok(OutlineType::TimesPerWeek),
            _ => Err(format!("Invalid outline type: {s}")),
        }
    }
}

impl OutlineType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlineType::Specific => "SPECIFIC",
            OutlineType::TimesPerWeek => "TIMES_PER_WEEK",
        }
    }
}

/// Aggregate state of a plan.
///
/// The value stored alongside a plan is only a cache of the last evaluation;
/// the evaluator always derives a fresh one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanState {
    #[default]
    OnTrack,
    AtRisk,
    Failed,
    Completed,
}

impl FromStr for PlanState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "on_track" | "ontrack" => Ok(PlanState::OnTrack),
            "at_risk" | "atrisk" => Ok(PlanState::AtRisk),
            "failed" => Ok(PlanState::Failed),
            "completed" => Ok(PlanState::Completed),
            _ => Err(format!("Invalid plan state: {s}")),
        }
    }
}

impl PlanState {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanState::OnTrack => "ON_TRACK",
            PlanState::AtRisk => "AT_RISK",
            PlanState::Failed => "FAILED",
            PlanState::Completed => "COMPLETED",
        }
    }

    /// Get state with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stride_core::models::PlanState;
    ///
    /// assert_eq!(PlanState::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(PlanState::AtRisk.with_icon(), "! At risk");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PlanState::OnTrack => "➤ On track",
            PlanState::AtRisk => "! At risk",
            PlanState::Failed => "✗ Failed",
            PlanState::Completed => "✓ Completed",
        }
    }
}

/// How the items of a milestone criterion combine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Junction {
    /// Every item must be met
    #[default]
    And,
    /// At least one item must be met
    Or,
}

impl FromStr for Junction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "and" | "all" => Ok(Junction::And),
            "or" | "any" => Ok(Junction::Or),
            _ => Err(format!("Invalid junction: {s}")),
        }
    }
}

impl Junction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Junction::And => "AND",
            Junction::Or => "OR",
        }
    }

    /// Combines per-item outcomes. An empty item list never holds.
    pub fn combine<I>(&self, outcomes: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut outcomes = outcomes.into_iter().peekable();
        if outcomes.peek().is_none() {
            return false;
        }
        match self {
            Junction::And => outcomes.all(|met| met),
            Junction::Or => outcomes.any(|met| met),
        }
    }
}
