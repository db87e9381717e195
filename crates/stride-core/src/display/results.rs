//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Activity, ActivityEntry, Plan, PlanMilestone, Session};

/// Wrapper type for displaying the result of create operations: a success
/// line naming the resource, followed by the resource itself.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Activity> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created activity '{}'", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ActivityEntry> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Logged entry with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<PlanMilestone> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added milestone with ID: {} to plan {}",
            self.resource.id, self.resource.plan_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Session> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added session with ID: {} to plan {}",
            self.resource.id, self.resource.plan_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn test_create_result_activity() {
        let activity = Activity {
            id: "run".to_string(),
            title: "Running".to_string(),
            measure: "km".to_string(),
            created_at: Timestamp::from_second(1_704_110_400).unwrap(),
        };
        let output = CreateResult::new(activity).to_string();
        assert_eq!(output, "Created activity 'run'\n\n- `run`: Running (km)\n");
    }

    #[test]
    fn test_create_result_milestone() {
        let milestone = PlanMilestone {
            id: 4,
            plan_id: 2,
            title: "Celebrate".to_string(),
            criteria: None,
            position: 1,
        };
        let output = CreateResult::new(milestone).to_string();
        assert!(output.starts_with("Added milestone with ID: 4 to plan 2\n"));
        assert!(output.ends_with("2. Celebrate\n"));
    }
}
