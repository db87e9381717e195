//! Plan checks performed before any week is evaluated.

use jiff::civil::Date;

use crate::{
    error::ProgressError,
    models::{OutlineType, Plan},
};

/// Rejects plans the evaluator cannot interpret.
pub(super) fn check_plan(plan: &Plan, start: Date) -> Result<(), ProgressError> {
    if let Some(finishing_date) = plan.finishing_date {
        if finishing_date < start {
            return Err(ProgressError::invalid_plan(
                plan.id,
                format!("finishing date {finishing_date} precedes start date {start}"),
            ));
        }
    }

    if plan.outline_type == OutlineType::TimesPerWeek {
        match plan.times_per_week {
            None | Some(0) => {
                return Err(ProgressError::invalid_plan(
                    plan.id,
                    "TIMES_PER_WEEK plans need a weekly target",
                ));
            }
            Some(target) if target > 7 => {
                return Err(ProgressError::invalid_plan(
                    plan.id,
                    format!("weekly target {target} exceeds the 7 days of a week"),
                ));
            }
            Some(_) => {}
        }
    }

    if plan.target_weeks == Some(0) {
        return Err(ProgressError::invalid_plan(
            plan.id,
            "target window must be at least one week",
        ));
    }

    if let Some(session) = plan.sessions.iter().find(|s| !plan.has_activity(&s.activity_id)) {
        return Err(ProgressError::invalid_plan(
            plan.id,
            format!(
                "session {} references activity '{}' outside the plan",
                session.id, session.activity_id
            ),
        ));
    }

    for milestone in &plan.milestones {
        let Some(criteria) = &milestone.criteria else {
            continue;
        };
        if let Some(item) = criteria
            .items
            .iter()
            .find(|item| !plan.has_activity(&item.activity_id))
        {
            return Err(ProgressError::InvalidMilestone {
                milestone_id: milestone.id,
                activity_id: item.activity_id.clone(),
            });
        }
    }

    Ok(())
}
