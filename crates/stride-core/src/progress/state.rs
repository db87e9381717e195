//! Derivation of the plan state from a fresh evaluation.

use jiff::civil::Date;

use super::weeks::{self, EntryIndex};
use crate::models::{Achievement, DurationType, MilestoneProgress, Plan, PlanState, Week};

pub(super) struct StateInputs<'s, 'i> {
    pub plan: &'s Plan,
    pub weeks: &'s [Week],
    pub index: &'s EntryIndex<'i>,
    pub today: Date,
    pub habit: &'s Achievement,
    pub lifestyle: &'s Achievement,
    pub milestones: &'s [MilestoneProgress],
}

/// Derives the plan state. The stored state is not consulted here.
///
/// An unachieved plan is `Failed` once today is past its finishing date.
/// A clipped final week is judged against its prorated target, so missing
/// it can leave the plan unachieved and therefore failed.
pub(super) fn derive(inputs: &StateInputs<'_, '_>) -> PlanState {
    let plan = inputs.plan;
    let achieved = match plan.duration_type {
        DurationType::Habit => inputs.habit.achieved,
        DurationType::Lifestyle => inputs.lifestyle.achieved,
        DurationType::Custom => {
            !inputs.milestones.is_empty() && inputs.milestones.iter().all(|m| m.achieved)
        }
    };
    if achieved {
        return PlanState::Completed;
    }

    if plan.finishing_date.is_some_and(|finish| inputs.today > finish) {
        return PlanState::Failed;
    }

    let Some(last) = inputs.weeks.last() else {
        return PlanState::OnTrack;
    };

    if !last.is_current {
        return if last.is_completed {
            PlanState::OnTrack
        } else {
            PlanState::AtRisk
        };
    }

    let previous_lapsed = inputs
        .weeks
        .len()
        .checked_sub(2)
        .and_then(|i| inputs.weeks.get(i))
        .is_some_and(|w| !w.is_completed);

    if previous_lapsed || weeks::is_out_of_reach(plan, last, inputs.index, inputs.today) {
        PlanState::AtRisk
    } else {
        PlanState::OnTrack
    }
}
