//! Milestone criteria evaluation.

use super::weeks::EntryIndex;
use crate::models::{CriteriaItemProgress, MilestoneProgress, Plan};

/// Evaluates every milestone against lifetime-to-date activity totals.
pub(super) fn evaluate(plan: &Plan, index: &EntryIndex<'_>) -> Vec<MilestoneProgress> {
    plan.milestones
        .iter()
        .map(|milestone| {
            let Some(criteria) = &milestone.criteria else {
                return MilestoneProgress {
                    milestone_id: milestone.id,
                    title: milestone.title.clone(),
                    junction: None,
                    items: Vec::new(),
                    achieved: false,
                };
            };

            let items: Vec<CriteriaItemProgress> = criteria
                .items
                .iter()
                .map(|item| {
                    let actual = index.total(&item.activity_id);
                    CriteriaItemProgress {
                        activity_id: item.activity_id.clone(),
                        required: item.quantity,
                        actual,
                        met: actual >= item.quantity,
                    }
                })
                .collect();
            let achieved = criteria.junction.combine(items.iter().map(|i| i.met));

            MilestoneProgress {
                milestone_id: milestone.id,
                title: milestone.title.clone(),
                junction: Some(criteria.junction),
                items,
                achieved,
            }
        })
        .collect()
}
