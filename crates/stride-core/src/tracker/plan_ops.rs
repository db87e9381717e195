//! Plan operations for the Tracker.

use super::Tracker;
use crate::{
    display::PlanSummaries,
    error::{Result, TrackerError},
    models::{Plan, PlanFilter, PlanMilestone, PlanSummary, Session},
    params::{AddMilestone, AddSession, AttachActivity, CreatePlan, Id, ListPlans},
};

impl Tracker {
    /// Creates a new plan.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` when the goal is blank, a
    /// `TIMES_PER_WEEK` plan lacks a weekly target between 1 and 7, the target
    /// window is zero, or the finishing date precedes the creation date in
    /// the evaluator's time zone.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let params = params.clone();
        let time_zone = self.evaluator.time_zone().clone();
        self.with_database(move |db| db.create_plan_in(&params, &time_zone))
            .await
    }

    /// Retrieves a plan by its ID, with activities, milestones and sessions.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.with_database(move |db| db.get_plan(plan_id)).await
    }

    /// Lists plan summaries with optional filtering.
    pub async fn list_plans(&self, filter: Option<PlanFilter>) -> Result<Vec<PlanSummary>> {
        self.with_database(move |db| db.list_plans(filter.as_ref()))
            .await
    }

    /// Lists plans as a display wrapper for the interfaces.
    pub async fn list_plans_summary(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let summaries = self.list_plans(Some(PlanFilter::from(params))).await?;
        Ok(PlanSummaries(summaries))
    }

    /// Soft-deletes a plan and returns it as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::PlanNotFound` when the plan does not exist or
    /// is already deleted.
    pub async fn delete_plan(&self, params: &Id) -> Result<Plan> {
        let plan_id = params.id;
        self.with_database(move |db| {
            let plan = db
                .get_plan(plan_id)?
                .filter(|plan| !plan.is_deleted())
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            db.delete_plan(plan_id)?;
            Ok(plan)
        })
        .await
    }

    /// Restores a soft-deleted plan and returns it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::PlanNotFound` when the plan does not exist or
    /// is not deleted.
    pub async fn restore_plan(&self, params: &Id) -> Result<Plan> {
        let plan_id = params.id;
        self.with_database(move |db| {
            if !db.restore_plan(plan_id)? {
                return Err(TrackerError::PlanNotFound { id: plan_id });
            }
            db.get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })
        })
        .await
    }

    /// Adds an activity to a plan's activity set and returns the updated
    /// plan. Attaching an activity twice is a no-op.
    pub async fn attach_activity(&self, params: &AttachActivity) -> Result<Plan> {
        let params = params.clone();
        self.with_database(move |db| {
            if !db.attach_activity(&params)? {
                log::debug!(
                    "activity '{}' already attached to plan {}",
                    params.activity_id,
                    params.plan_id
                );
            }
            db.get_plan(params.plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: params.plan_id })
        })
        .await
    }

    /// Appends a milestone to a plan.
    pub async fn add_milestone(&self, params: &AddMilestone) -> Result<PlanMilestone> {
        let params = params.clone();
        self.with_database(move |db| db.add_milestone(&params))
            .await
    }

    /// Plans a session on a `SPECIFIC` plan.
    pub async fn add_session(&self, params: &AddSession) -> Result<Session> {
        let params = params.clone();
        self.with_database(move |db| db.add_session(&params)).await
    }
}
