//! Progress operations for the Tracker.

use jiff::Timestamp;

use super::Tracker;
use crate::{error::Result, models::ProgressState, params::ShowProgress, progress::evaluate_plan};

impl Tracker {
    /// Evaluates a plan's progress.
    ///
    /// The evaluation instant is `params.at`, or the current instant when
    /// absent. The stored plan state is only a cache: when an evaluation at
    /// the current instant derives a different state, it is written back
    /// before returning. Evaluations at an explicit `at` leave it untouched.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::PlanNotFound` for missing or deleted plans and
    /// `TrackerError::Progress` when the plan or its milestones are invalid.
    pub async fn plan_progress(&self, params: &ShowProgress) -> Result<ProgressState> {
        let plan_id = params.id;
        let refresh_cache = params.at.is_none();
        let now = params.at.unwrap_or_else(Timestamp::now);
        let evaluator = self.evaluator.clone();

        self.with_database(move |db| {
            let progress = evaluate_plan(&*db, &evaluator, plan_id, now)?;
            if refresh_cache && progress.stale_state {
                log::info!(
                    "plan {plan_id}: refreshing cached state to {}",
                    progress.current_week_state.as_str()
                );
                db.update_plan_state(plan_id, progress.current_week_state)?;
            }
            Ok(progress)
        })
        .await
    }
}
