//! Plan progress evaluation.
//!
//! [`compute_progress`] turns a plan and its activity history into a
//! [`ProgressState`]. The evaluation is a pure function of its arguments:
//! "now" is passed in, inputs are only borrowed, and ordered maps keep the
//! output identical across calls.
//!
//! # Algorithm
//!
//! ```text
//! created_at ──▶ start date ──┐
//! now ─────────▶ today ───────┼─▶ lifetime [start, min(today, finish)]
//! finishing_date ─────────────┘          │
//!                                        ▼
//!                     7-day windows anchored at the start date
//!                                        │
//!            ┌───────────────┬───────────┴──────┬──────────────────┐
//!            ▼               ▼                  ▼                  ▼
//!      week completion     streak     habit / lifestyle     milestones
//!            └───────────────┴─────────┬────────┴──────────────────┘
//!                                      ▼
//!                              derived plan state
//! ```
//!
//! # Targets
//!
//! Habit progress is the current streak and lifestyle progress is the total
//! of completed weeks. Both are measured against the same target window:
//! the plan's `target_weeks` when set, otherwise the number of weeks between
//! the start and finishing dates, otherwise [`DEFAULT_TARGET_WEEKS`].
//!
//! The last week of a plan with a finishing date may be shorter than seven
//! days. A `TIMES_PER_WEEK` plan holds such a week to `ceil(times_per_week *
//! days / 7)` active days, at least one. The clipped week counts toward the
//! target window, the streak and the plan outcome like any other week.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, tz::TimeZone};
//! use stride_core::{
//!     models::{Activity, ActivityEntry, DurationType, OutlineType, Plan, PlanState},
//!     progress::compute_progress,
//! };
//!
//! let created = date(2024, 1, 1).to_zoned(TimeZone::UTC).unwrap().timestamp();
//! let plan = Plan {
//!     id: 1,
//!     goal: "Move more".to_string(),
//!     description: None,
//!     duration_type: DurationType::Habit,
//!     outline_type: OutlineType::TimesPerWeek,
//!     state: PlanState::OnTrack,
//!     times_per_week: Some(3),
//!     target_weeks: Some(4),
//!     finishing_date: None,
//!     created_at: created,
//!     updated_at: created,
//!     deleted_at: None,
//!     activities: vec![Activity {
//!         id: "run".to_string(),
//!         title: "Running".to_string(),
//!         measure: "km".to_string(),
//!         created_at: created,
//!     }],
//!     milestones: vec![],
//!     sessions: vec![],
//! };
//! let entries: Vec<ActivityEntry> = [2, 3, 5]
//!     .into_iter()
//!     .map(|day| ActivityEntry {
//!         id: day as u64,
//!         activity_id: "run".to_string(),
//!         quantity: 5,
//!         date: date(2024, 1, day),
//!         created_at: created,
//!     })
//!     .collect();
//!
//! let now = date(2024, 1, 6).to_zoned(TimeZone::UTC).unwrap().timestamp();
//! let progress = compute_progress(&plan, &entries, now).unwrap();
//! assert!(progress.weeks[0].is_completed);
//! assert_eq!(progress.summary.streak, 1);
//! ```

use jiff::{civil::Date, tz::TimeZone, Timestamp, ToSpan};
use log::debug;

use crate::{
    error::{ProgressError, Result, TrackerError},
    models::{Achievement, ActivityEntry, EntryFilter, Plan, ProgressState},
};

mod milestones;
mod state;
mod streak;
mod validate;
mod weeks;

#[cfg(test)]
mod tests;

/// Target window used when a plan configures neither `target_weeks` nor a
/// finishing date.
pub const DEFAULT_TARGET_WEEKS: u32 = 4;

/// Evaluates plans in a fixed time zone.
///
/// The time zone decides which civil date the plan's creation instant and
/// the evaluation instant fall on.
#[derive(Debug, Clone)]
pub struct ProgressEvaluator {
    time_zone: TimeZone,
}

impl ProgressEvaluator {
    /// Creates an evaluator for the given time zone.
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// Creates an evaluator that reads dates in UTC.
    pub fn utc() -> Self {
        Self::new(TimeZone::UTC)
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Civil date of an instant in the evaluator's time zone.
    pub fn date_of(&self, instant: Timestamp) -> Date {
        instant.to_zoned(self.time_zone.clone()).date()
    }

    /// Computes the progress snapshot of `plan` as of `now`.
    ///
    /// `entries` should hold the entries of the plan's activities; entries of
    /// other activities or outside the plan lifetime are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidPlan` when the finishing date precedes
    /// the start date, a `TIMES_PER_WEEK` plan has no usable weekly target,
    /// the target window is zero, or a session names a foreign activity.
    /// Returns `ProgressError::InvalidMilestone` when a milestone criterion
    /// names an activity outside the plan's activity set.
    pub fn evaluate(
        &self,
        plan: &Plan,
        entries: &[ActivityEntry],
        now: Timestamp,
    ) -> std::result::Result<ProgressState, ProgressError> {
        let start = self.date_of(plan.created_at);
        let today = self.date_of(now);
        validate::check_plan(plan, start)?;

        let lifetime = weeks::Lifetime::new(start, today, plan.finishing_date);
        let index = weeks::EntryIndex::build(plan, entries, &lifetime);
        let weeks = weeks::partition(plan, &index, &lifetime, today);
        let summary = streak::summarize(&weeks);

        let target = target_weeks(plan, start);
        let habit = Achievement::new(summary.streak, target);
        let lifestyle = Achievement::new(summary.completed_weeks, target);
        let milestones = milestones::evaluate(plan, &index);

        let current_week_state = state::derive(&state::StateInputs {
            plan,
            weeks: &weeks,
            index: &index,
            today,
            habit: &habit,
            lifestyle: &lifestyle,
            milestones: &milestones,
        });
        let stale_state = current_week_state != plan.state;
        if stale_state {
            debug!(
                "plan {}: stored state {} disagrees with derived state {}",
                plan.id,
                plan.state.as_str(),
                current_week_state.as_str()
            );
        }

        let current_week = weeks
            .iter()
            .find(|w| w.is_current)
            .map(|w| w.stats)
            .unwrap_or_default();

        Ok(ProgressState {
            plan_id: plan.id,
            evaluated_on: today,
            duration_type: plan.duration_type,
            weeks,
            summary,
            current_week,
            habit,
            lifestyle,
            milestones,
            current_week_state,
            stale_state,
        })
    }

    /// Date range entries must be fetched for to evaluate `plan` at `now`.
    ///
    /// Returns `None` when the plan has not started yet.
    pub fn entry_window(&self, plan: &Plan, now: Timestamp) -> Option<(Date, Date)> {
        let lifetime =
            weeks::Lifetime::new(self.date_of(plan.created_at), self.date_of(now), plan.finishing_date);
        (!lifetime.is_empty()).then_some((lifetime.start, lifetime.end))
    }
}

impl Default for ProgressEvaluator {
    fn default() -> Self {
        Self::utc()
    }
}

/// Computes the progress snapshot of `plan` as of `now`, reading dates in
/// UTC. See [`ProgressEvaluator::evaluate`].
pub fn compute_progress(
    plan: &Plan,
    entries: &[ActivityEntry],
    now: Timestamp,
) -> std::result::Result<ProgressState, ProgressError> {
    ProgressEvaluator::utc().evaluate(plan, entries, now)
}

/// Target window in weeks for habit and lifestyle achievement.
fn target_weeks(plan: &Plan, start: Date) -> u32 {
    if let Some(target) = plan.target_weeks {
        return target;
    }
    match plan.finishing_date {
        Some(finish) => {
            let weeks = start.series(7.days()).take_while(|d| *d <= finish).count() as u32;
            weeks.max(1)
        }
        None => DEFAULT_TARGET_WEEKS,
    }
}

/// Data access the evaluator needs, implemented by the SQLite store and by
/// in-memory fixtures.
pub trait ProgressSource {
    /// Returns a plan with its activities, milestones and sessions.
    fn fetch_plan(&self, plan_id: u64) -> Result<Option<Plan>>;

    /// Returns the entries matching the filter, ordered by date.
    fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<ActivityEntry>>;
}

/// Loads a plan and its entries from `source` and evaluates it at `now`.
///
/// # Errors
///
/// Returns `TrackerError::PlanNotFound` when the plan does not exist or is
/// deleted, any error of the source, and `TrackerError::Progress` when the
/// evaluator rejects the plan.
pub fn evaluate_plan<S>(
    source: &S,
    evaluator: &ProgressEvaluator,
    plan_id: u64,
    now: Timestamp,
) -> Result<ProgressState>
where
    S: ProgressSource + ?Sized,
{
    let plan = source
        .fetch_plan(plan_id)?
        .filter(|plan| !plan.is_deleted())
        .ok_or(TrackerError::PlanNotFound { id: plan_id })?;

    let entries = match evaluator.entry_window(&plan, now) {
        Some((from, to)) => {
            source.fetch_entries(&EntryFilter::for_activities(plan.activity_ids()).between(from, to))?
        }
        None => Vec::new(),
    };
    debug!("plan {plan_id}: evaluating with {} entries", entries.len());

    Ok(evaluator.evaluate(&plan, &entries, now)?)
}
