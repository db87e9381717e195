//! Plan CRUD operations and queries.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use rusqlite::{params, OptionalExtension};

use super::utils::{
    enum_column, id_column, optional_count_column, optional_date_column,
    optional_timestamp_column, timestamp_column,
};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{OutlineType, Plan, PlanFilter, PlanState, PlanSummary},
    params::CreatePlan,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (goal, description, duration_type, outline_type, state, times_per_week, target_weeks, finishing_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_PLAN_SQL: &str = "SELECT id, goal, description, duration_type, outline_type, state, times_per_week, target_weeks, finishing_date, created_at, updated_at, deleted_at FROM plans WHERE id = ?1";
const CHECK_LIVE_PLAN_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1 AND deleted_at IS NULL)";
const SOFT_DELETE_PLAN_SQL: &str =
    "UPDATE plans SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";
const RESTORE_PLAN_SQL: &str =
    "UPDATE plans SET deleted_at = NULL, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NOT NULL";
const UPDATE_PLAN_STATE_SQL: &str = "UPDATE plans SET state = ?1 WHERE id = ?2";

const PLAN_SUMMARY_COLUMNS: &str = "id, goal, duration_type, outline_type, state, finishing_date, created_at, deleted_at, activity_count, milestone_count";

impl super::Database {
    /// Checks plan settings that can be judged before the plan exists.
    ///
    /// `today` is the plan's start date in the zone it will be evaluated in.
    fn validate_new_plan(params: &CreatePlan, today: Date) -> Result<()> {
        if params.goal.trim().is_empty() {
            return Err(TrackerError::invalid_input("goal").with_reason("goal cannot be empty"));
        }

        if params.outline_type == OutlineType::TimesPerWeek {
            match params.times_per_week {
                Some(1..=7) => {}
                Some(n) => {
                    return Err(TrackerError::invalid_input("times_per_week")
                        .with_reason(format!("weekly target must be between 1 and 7, got {n}")));
                }
                None => {
                    return Err(TrackerError::invalid_input("times_per_week")
                        .with_reason("TIMES_PER_WEEK plans need a weekly target"));
                }
            }
        }

        if params.target_weeks == Some(0) {
            return Err(TrackerError::invalid_input("target_weeks")
                .with_reason("target window must be at least one week"));
        }

        if let Some(finishing_date) = params.finishing_date {
            if finishing_date < today {
                return Err(TrackerError::invalid_input("finishing_date").with_reason(format!(
                    "finishing date {finishing_date} is before the creation date {today}"
                )));
            }
        }

        Ok(())
    }

    /// Creates a new plan whose dates are read in UTC. The plan starts
    /// without activities, milestones or sessions.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<Plan> {
        self.create_plan_in(params, &TimeZone::UTC)
    }

    /// Creates a new plan, checking its finishing date against the creation
    /// date in `time_zone`.
    pub fn create_plan_in(&mut self, params: &CreatePlan, time_zone: &TimeZone) -> Result<Plan> {
        let now = Timestamp::now();
        Self::validate_new_plan(params, now.to_zoned(time_zone.clone()).date())?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = now.to_string();
        tx.execute(
            INSERT_PLAN_SQL,
            params![
                params.goal.trim(),
                params.description.as_deref(),
                params.duration_type.as_str(),
                params.outline_type.as_str(),
                PlanState::OnTrack.as_str(),
                params.times_per_week.map(i64::from),
                params.target_weeks.map(i64::from),
                params.finishing_date.map(|d| d.to_string()),
                &now_str,
                &now_str,
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            goal: params.goal.trim().to_string(),
            description: params.description.clone(),
            duration_type: params.duration_type,
            outline_type: params.outline_type,
            state: PlanState::OnTrack,
            times_per_week: params.times_per_week,
            target_weeks: params.target_weeks,
            finishing_date: params.finishing_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            activities: Vec::new(),
            milestones: Vec::new(),
            sessions: Vec::new(),
        })
    }

    /// Retrieves a plan by its ID, deleted or not, with its activities,
    /// milestones and sessions loaded.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        let mut plan = stmt
            .query_row(params![id as i64], |row| {
                Ok(Plan {
                    id: id_column(row, 0)?,
                    goal: row.get(1)?,
                    description: row.get(2)?,
                    duration_type: enum_column(row, 3)?,
                    outline_type: enum_column(row, 4)?,
                    state: enum_column(row, 5)?,
                    times_per_week: optional_count_column(row, 6)?,
                    target_weeks: optional_count_column(row, 7)?,
                    finishing_date: optional_date_column(row, 8)?,
                    created_at: timestamp_column(row, 9)?,
                    updated_at: timestamp_column(row, 10)?,
                    deleted_at: optional_timestamp_column(row, 11)?,
                    activities: Vec::new(),
                    milestones: Vec::new(),
                    sessions: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query plan")?;

        // Eagerly load everything the evaluator needs
        if let Some(ref mut plan) = plan {
            plan.activities = self.get_plan_activities(plan.id)?;
            plan.milestones = self.get_milestones(plan.id)?;
            plan.sessions = self.get_sessions(plan.id)?;
        }

        Ok(plan)
    }

    /// Lists plan summaries, newest first. Deleted plans are hidden unless
    /// the filter asks for them.
    pub fn list_plans(&self, filter: Option<&PlanFilter>) -> Result<Vec<PlanSummary>> {
        let mut query = format!("SELECT {PLAN_SUMMARY_COLUMNS} FROM plan_summaries");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if !filter.is_some_and(|f| f.include_deleted) {
            conditions.push("deleted_at IS NULL");
        }

        if let Some(f) = filter {
            if let Some(ref goal) = f.goal_contains {
                conditions.push("goal LIKE ?");
                params_vec.push(Box::new(format!("%{goal}%")));
            }

            if let Some(duration_type) = f.duration_type {
                conditions.push("duration_type = ?");
                params_vec.push(Box::new(duration_type.as_str()));
            }

            if let Some(state) = f.state {
                conditions.push("state = ?");
                params_vec.push(Box::new(state.as_str()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                Ok(PlanSummary {
                    id: id_column(row, 0)?,
                    goal: row.get(1)?,
                    duration_type: enum_column(row, 2)?,
                    outline_type: enum_column(row, 3)?,
                    state: enum_column(row, 4)?,
                    finishing_date: optional_date_column(row, 5)?,
                    created_at: timestamp_column(row, 6)?,
                    deleted_at: optional_timestamp_column(row, 7)?,
                    activity_count: row.get::<_, i64>(8)? as u32,
                    milestone_count: row.get::<_, i64>(9)? as u32,
                })
            })
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect plans")?;

        Ok(summaries)
    }

    /// Soft-deletes a plan by setting its tombstone. Returns false when the
    /// plan does not exist or is already deleted.
    pub fn delete_plan(&mut self, id: u64) -> Result<bool> {
        let now = Timestamp::now().to_string();
        let rows = self
            .connection
            .execute(SOFT_DELETE_PLAN_SQL, params![now, id as i64])
            .db_context("Failed to delete plan")?;
        Ok(rows > 0)
    }

    /// Clears a plan's tombstone. Returns false when the plan does not exist
    /// or is not deleted.
    pub fn restore_plan(&mut self, id: u64) -> Result<bool> {
        let now = Timestamp::now().to_string();
        let rows = self
            .connection
            .execute(RESTORE_PLAN_SQL, params![now, id as i64])
            .db_context("Failed to restore plan")?;
        Ok(rows > 0)
    }

    /// Overwrites the cached plan state with a freshly derived one.
    ///
    /// `updated_at` is left alone: a cache refresh is not an edit.
    pub fn update_plan_state(&self, id: u64, state: PlanState) -> Result<()> {
        let rows = self
            .connection
            .execute(UPDATE_PLAN_STATE_SQL, params![state.as_str(), id as i64])
            .db_context("Failed to update plan state")?;
        if rows == 0 {
            return Err(TrackerError::PlanNotFound { id });
        }
        Ok(())
    }

    /// Fails with `PlanNotFound` unless the plan exists and is not deleted.
    pub(crate) fn ensure_live_plan(&self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_LIVE_PLAN_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;
        if exists {
            Ok(())
        } else {
            Err(TrackerError::PlanNotFound { id })
        }
    }
}
