//! Milestone and session operations.

use jiff::Timestamp;
use rusqlite::params;

use super::utils::{criteria_column, date_column, id_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{OutlineType, PlanMilestone, Session},
    params::{AddMilestone, AddSession},
};

const GET_NEXT_MILESTONE_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM plan_milestones WHERE plan_id = ?1";
const INSERT_MILESTONE_SQL: &str =
    "INSERT INTO plan_milestones (plan_id, title, criteria, position) VALUES (?1, ?2, ?3, ?4)";
const SELECT_MILESTONES_SQL: &str = "SELECT id, plan_id, title, criteria, position FROM plan_milestones WHERE plan_id = ?1 ORDER BY position";
const SELECT_OUTLINE_TYPE_SQL: &str = "SELECT outline_type FROM plans WHERE id = ?1";
const INSERT_SESSION_SQL: &str = "INSERT INTO plan_sessions (plan_id, activity_id, date, quantity, description) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_SESSIONS_SQL: &str = "SELECT id, plan_id, activity_id, date, quantity, description FROM plan_sessions WHERE plan_id = ?1 ORDER BY date, id";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Appends a milestone to a live plan.
    ///
    /// Criteria are validated structurally and every item must name an
    /// activity of the plan's activity set.
    pub fn add_milestone(&mut self, params: &AddMilestone) -> Result<PlanMilestone> {
        self.ensure_live_plan(params.plan_id)?;
        if params.title.trim().is_empty() {
            return Err(TrackerError::invalid_input("title")
                .with_reason("milestone title cannot be empty"));
        }

        let criteria_json = match params.criteria {
            Some(ref criteria) => {
                criteria.validate()?;
                for item in &criteria.items {
                    if !self.plan_has_activity(params.plan_id, &item.activity_id)? {
                        return Err(TrackerError::invalid_input("criteria").with_reason(format!(
                            "activity '{}' is not part of plan {}",
                            item.activity_id, params.plan_id
                        )));
                    }
                }
                Some(serde_json::to_string(criteria)?)
            }
            None => None,
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let position: i64 = tx
            .query_row(
                GET_NEXT_MILESTONE_POSITION_SQL,
                params![params.plan_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to get next milestone position")?;

        tx.execute(
            INSERT_MILESTONE_SQL,
            params![
                params.plan_id as i64,
                params.title.trim(),
                criteria_json,
                position
            ],
        )
        .db_context("Failed to insert milestone")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), params.plan_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PlanMilestone {
            id,
            plan_id: params.plan_id,
            title: params.title.trim().to_string(),
            criteria: params.criteria.clone(),
            position: position as u32,
        })
    }

    /// Milestones of a plan in the order they were added.
    pub fn get_milestones(&self, plan_id: u64) -> Result<Vec<PlanMilestone>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_MILESTONES_SQL)
            .db_context("Failed to prepare query")?;

        let milestones = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok(PlanMilestone {
                    id: id_column(row, 0)?,
                    plan_id: id_column(row, 1)?,
                    title: row.get(2)?,
                    criteria: criteria_column(row, 3)?,
                    position: row.get::<_, i64>(4)? as u32,
                })
            })
            .db_context("Failed to query milestones")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect milestones")?;

        Ok(milestones)
    }

    /// Plans a session on a live `SPECIFIC` plan.
    pub fn add_session(&mut self, params: &AddSession) -> Result<Session> {
        self.ensure_live_plan(params.plan_id)?;

        let outline: String = self
            .connection
            .query_row(
                SELECT_OUTLINE_TYPE_SQL,
                params![params.plan_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to read plan outline")?;
        if outline != OutlineType::Specific.as_str() {
            return Err(TrackerError::invalid_input("plan_id").with_reason(format!(
                "plan {} is not a SPECIFIC plan; sessions only apply to SPECIFIC outlines",
                params.plan_id
            )));
        }

        if params.quantity == 0 {
            return Err(TrackerError::invalid_input("quantity")
                .with_reason("session quantity must be greater than zero"));
        }
        if !self.plan_has_activity(params.plan_id, &params.activity_id)? {
            return Err(TrackerError::invalid_input("activity_id").with_reason(format!(
                "activity '{}' is not part of plan {}",
                params.activity_id, params.plan_id
            )));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_SESSION_SQL,
            params![
                params.plan_id as i64,
                params.activity_id,
                params.date.to_string(),
                i64::from(params.quantity),
                params.description.as_deref()
            ],
        )
        .db_context("Failed to insert session")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), params.plan_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Session {
            id,
            plan_id: params.plan_id,
            activity_id: params.activity_id.clone(),
            date: params.date,
            quantity: params.quantity,
            description: params.description.clone(),
        })
    }

    /// Sessions of a plan ordered by date.
    pub fn get_sessions(&self, plan_id: u64) -> Result<Vec<Session>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SESSIONS_SQL)
            .db_context("Failed to prepare query")?;

        let sessions = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok(Session {
                    id: id_column(row, 0)?,
                    plan_id: id_column(row, 1)?,
                    activity_id: row.get(2)?,
                    date: date_column(row, 3)?,
                    quantity: row.get::<_, i64>(4)? as u32,
                    description: row.get(5)?,
                })
            })
            .db_context("Failed to query sessions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect sessions")?;

        Ok(sessions)
    }
}
