//! Activity catalogue operations and plan activity sets.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::timestamp_column;
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::Activity,
    params::{AttachActivity, CreateActivity},
};

const CHECK_ACTIVITY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM activities WHERE id = ?1)";
const INSERT_ACTIVITY_SQL: &str =
    "INSERT INTO activities (id, title, measure, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ACTIVITY_SQL: &str =
    "SELECT id, title, measure, created_at FROM activities WHERE id = ?1";
const SELECT_ACTIVITIES_SQL: &str =
    "SELECT id, title, measure, created_at FROM activities ORDER BY id";
const GET_NEXT_ACTIVITY_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM plan_activities WHERE plan_id = ?1";
const ATTACH_ACTIVITY_SQL: &str =
    "INSERT OR IGNORE INTO plan_activities (plan_id, activity_id, position) VALUES (?1, ?2, ?3)";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";
const SELECT_PLAN_ACTIVITIES_SQL: &str = "SELECT a.id, a.title, a.measure, a.created_at FROM plan_activities pa JOIN activities a ON a.id = pa.activity_id WHERE pa.plan_id = ?1 ORDER BY pa.position";
const CHECK_PLAN_ACTIVITY_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM plan_activities WHERE plan_id = ?1 AND activity_id = ?2)";

/// Activity IDs are short slugs: lowercase letters, digits, `-` and `_`.
fn validate_activity_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(TrackerError::invalid_input("id").with_reason("activity ID cannot be empty"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(TrackerError::invalid_input("id").with_reason(format!(
            "activity ID '{id}' may only contain lowercase letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

impl super::Database {
    fn build_activity_from_row(row: &rusqlite::Row) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get(0)?,
            title: row.get(1)?,
            measure: row.get(2)?,
            created_at: timestamp_column(row, 3)?,
        })
    }

    /// Adds an activity to the catalogue.
    pub fn create_activity(&mut self, params: &CreateActivity) -> Result<Activity> {
        let id = params.id.trim();
        validate_activity_id(id)?;
        if params.title.trim().is_empty() {
            return Err(
                TrackerError::invalid_input("title").with_reason("activity title cannot be empty")
            );
        }
        if params.measure.trim().is_empty() {
            return Err(TrackerError::invalid_input("measure")
                .with_reason("unit of measure cannot be empty"));
        }
        if self.activity_exists(id)? {
            return Err(TrackerError::invalid_input("id")
                .with_reason(format!("activity '{id}' already exists")));
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_ACTIVITY_SQL,
                params![
                    id,
                    params.title.trim(),
                    params.measure.trim(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert activity")?;

        Ok(Activity {
            id: id.to_string(),
            title: params.title.trim().to_string(),
            measure: params.measure.trim().to_string(),
            created_at: now,
        })
    }

    /// Retrieves an activity by its ID.
    pub fn get_activity(&self, id: &str) -> Result<Option<Activity>> {
        self.connection
            .query_row(SELECT_ACTIVITY_SQL, params![id], Self::build_activity_from_row)
            .optional()
            .db_context("Failed to query activity")
    }

    /// Lists the activity catalogue ordered by ID.
    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVITIES_SQL)
            .db_context("Failed to prepare query")?;

        let activities = stmt
            .query_map([], Self::build_activity_from_row)
            .db_context("Failed to query activities")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect activities")?;

        Ok(activities)
    }

    /// Adds an activity to a live plan's activity set.
    ///
    /// Returns false when the activity was already part of the plan.
    pub fn attach_activity(&mut self, params: &AttachActivity) -> Result<bool> {
        self.ensure_live_plan(params.plan_id)?;
        if !self.activity_exists(&params.activity_id)? {
            return Err(TrackerError::ActivityNotFound {
                id: params.activity_id.clone(),
            });
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let position: i64 = tx
            .query_row(
                GET_NEXT_ACTIVITY_POSITION_SQL,
                params![params.plan_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to get next activity position")?;

        let inserted = tx
            .execute(
                ATTACH_ACTIVITY_SQL,
                params![params.plan_id as i64, params.activity_id, position],
            )
            .db_context("Failed to attach activity")?;

        if inserted > 0 {
            tx.execute(
                UPDATE_PLAN_TIMESTAMP_SQL,
                params![Timestamp::now().to_string(), params.plan_id as i64],
            )
            .db_context("Failed to update plan timestamp")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(inserted > 0)
    }

    /// Activity set of a plan in attachment order.
    pub fn get_plan_activities(&self, plan_id: u64) -> Result<Vec<Activity>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_ACTIVITIES_SQL)
            .db_context("Failed to prepare query")?;

        let activities = stmt
            .query_map(params![plan_id as i64], Self::build_activity_from_row)
            .db_context("Failed to query plan activities")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect plan activities")?;

        Ok(activities)
    }

    pub(crate) fn activity_exists(&self, id: &str) -> Result<bool> {
        self.connection
            .query_row(CHECK_ACTIVITY_EXISTS_SQL, params![id], |row| row.get(0))
            .db_context("Failed to check activity existence")
    }

    pub(crate) fn plan_has_activity(&self, plan_id: u64, activity_id: &str) -> Result<bool> {
        self.connection
            .query_row(
                CHECK_PLAN_ACTIVITY_SQL,
                params![plan_id as i64, activity_id],
                |row| row.get(0),
            )
            .db_context("Failed to check plan activity")
    }
}
