//! Activity entry operations and queries.

use jiff::Timestamp;
use rusqlite::params;

use super::utils::{date_column, id_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{ActivityEntry, EntryFilter},
    params::LogEntry,
};

const INSERT_ENTRY_SQL: &str =
    "INSERT INTO activity_entries (activity_id, quantity, date, created_at) VALUES (?1, ?2, ?3, ?4)";
const DELETE_ENTRY_SQL: &str = "DELETE FROM activity_entries WHERE id = ?1";
const ENTRY_COLUMNS: &str = "id, activity_id, quantity, date, created_at";

impl super::Database {
    /// Records a quantity of an activity on a civil date.
    pub fn log_entry(&mut self, params: &LogEntry) -> Result<ActivityEntry> {
        if params.quantity == 0 {
            return Err(TrackerError::invalid_input("quantity")
                .with_reason("quantity must be greater than zero"));
        }
        if !self.activity_exists(&params.activity_id)? {
            return Err(TrackerError::ActivityNotFound {
                id: params.activity_id.clone(),
            });
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_ENTRY_SQL,
                params![
                    params.activity_id,
                    i64::from(params.quantity),
                    params.date.to_string(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert entry")?;

        Ok(ActivityEntry {
            id: self.connection.last_insert_rowid() as u64,
            activity_id: params.activity_id.clone(),
            quantity: params.quantity,
            date: params.date,
            created_at: now,
        })
    }

    /// Lists entries matching the filter, ordered by date and then by ID.
    pub fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<ActivityEntry>> {
        if filter.activity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; filter.activity_ids.len()].join(", ");
        let mut query = format!(
            "SELECT {ENTRY_COLUMNS} FROM activity_entries WHERE activity_id IN ({placeholders})"
        );
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = filter
            .activity_ids
            .iter()
            .map(|id| Box::new(id.clone()) as Box<dyn rusqlite::ToSql>)
            .collect();

        // ISO dates compare lexically in chronological order
        if let Some(from) = filter.from {
            query.push_str(" AND date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }
        if let Some(to) = filter.to {
            query.push_str(" AND date <= ?");
            params_vec.push(Box::new(to.to_string()));
        }
        query.push_str(" ORDER BY date, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let entries = stmt
            .query_map(&params_refs[..], |row| {
                Ok(ActivityEntry {
                    id: id_column(row, 0)?,
                    activity_id: row.get(1)?,
                    quantity: row.get::<_, i64>(2)? as u32,
                    date: date_column(row, 3)?,
                    created_at: timestamp_column(row, 4)?,
                })
            })
            .db_context("Failed to query entries")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect entries")?;

        Ok(entries)
    }

    /// Removes an entry. Returns false when no entry has the given ID.
    pub fn delete_entry(&mut self, id: u64) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_ENTRY_SQL, params![id as i64])
            .db_context("Failed to delete entry")?;
        Ok(rows > 0)
    }
}
