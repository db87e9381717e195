//! Database operations and SQLite management for plans and activity.
//!
//! This module provides the low-level data access of the Stride tracker. It
//! owns the SQLite connection, the schema, and the query interfaces for
//! plans, activities, milestones, sessions and entries. It also implements
//! [`ProgressSource`] so the evaluator can be fed straight from the store.

use std::path::Path;

use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{ActivityEntry, EntryFilter, Plan},
    progress::ProgressSource,
};

pub mod activity_queries;
pub mod entry_queries;
pub mod migrations;
pub mod plan_queries;
pub mod schedule_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

impl ProgressSource for Database {
    fn fetch_plan(&self, plan_id: u64) -> Result<Option<Plan>> {
        self.get_plan(plan_id)
    }

    fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<ActivityEntry>> {
        self.list_entries(filter)
    }
}
