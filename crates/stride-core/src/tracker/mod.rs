//! High-level tracker API for plans, activities and progress.
//!
//! [`Tracker`] is the entry point used by the CLI and the MCP server. It owns
//! no connection: every operation opens the database inside
//! [`tokio::task::spawn_blocking`], runs its queries there and hands the
//! result back to the async caller.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │    Tracker      │    │    Database     │
//! │  (interfaces)   │───▶│ (async facade)  │───▶│   (via db/)     │
//! └─────────────────┘    └────────┬────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                        ProgressEvaluator
//!                        (pure, clock injected)
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Tracker`] instances
//! - [`plan_ops`]: Plan lifecycle, milestones and sessions
//! - [`activity_ops`]: Activity catalogue and entries
//! - [`progress_ops`]: Progress evaluation and state refresh
//!
//! # Examples
//!
//! ```rust,no_run
//! use stride_core::{params::CreatePlan, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/stride.db"))
//!     .build()
//!     .await?;
//!
//! let plan = tracker
//!     .create_plan(&CreatePlan {
//!         goal: "Run three times a week".to_string(),
//!         times_per_week: Some(3),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrackerError},
    progress::ProgressEvaluator,
};

pub mod activity_ops;
pub mod builder;
pub mod plan_ops;
pub mod progress_ops;


pub use builder::TrackerBuilder;

/// Main tracker interface.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) evaluator: ProgressEvaluator,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, evaluator: ProgressEvaluator) -> Self {
        Self { db_path, evaluator }
    }

    /// Path of the SQLite database backing this tracker.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    pub fn evaluator(&self) -> &ProgressEvaluator {
        &self.evaluator
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| TrackerError::join(&e))?
    }
}
