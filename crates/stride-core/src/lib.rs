//! Core library of the Stride habit tracker.
//!
//! Stride tracks plans (goals with a weekly schedule), the activities they
//! are built from, and the entries a user records against those activities.
//! Progress is never stored: [`progress::compute_progress`] derives weeks,
//! streaks, achievements, milestone outcomes and the plan state from the raw
//! history every time it is asked.
//!
//! # Layers
//!
//! - [`models`]: plain data types, stored and derived
//! - [`progress`]: the pure progress evaluator and its data-access seam
//! - [`db`]: SQLite persistence
//! - [`tracker`]: async facade used by the interfaces
//! - [`display`]: markdown formatting for terminal and MCP output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stride_core::{
//!     params::{AttachActivity, CreateActivity, CreatePlan, LogEntry, ShowProgress},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("stride.db"))
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
//! tracker
//!     .create_activity(&CreateActivity {
//!         id: "run".to_string(),
//!         title: "Running".to_string(),
//!         measure: "km".to_string(),
//!     })
//!     .await?;
//! tracker
//!     .attach_activity(&AttachActivity {
//!         plan_id: plan.id,
//!         activity_id: "run".to_string(),
//!     })
//!     .await?;
//! tracker
//!     .log_entry(&LogEntry {
//!         activity_id: "run".to_string(),
//!         quantity: 5,
//!         date: jiff::Zoned::now().date(),
//!     })
//!     .await?;
//!
//! let progress = tracker
//!     .plan_progress(&ShowProgress { id: plan.id, at: None })
//!     .await?;
//! println!("{progress}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod progress;
pub mod tracker;

pub use db::Database;
pub use display::{Activities, CreateResult, Entries, LocalDateTime, OperationStatus, PlanSummaries};
pub use error::{ProgressError, Result, TrackerError};
pub use models::{
    Activity, ActivityEntry, Criteria, CriteriaItem, DurationType, Junction, OutlineType, Plan,
    PlanFilter, PlanMilestone, PlanState, PlanSummary, ProgressState, Session,
};
pub use progress::{compute_progress, evaluate_plan, ProgressEvaluator, ProgressSource};
pub use tracker::{Tracker, TrackerBuilder};
