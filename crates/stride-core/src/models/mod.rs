//! Data models for plans, activities and derived progress.
//!
//! This module contains the domain models of the Stride tracker. Display
//! implementations for these models live in [`crate::display::models`] so
//! that data structures and presentation stay separate.
//!
//! The models fall into two groups:
//!
//! 1. **Stored models**: [`Plan`], [`Activity`], [`ActivityEntry`],
//!    [`PlanMilestone`] and [`Session`] mirror rows of the SQLite store.
//! 2. **Derived models**: [`Week`], [`ProgressState`] and friends are produced
//!    by [`crate::progress`] and are never a source of truth.
//!
//! # Examples
//!
//! ```rust
//! use stride_core::models::{Criteria, CriteriaItem, Junction};
//!
//! let criteria = Criteria::all(vec![
//!     CriteriaItem::new("run", 3),
//!     CriteriaItem::new("stretch", 1),
//! ]);
//! assert_eq!(criteria.junction, Junction::And);
//! assert!(criteria.validate().is_ok());
//! ```

pub mod activity;
pub mod filters;
pub mod milestone;
pub mod plan;
pub mod progress;
pub mod session;
pub mod status;
pub mod summary;


pub use activity::{Activity, ActivityEntry};
pub use filters::{EntryFilter, PlanFilter};
pub use milestone::{Criteria, CriteriaItem, PlanMilestone};
pub use plan::Plan;
pub use progress::{
    Achievement, AchievementSummary, CriteriaItemProgress, MilestoneProgress, ProgressState,
    Week, WeekStats,
};
pub use session::Session;
pub use status::{DurationType, Junction, OutlineType, PlanState};
pub use summary::PlanSummary;
