//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers so the same data
//! can be formatted differently depending on context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │ (Plan, Entry,   │───▶│ (PlanSummaries, │───▶│    Markdown     │
//! │  ProgressState) │    │  CreateResult)  │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All output is markdown so the CLI can render it with termimad and the MCP
//! server can hand it to clients verbatim.
//!
//! # Examples
//!
//! ```rust
//! use stride_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Logged 5 km of run".to_string());
//! assert_eq!(status.to_string(), "Success: Logged 5 km of run\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Activities, Entries, PlanSummaries};
pub use datetime::LocalDateTime;
pub use results::CreateResult;
pub use status::OperationStatus;
