//! Error types for the tracker library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the progress evaluator.
///
/// Both variants describe input the evaluator refuses to interpret. Callers
/// must reject the request (or show a neutral empty state); the evaluator
/// never guesses its way past them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// Malformed plan configuration (date ordering, missing weekly target).
    #[error("Invalid plan {plan_id}: {reason}")]
    InvalidPlan { plan_id: u64, reason: String },
    /// A milestone criterion names an activity outside the plan's activity set.
    #[error("Milestone {milestone_id} references activity '{activity_id}' which is not part of the plan")]
    InvalidMilestone {
        milestone_id: u64,
        activity_id: String,
    },
}

impl ProgressError {
    pub(crate) fn invalid_plan(plan_id: u64, reason: impl Into<String>) -> Self {
        Self::InvalidPlan {
            plan_id,
            reason: reason.into(),
        }
    }
}

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Activity not found for the given ID
    #[error("Activity '{id}' not found")]
    ActivityNotFound { id: String },
    /// Activity entry not found for the given ID
    #[error("Entry with ID {id} not found")]
    EntryNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Progress evaluation rejected the plan or its milestones
    #[error(transparent)]
    Progress(#[from] ProgressError),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrackerError {
        TrackerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrackerError {
    /// Creates a database error with the given context message.
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a blocking task join failure.
    pub(crate) fn join(error: &tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database(message, e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
