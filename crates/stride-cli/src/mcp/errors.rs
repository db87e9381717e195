//! Error handling utilities for MCP server

use rmcp::ErrorData;
use stride_core::TrackerError;

/// Converts a tracker error into an MCP error, keeping caller mistakes
/// apart from server faults.
pub fn to_mcp_error(message: &str, error: &TrackerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        TrackerError::PlanNotFound { .. }
        | TrackerError::ActivityNotFound { .. }
        | TrackerError::EntryNotFound { .. } => ErrorData::resource_not_found(text, None),
        TrackerError::InvalidInput { .. } | TrackerError::Progress(_) => {
            ErrorData::invalid_params(text, None)
        }
        _ => ErrorData::internal_error(text, None),
    }
}

/// Error for request fields the MCP layer parses itself.
pub fn invalid_field(field: &str, reason: impl std::fmt::Display) -> ErrorData {
    ErrorData::invalid_params(format!("Invalid input for field '{field}': {reason}"), None)
}
