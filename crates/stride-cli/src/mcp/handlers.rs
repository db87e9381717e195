//! MCP tool handlers implementation

use std::sync::Arc;

use jiff::{civil::Date, Timestamp, Zoned};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use stride_core::{
    display::CreateResult,
    params::{self as core, ShowProgress},
    Tracker,
};

use super::errors::{invalid_field, to_mcp_error};

/// Generic MCP wrapper for core parameter types.
///
/// `#[serde(transparent)]` passes deserialization straight through to the
/// wrapped type while the wrapper adds the schema the protocol needs.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type ListPlans = McpParams<core::ListPlans>;

/// Request for evaluating a plan's progress.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShowProgressRequest {
    /// ID of the plan
    pub id: u64,
    /// Evaluation day (YYYY-MM-DD) or RFC 3339 instant; now when omitted
    #[serde(default)]
    pub at: Option<String>,
    /// Return the progress as JSON instead of markdown
    #[serde(default)]
    pub json: bool,
}

/// Request for recording an activity entry.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogEntryRequest {
    /// ID of the activity, e.g. `run`
    pub activity_id: String,
    /// Quantity performed, in the activity's unit
    pub quantity: u32,
    /// Day the activity was performed (YYYY-MM-DD); today when omitted
    #[serde(default)]
    pub date: Option<String>,
}

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Arc<Tracker>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let inner = params.as_ref();
        let summaries = self
            .tracker
            .list_plans_summary(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = if inner.include_deleted {
            "All Plans"
        } else {
            "Plans"
        };
        Ok(CallToolResult::success(vec![Content::text(format!(
            "# {title}\n\n{summaries}"
        ))]))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .tracker
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;

        let text = match plan {
            Some(plan) => plan.to_string(),
            None => format!("Plan with ID {} not found", params.as_ref().id),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub async fn show_progress(
        &self,
        Parameters(request): Parameters<ShowProgressRequest>,
    ) -> McpResult {
        debug!("show_progress: {request:?}");

        let at = request
            .at
            .as_deref()
            .map(|s| self.parse_instant(s))
            .transpose()?;
        let progress = self
            .tracker
            .plan_progress(&ShowProgress { id: request.id, at })
            .await
            .map_err(|e| to_mcp_error("Failed to evaluate progress", &e))?;

        let text = if request.json {
            serde_json::to_string_pretty(&progress)
                .map_err(|e| ErrorData::internal_error(e.to_string(), None))?
        } else {
            progress.to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub async fn log_entry(&self, Parameters(request): Parameters<LogEntryRequest>) -> McpResult {
        debug!("log_entry: {request:?}");

        let date = match request.date.as_deref() {
            Some(s) => s
                .parse::<Date>()
                .map_err(|e| invalid_field("date", e))?,
            None => Zoned::now().date(),
        };
        let entry = self
            .tracker
            .log_entry(&core::LogEntry {
                activity_id: request.activity_id,
                quantity: request.quantity,
                date,
            })
            .await
            .map_err(|e| to_mcp_error("Failed to log entry", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            CreateResult::new(entry).to_string(),
        )]))
    }

    /// Accepts an RFC 3339 instant or a civil date, read as midday in the
    /// tracker's time zone.
    fn parse_instant(&self, s: &str) -> Result<Timestamp, ErrorData> {
        if let Ok(ts) = s.parse::<Timestamp>() {
            return Ok(ts);
        }
        let date = s.parse::<Date>().map_err(|e| invalid_field("at", e))?;
        date.at(12, 0, 0, 0)
            .to_zoned(self.tracker.evaluator().time_zone().clone())
            .map(|zoned| zoned.timestamp())
            .map_err(|e| invalid_field("at", e))
    }
}
