//! MCP server implementation for Stride
//!
//! Exposes plan listing, plan details, progress evaluation and entry logging
//! to AI assistants over the Model Context Protocol.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use stride_core::Tracker;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{Id, ListPlans, LogEntryRequest, McpResult, ShowProgressRequest};

/// MCP server for Stride
#[derive(Clone)]
pub struct StrideMcpServer {
    tracker: Arc<Tracker>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StrideMcpServer {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(tracker),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "list_plans",
        description = "List goal plans with their state, duration, outline and activity count, newest first. Set include_deleted=true to also see soft-deleted plans."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show one plan by ID with its activities, milestones and scheduled sessions."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "show_progress",
        description = "Evaluate a plan's progress: habit and lifestyle streaks, the current week, per-week completion and milestone achievement. Optionally pass `at` (YYYY-MM-DD or an RFC 3339 instant) to evaluate at another moment, and json=true for machine-readable output."
    )]
    async fn show_progress(&self, params: Parameters<ShowProgressRequest>) -> McpResult {
        self.handlers().show_progress(params).await
    }

    #[tool(
        name = "log_entry",
        description = "Record that an activity was performed: activity_id, a positive quantity in the activity's unit, and an optional date (YYYY-MM-DD, defaults to today)."
    )]
    async fn log_entry(&self, params: Parameters<LogEntryRequest>) -> McpResult {
        self.handlers().log_entry(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StrideMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stride".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(r#"Stride tracks goal plans built from measurable activities and reports how consistently they are followed.

## Core Concepts
- **Activities**: things you do, measured in a unit (`run` in km, `stretch` in minutes)
- **Entries**: a dated quantity of one activity
- **Plans**: a goal with a duration (until a date, a number of weeks, or lifetime) and an outline:
  - TIMES_PER_WEEK: reach a weekly target of active days
  - SPECIFIC: follow scheduled sessions
  - CUSTOM: reach milestones defined by activity totals
- **Streaks**: the habit streak counts consecutive completed weeks, the lifestyle streak never decreases

## Workflow
1. Use `list_plans` to find a plan ID
2. Use `show_plan` to see its activities and schedule
3. Record work with `log_entry`
4. Check standing with `show_progress`"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StrideMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Stride MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
