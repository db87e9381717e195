//! Stride CLI Application
//!
//! Command-line interface and MCP server for the Stride habit tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, StrideMcpServer};
use renderer::TerminalRenderer;
use stride_core::{params::ListPlans, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Stride started");

    match command {
        Some(Plan { command }) => {
            Cli::new(tracker, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Activity { command }) => {
            Cli::new(tracker, renderer)
                .handle_activity_command(command)
                .await
        }
        Some(Milestone { command }) => {
            Cli::new(tracker, renderer)
                .handle_milestone_command(command)
                .await
        }
        Some(Session { command }) => {
            Cli::new(tracker, renderer)
                .handle_session_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Stride MCP server");
            run_stdio_server(StrideMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(tracker, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
