//! Command handlers for the terminal interface.
//!
//! [`Cli`] turns parsed arguments into tracker calls and renders the result.
//! Everything except `plan progress --json` goes through the markdown
//! renderer.

use anyhow::{Context, Result};
use jiff::{civil::Date, Timestamp};
use stride_core::{
    display::{Activities, CreateResult, OperationStatus},
    params::{Id, ListPlans, ShowProgress},
    Tracker,
};

use crate::{
    args::{
        ActivityCommands, MilestoneCommands, PlanCommands, ProgressArgs, SessionCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .tracker
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let params: Id = args.into();
                let plan = self
                    .tracker
                    .get_plan(&params)
                    .await
                    .context("Failed to get plan")?
                    .with_context(|| format!("Plan with ID {} not found", params.id))?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Delete(args) => {
                let plan = self
                    .tracker
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?;
                let status = OperationStatus::success(format!(
                    "Deleted plan '{}' (ID: {}); restore it with `stride plan restore {}`",
                    plan.goal, plan.id, plan.id
                ));
                self.renderer.render(&status.to_string())
            }
            PlanCommands::Restore(args) => {
                let plan = self
                    .tracker
                    .restore_plan(&args.into())
                    .await
                    .context("Failed to restore plan")?;
                let status =
                    OperationStatus::success(format!("Restored plan '{}' (ID: {})", plan.goal, plan.id));
                self.renderer.render(&status.to_string())
            }
            PlanCommands::Attach(args) => {
                let plan = self
                    .tracker
                    .attach_activity(&args.into())
                    .await
                    .context("Failed to attach activity")?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Progress(args) => self.show_progress(args).await,
        }
    }

    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        match command {
            ActivityCommands::Create(args) => {
                let activity = self
                    .tracker
                    .create_activity(&args.into())
                    .await
                    .context("Failed to create activity")?;
                self.renderer
                    .render(&CreateResult::new(activity).to_string())
            }
            ActivityCommands::List => {
                let activities = self
                    .tracker
                    .list_activities()
                    .await
                    .context("Failed to list activities")?;
                self.renderer
                    .render(&format!("# Activities\n\n{}", Activities(activities)))
            }
            ActivityCommands::Log(args) => {
                let entry = self
                    .tracker
                    .log_entry(&args.into())
                    .await
                    .context("Failed to log entry")?;
                self.renderer.render(&CreateResult::new(entry).to_string())
            }
            ActivityCommands::Entries(args) => {
                let params = args.into();
                let entries = self
                    .tracker
                    .list_entries(&params)
                    .await
                    .context("Failed to list entries")?;
                self.renderer.render(&format!(
                    "# Entries of {}\n\n{entries}",
                    params.activity_id
                ))
            }
            ActivityCommands::Remove(args) => {
                let params: Id = args.into();
                self.tracker
                    .delete_entry(&params)
                    .await
                    .context("Failed to remove entry")?;
                let status = OperationStatus::success(format!("Removed entry {}", params.id));
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn handle_milestone_command(&self, command: MilestoneCommands) -> Result<()> {
        match command {
            MilestoneCommands::Add(args) => {
                let milestone = self
                    .tracker
                    .add_milestone(&args.into())
                    .await
                    .context("Failed to add milestone")?;
                self.renderer
                    .render(&CreateResult::new(milestone).to_string())
            }
        }
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::Add(args) => {
                let session = self
                    .tracker
                    .add_session(&args.into())
                    .await
                    .context("Failed to add session")?;
                self.renderer
                    .render(&CreateResult::new(session).to_string())
            }
        }
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self
            .tracker
            .list_plans_summary(params)
            .await
            .context("Failed to list plans")?;
        let title = if params.include_deleted {
            "All Plans"
        } else {
            "Plans"
        };
        self.renderer.render(&format!("# {title}\n\n{summaries}"))
    }

    async fn show_progress(&self, args: ProgressArgs) -> Result<()> {
        let at = args
            .at
            .map(|date| self.noon_of(date))
            .transpose()?;
        let progress = self
            .tracker
            .plan_progress(&ShowProgress { id: args.id, at })
            .await
            .context("Failed to evaluate progress")?;

        if args.json {
            let json = serde_json::to_string_pretty(&progress)
                .context("Failed to serialize progress")?;
            println!("{json}");
            Ok(())
        } else {
            self.renderer.render(&progress.to_string())
        }
    }

    /// Midday of `date` in the evaluator's time zone, far from any DST gap.
    fn noon_of(&self, date: Date) -> Result<Timestamp> {
        let zoned = date
            .at(12, 0, 0, 0)
            .to_zoned(self.tracker.evaluator().time_zone().clone())
            .with_context(|| format!("Failed to resolve {date} in the local time zone"))?;
        Ok(zoned.timestamp())
    }
}
