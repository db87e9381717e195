//! Command-line interface definitions using clap
//!
//! This module implements the CLI side of the parameter wrapper pattern:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```
//!
//! Core parameter types stay free of clap derives. Each `*Args` struct owns
//! the CLI concerns (flags, aliases, help text, value parsing) and converts
//! into its core counterpart with a `From` implementation.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::{civil::Date, Zoned};
use stride_core::{
    models::{Criteria, CriteriaItem, DurationType, Junction, OutlineType},
    params::*,
};

/// Stride tracks goal plans, the activities they are made of, and the
/// streaks you build by logging them.
///
/// Progress is derived from your activity log every time it is shown; there
/// is nothing to "mark done". Run `stride serve` to expose the same data to
/// AI assistants over the Model Context Protocol.
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans and show their progress
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage activities and log entries
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Manage plan milestones
    #[command(alias = "m")]
    Milestone {
        #[command(subcommand)]
        command: MilestoneCommands,
    },
    /// Manage planned sessions of SPECIFIC plans
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Start the MCP server on stdio
    Serve,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(alias = "ls")]
    List(ListPlansArgs),
    /// Show a plan with its activities, milestones and sessions
    Show(PlanIdArgs),
    /// Delete a plan (it can be restored later)
    #[command(alias = "rm")]
    Delete(PlanIdArgs),
    /// Restore a deleted plan
    Restore(PlanIdArgs),
    /// Add an activity to a plan
    Attach(AttachActivityArgs),
    /// Show the progress of a plan
    #[command(alias = "pr")]
    Progress(ProgressArgs),
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Create a new activity
    #[command(alias = "c")]
    Create(CreateActivityArgs),
    /// List all activities
    #[command(alias = "ls")]
    List,
    /// Log an entry for an activity
    #[command(alias = "l")]
    Log(LogEntryArgs),
    /// List the entries of an activity
    Entries(ListEntriesArgs),
    /// Remove a logged entry
    #[command(alias = "rm")]
    Remove(RemoveEntryArgs),
}

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Add a milestone to a plan
    Add(AddMilestoneArgs),
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Plan a session on a SPECIFIC plan
    Add(AddSessionArgs),
}

/// How the plan's success is judged
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DurationArg {
    /// Keep a streak of completed weeks
    Habit,
    /// Accumulate completed weeks
    Lifestyle,
    /// Reach the plan's milestones
    Custom,
}

impl From<DurationArg> for DurationType {
    fn from(val: DurationArg) -> Self {
        match val {
            DurationArg::Habit => DurationType::Habit,
            DurationArg::Lifestyle => DurationType::Lifestyle,
            DurationArg::Custom => DurationType::Custom,
        }
    }
}

/// How each week is scheduled
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutlineArg {
    /// Planned sessions on specific days
    Specific,
    /// A number of active days per week
    TimesPerWeek,
}

impl From<OutlineArg> for OutlineType {
    fn from(val: OutlineArg) -> Self {
        match val {
            OutlineArg::Specific => OutlineType::Specific,
            OutlineArg::TimesPerWeek => OutlineType::TimesPerWeek,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum JunctionArg {
    /// Every requirement must be met
    And,
    /// Any requirement suffices
    Or,
}

impl From<JunctionArg> for Junction {
    fn from(val: JunctionArg) -> Self {
        match val {
            JunctionArg::And => Junction::And,
            JunctionArg::Or => Junction::Or,
        }
    }
}

#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// What the plan is working towards
    pub goal: String,
    /// Optional notes about the plan
    #[arg(short, long)]
    pub description: Option<String>,
    /// How success is judged
    #[arg(long, value_enum, default_value_t = DurationArg::Habit)]
    pub duration: DurationArg,
    /// How each week is scheduled
    #[arg(long, value_enum, default_value_t = OutlineArg::TimesPerWeek)]
    pub outline: OutlineArg,
    /// Active days per week (1-7), required for times-per-week plans
    #[arg(short, long)]
    pub times_per_week: Option<u32>,
    /// Number of weeks that make up the target
    #[arg(short = 'w', long)]
    pub target_weeks: Option<u32>,
    /// Last day of the plan (YYYY-MM-DD)
    #[arg(short, long)]
    pub finishing_date: Option<Date>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            goal: val.goal,
            description: val.description,
            duration_type: val.duration.into(),
            outline_type: val.outline.into(),
            times_per_week: val.times_per_week,
            target_weeks: val.target_weeks,
            finishing_date: val.finishing_date,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Include deleted plans
    #[arg(long)]
    pub deleted: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            include_deleted: val.deleted,
        }
    }
}

#[derive(ClapArgs)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct AttachActivityArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// ID of the activity to add
    pub activity_id: String,
}

impl From<AttachActivityArgs> for AttachActivity {
    fn from(val: AttachActivityArgs) -> Self {
        AttachActivity {
            plan_id: val.plan_id,
            activity_id: val.activity_id,
        }
    }
}

#[derive(ClapArgs)]
pub struct ProgressArgs {
    /// ID of the plan
    pub id: u64,
    /// Evaluate as of this day (YYYY-MM-DD) instead of now
    #[arg(long)]
    pub at: Option<Date>,
    /// Print the progress as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs)]
pub struct CreateActivityArgs {
    /// Short identifier, e.g. `run`
    pub id: String,
    /// Human readable name
    pub title: String,
    /// Unit of measure, e.g. `km`
    #[arg(short, long, default_value = "times")]
    pub measure: String,
}

impl From<CreateActivityArgs> for CreateActivity {
    fn from(val: CreateActivityArgs) -> Self {
        CreateActivity {
            id: val.id,
            title: val.title,
            measure: val.measure,
        }
    }
}

#[derive(ClapArgs)]
pub struct LogEntryArgs {
    /// ID of the activity
    pub activity_id: String,
    /// Quantity performed
    pub quantity: u32,
    /// Day the activity was performed (YYYY-MM-DD), today by default
    #[arg(short, long)]
    pub date: Option<Date>,
}

impl From<LogEntryArgs> for LogEntry {
    fn from(val: LogEntryArgs) -> Self {
        LogEntry {
            activity_id: val.activity_id,
            quantity: val.quantity,
            date: val.date.unwrap_or_else(|| Zoned::now().date()),
        }
    }
}

#[derive(ClapArgs)]
pub struct ListEntriesArgs {
    /// ID of the activity
    pub activity_id: String,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<Date>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<Date>,
}

impl From<ListEntriesArgs> for ListEntries {
    fn from(val: ListEntriesArgs) -> Self {
        ListEntries {
            activity_id: val.activity_id,
            from: val.from,
            to: val.to,
        }
    }
}

#[derive(ClapArgs)]
pub struct RemoveEntryArgs {
    /// ID of the entry
    pub id: u64,
}

impl From<RemoveEntryArgs> for Id {
    fn from(val: RemoveEntryArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct AddMilestoneArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// What the milestone celebrates
    pub title: String,
    /// Lifetime total required, as `activity=quantity`; repeatable
    #[arg(short, long = "require", value_parser = parse_requirement)]
    pub requirements: Vec<CriteriaItem>,
    /// How requirements combine
    #[arg(short, long, value_enum, default_value_t = JunctionArg::And)]
    pub junction: JunctionArg,
}

impl From<AddMilestoneArgs> for AddMilestone {
    fn from(val: AddMilestoneArgs) -> Self {
        let criteria = (!val.requirements.is_empty()).then(|| Criteria {
            junction: val.junction.into(),
            items: val.requirements,
        });
        AddMilestone {
            plan_id: val.plan_id,
            title: val.title,
            criteria,
        }
    }
}

/// Parses `run=3` into a criteria item.
fn parse_requirement(s: &str) -> Result<CriteriaItem, String> {
    let (activity_id, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ACTIVITY=QUANTITY, got '{s}'"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
    Ok(CriteriaItem::new(activity_id.trim(), quantity))
}

#[derive(ClapArgs)]
pub struct AddSessionArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// ID of the activity
    pub activity_id: String,
    /// Day of the session (YYYY-MM-DD)
    pub date: Date,
    /// Minimum quantity a single entry must reach
    pub quantity: u32,
    /// Optional notes
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<AddSessionArgs> for AddSession {
    fn from(val: AddSessionArgs) -> Self {
        AddSession {
            plan_id: val.plan_id,
            activity_id: val.activity_id,
            date: val.date,
            quantity: val.quantity,
            description: val.description,
        }
    }
}
