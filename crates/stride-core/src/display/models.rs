//! Display implementations for domain models.
//!
//! Everything renders as markdown: plans and progress as headed documents,
//! entries and summaries as compact list items.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    Activity, ActivityEntry, Criteria, DurationType, Junction, MilestoneProgress, OutlineType,
    Plan, PlanMilestone, PlanState, PlanSummary, ProgressState, Session, Week,
};

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for OutlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renders as `run ≥ 3 AND stretch ≥ 1`.
impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.junction)?;
            }
            write!(f, "{} ≥ {}", item.activity_id, item.quantity)?;
        }
        Ok(())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- `{}`: {} ({})", self.id, self.title, self.measure)
    }
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}: {} × {} (entry {})",
            self.date, self.activity_id, self.quantity, self.id
        )
    }
}

impl fmt::Display for PlanMilestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.criteria {
            Some(criteria) => writeln!(f, "{}. {}: {criteria}", self.position + 1, self.title),
            None => writeln!(f, "{}. {}", self.position + 1, self.title),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}: {} ≥ {}", self.date, self.activity_id, self.quantity)?;
        if let Some(desc) = &self.description {
            write!(f, " ({desc})")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.goal)?;
        writeln!(f)?;

        writeln!(f, "- State: {}", self.state.with_icon())?;
        writeln!(f, "- Duration: {}", self.duration_type)?;
        match (self.outline_type, self.times_per_week) {
            (OutlineType::TimesPerWeek, Some(n)) => {
                writeln!(f, "- Outline: {} ({n} per week)", self.outline_type)?;
            }
            _ => writeln!(f, "- Outline: {}", self.outline_type)?,
        }
        if let Some(weeks) = self.target_weeks {
            writeln!(f, "- Target: {weeks} weeks")?;
        }
        if let Some(date) = self.finishing_date {
            writeln!(f, "- Finishing: {date}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        if let Some(deleted_at) = &self.deleted_at {
            writeln!(f, "- Deleted: {}", LocalDateTime(deleted_at))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.activities.is_empty() {
            writeln!(f, "\nNo activities in this plan.")?;
        } else {
            writeln!(f, "\n## Activities")?;
            writeln!(f)?;
            for activity in &self.activities {
                write!(f, "{activity}")?;
            }
        }

        if !self.milestones.is_empty() {
            writeln!(f, "\n## Milestones")?;
            writeln!(f)?;
            for milestone in &self.milestones {
                write!(f, "{milestone}")?;
            }
        }

        if !self.sessions.is_empty() {
            writeln!(f, "\n## Sessions")?;
            writeln!(f)?;
            for session in &self.sessions {
                write!(f, "{session}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.goal, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **State**: {}", self.state.with_icon())?;
        writeln!(
            f,
            "- **Schedule**: {} / {}",
            self.duration_type, self.outline_type
        )?;
        writeln!(
            f,
            "- **Activities**: {}, **Milestones**: {}",
            self.activity_count, self.milestone_count
        )?;
        if let Some(date) = self.finishing_date {
            writeln!(f, "- **Finishing**: {date}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        if let Some(deleted_at) = &self.deleted_at {
            writeln!(f, "- **Deleted**: {}", LocalDateTime(deleted_at))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl Week {
    /// One markdown table row.
    fn fmt_row(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match (self.is_completed, self.is_current) {
            (true, _) => "✓",
            (false, true) => "…",
            (false, false) => "✗",
        };
        writeln!(
            f,
            "| {} | {} | {} | {} | {mark} |",
            self.index + 1,
            self.start_date,
            self.end_date,
            self.stats.days_completed_this_week
        )
    }
}

impl fmt::Display for MilestoneProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.achieved { "✓" } else { "○" };
        write!(f, "- {icon} {}", self.title)?;
        if !self.items.is_empty() {
            let separator = self
                .junction
                .map(|j| format!(" {j} "))
                .unwrap_or_else(|| ", ".to_string());
            let items: Vec<String> = self
                .items
                .iter()
                .map(|item| format!("{} {}/{}", item.activity_id, item.actual, item.required))
                .collect();
            write!(f, " ({})", items.join(&separator))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Progress of plan {}", self.plan_id)?;
        writeln!(f)?;
        writeln!(f, "- Evaluated on: {}", self.evaluated_on)?;
        writeln!(f, "- State: {}", self.current_week_state.with_icon())?;
        writeln!(f, "- Streak: {} week(s)", self.summary.streak)?;
        writeln!(
            f,
            "- Weeks: {} completed, {} missed, {} total",
            self.summary.completed_weeks, self.summary.incomplete_weeks, self.summary.total_weeks
        )?;

        let primary = |duration_type: DurationType| {
            if self.duration_type == duration_type {
                " ←"
            } else {
                ""
            }
        };
        writeln!(
            f,
            "- Habit: {}/{} ({}%){}",
            self.habit.progress_value,
            self.habit.max_value,
            self.habit.percentage,
            primary(DurationType::Habit)
        )?;
        writeln!(
            f,
            "- Lifestyle: {}/{} ({}%){}",
            self.lifestyle.progress_value,
            self.lifestyle.max_value,
            self.lifestyle.percentage,
            primary(DurationType::Lifestyle)
        )?;

        if self.current().is_some() {
            let stats = &self.current_week;
            writeln!(f, "\n## This week")?;
            writeln!(f)?;
            writeln!(
                f,
                "- Days completed: {}",
                stats.days_completed_this_week
            )?;
            writeln!(
                f,
                "- Active days: {} ({} still ahead)",
                stats.num_active_days_in_the_week, stats.num_active_days_left_in_the_week
            )?;
            writeln!(f, "- Days left: {}", stats.num_left_days_in_the_week)?;
        }

        if self.weeks.is_empty() {
            writeln!(f, "\nThe plan has not started yet.")?;
        } else {
            writeln!(f, "\n## Weeks")?;
            writeln!(f)?;
            writeln!(f, "| Week | From | To | Days | Done |")?;
            writeln!(f, "|---:|---|---|---:|:---:|")?;
            for week in &self.weeks {
                week.fmt_row(f)?;
            }
        }

        if !self.milestones.is_empty() {
            writeln!(
                f,
                "\n## Milestones ({}/{})",
                self.achieved_milestones(),
                self.milestones.len()
            )?;
            writeln!(f)?;
            for milestone in &self.milestones {
                write!(f, "{milestone}")?;
            }
        }

        Ok(())
    }
}
