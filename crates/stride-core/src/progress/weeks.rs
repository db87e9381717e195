//! Partitioning of a plan lifetime into weeks and per-week evaluation.

use std::collections::{BTreeMap, BTreeSet};

use jiff::{civil::Date, ToSpan};
use log::debug;

use crate::models::{ActivityEntry, OutlineType, Plan, Session, Week, WeekStats};

/// Inclusive date range a plan accrues progress over.
#[derive(Debug, Clone, Copy)]
pub(super) struct Lifetime {
    pub start: Date,
    /// `min(today, finishing_date ?? today)`
    pub end: Date,
    pub finishing_date: Option<Date>,
}

impl Lifetime {
    pub fn new(start: Date, today: Date, finishing_date: Option<Date>) -> Self {
        let end = finishing_date.map_or(today, |finish| finish.min(today));
        Self {
            start,
            end,
            finishing_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Entries of the plan's activities within its lifetime, indexed by day.
pub(super) struct EntryIndex<'a> {
    by_day: BTreeMap<Date, Vec<&'a ActivityEntry>>,
    totals: BTreeMap<&'a str, u32>,
}

impl<'a> EntryIndex<'a> {
    pub fn build(plan: &Plan, entries: &'a [ActivityEntry], lifetime: &Lifetime) -> Self {
        let activity_ids: BTreeSet<&str> = plan.activities.iter().map(|a| a.id.as_str()).collect();
        let mut by_day: BTreeMap<Date, Vec<&'a ActivityEntry>> = BTreeMap::new();
        let mut totals: BTreeMap<&'a str, u32> = BTreeMap::new();
        let mut skipped = 0usize;

        for entry in entries {
            if !activity_ids.contains(entry.activity_id.as_str())
                || entry.date < lifetime.start
                || entry.date > lifetime.end
            {
                skipped += 1;
                continue;
            }
            by_day.entry(entry.date).or_default().push(entry);
            let total = totals.entry(entry.activity_id.as_str()).or_insert(0);
            *total = total.saturating_add(entry.quantity);
        }

        for day in by_day.values_mut() {
            day.sort_by(|a, b| a.id.cmp(&b.id));
        }

        if skipped > 0 {
            debug!(
                "plan {}: ignored {skipped} entries outside its activity set or lifetime",
                plan.id
            );
        }

        Self { by_day, totals }
    }

    pub fn on(&self, date: Date) -> &[&'a ActivityEntry] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lifetime-to-date quantity of an activity.
    pub fn total(&self, activity_id: &str) -> u32 {
        self.totals.get(activity_id).copied().unwrap_or(0)
    }

    fn between(&self, from: Date, to: Date) -> impl Iterator<Item = &&'a ActivityEntry> {
        self.by_day.range(from..=to).flat_map(|(_, entries)| entries.iter())
    }
}

/// A session counts when one entry of its activity on its date reaches the
/// target quantity on its own.
fn session_met(session: &Session, index: &EntryIndex<'_>) -> bool {
    index
        .on(session.date)
        .iter()
        .any(|e| e.activity_id == session.activity_id && e.quantity >= session.quantity)
}

/// Active-day target of a `TIMES_PER_WEEK` week spanning `days` days.
///
/// A week clipped by the finishing date is held to a share of the weekly
/// target proportional to its length, rounded up and at least one day.
pub(super) fn times_target(plan: &Plan, days: u32) -> u32 {
    let target = plan.times_per_week.unwrap_or(0);
    if target == 0 || days >= 7 {
        return target;
    }
    ((target * days + 6) / 7).max(1)
}

fn week_length(start_date: Date, end_date: Date) -> u32 {
    start_date
        .series(1.day())
        .take_while(|d| *d <= end_date)
        .count() as u32
}

/// Splits the lifetime into 7-day windows anchored at the start date and
/// evaluates each of them.
pub(super) fn partition(
    plan: &Plan,
    index: &EntryIndex<'_>,
    lifetime: &Lifetime,
    today: Date,
) -> Vec<Week> {
    if lifetime.is_empty() {
        return Vec::new();
    }

    lifetime
        .start
        .series(7.days())
        .take_while(|week_start| *week_start <= lifetime.end)
        .enumerate()
        .map(|(i, week_start)| {
            let mut week_end = week_start.saturating_add(6.days());
            if let Some(finishing_date) = lifetime.finishing_date {
                week_end = week_end.min(finishing_date);
            }
            evaluate_week(plan, index, i as u32, week_start, week_end, today)
        })
        .collect()
}

fn evaluate_week(
    plan: &Plan,
    index: &EntryIndex<'_>,
    week_index: u32,
    start_date: Date,
    end_date: Date,
    today: Date,
) -> Week {
    let mut sessions: Vec<Session> = plan
        .sessions
        .iter()
        .filter(|s| s.date >= start_date && s.date <= end_date)
        .cloned()
        .collect();
    sessions.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let entries: Vec<ActivityEntry> = index
        .between(start_date, end_date)
        .map(|e| (*e).clone())
        .collect();

    let days: Vec<Date> = start_date
        .series(1.day())
        .take_while(|d| *d <= end_date)
        .collect();
    let num_left_days = days.iter().filter(|d| **d >= today).count() as u32;

    let (is_completed, stats) = match plan.outline_type {
        OutlineType::Specific => {
            let planned_days: BTreeSet<Date> = sessions.iter().map(|s| s.date).collect();
            let completed_days: BTreeSet<Date> = sessions
                .iter()
                .filter(|s| session_met(s, index))
                .map(|s| s.date)
                .collect();
            let completed = !sessions.is_empty() && sessions.iter().all(|s| session_met(s, index));
            let stats = WeekStats {
                num_active_days_in_the_week: planned_days.len() as u32,
                num_left_days_in_the_week: num_left_days,
                num_active_days_left_in_the_week: planned_days
                    .iter()
                    .filter(|d| **d >= today)
                    .count() as u32,
                days_completed_this_week: completed_days.len() as u32,
            };
            (completed, stats)
        }
        OutlineType::TimesPerWeek => {
            let target = times_target(plan, days.len() as u32);
            let qualifying_days = days
                .iter()
                .filter(|d| index.on(**d).iter().any(|e| e.quantity > 0))
                .count() as u32;
            let stats = WeekStats {
                num_active_days_in_the_week: target,
                num_left_days_in_the_week: num_left_days,
                num_active_days_left_in_the_week: num_left_days
                    .min(target.saturating_sub(qualifying_days)),
                days_completed_this_week: qualifying_days,
            };
            (target > 0 && qualifying_days >= target, stats)
        }
    };

    Week {
        index: week_index,
        start_date,
        end_date,
        sessions,
        entries,
        is_completed,
        is_current: start_date <= today && today <= end_date,
        stats,
    }
}

/// True when the in-progress week can no longer be completed.
pub(super) fn is_out_of_reach(plan: &Plan, week: &Week, index: &EntryIndex<'_>, today: Date) -> bool {
    if week.is_completed {
        return false;
    }
    match plan.outline_type {
        OutlineType::Specific => {
            week.sessions.is_empty()
                || week
                    .sessions
                    .iter()
                    .any(|s| s.date < today && !session_met(s, index))
        }
        OutlineType::TimesPerWeek => {
            let target = times_target(plan, week_length(week.start_date, week.end_date));
            let done_before_today = week
                .entries
                .iter()
                .filter(|e| e.date < today && e.quantity > 0)
                .map(|e| e.date)
                .collect::<BTreeSet<_>>()
                .len() as u32;
            done_before_today + week.stats.num_left_days_in_the_week < target
        }
    }
}
