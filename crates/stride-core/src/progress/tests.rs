use std::cell::RefCell;

use jiff::{
    civil::{date, Date},
    tz::{self, TimeZone},
    Timestamp,
};

use super::*;
use crate::models::{
    AchievementSummary, Activity, Criteria, CriteriaItem, DurationType, OutlineType,
    PlanMilestone, PlanState, Session, WeekStats,
};

fn noon(day: Date) -> Timestamp {
    day.at(12, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("valid date")
        .timestamp()
}

fn activity(id: &str) -> Activity {
    Activity {
        id: id.to_string(),
        title: id.to_string(),
        measure: "times".to_string(),
        created_at: noon(date(2023, 12, 1)),
    }
}

/// Plan created Monday 2024-01-01 with `run` and `stretch` activities.
fn times_per_week_plan(target: u32) -> Plan {
    Plan {
        id: 1,
        goal: "Stay active".to_string(),
        description: None,
        duration_type: DurationType::Habit,
        outline_type: OutlineType::TimesPerWeek,
        state: PlanState::OnTrack,
        times_per_week: Some(target),
        target_weeks: Some(4),
        finishing_date: None,
        created_at: noon(date(2024, 1, 1)),
        updated_at: noon(date(2024, 1, 1)),
        deleted_at: None,
        activities: vec![activity("run"), activity("stretch")],
        milestones: Vec::new(),
        sessions: Vec::new(),
    }
}

fn specific_plan(sessions: Vec<Session>) -> Plan {
    Plan {
        outline_type: OutlineType::Specific,
        times_per_week: None,
        sessions,
        ..times_per_week_plan(1)
    }
}

fn session(id: u64, activity_id: &str, day: Date, quantity: u32) -> Session {
    Session {
        id,
        plan_id: 1,
        activity_id: activity_id.to_string(),
        date: day,
        quantity,
        description: None,
    }
}

fn entry(id: u64, activity_id: &str, day: Date, quantity: u32) -> ActivityEntry {
    ActivityEntry {
        id,
        activity_id: activity_id.to_string(),
        quantity,
        date: day,
        created_at: noon(day),
    }
}

/// One `run` entry on each given day of January 2024.
fn runs(days: &[i8]) -> Vec<ActivityEntry> {
    days.iter()
        .enumerate()
        .map(|(i, day)| entry(i as u64 + 1, "run", date(2024, 1, *day), 1))
        .collect()
}

fn milestone(id: u64, criteria: Criteria) -> PlanMilestone {
    PlanMilestone {
        id,
        plan_id: 1,
        title: format!("Milestone {id}"),
        criteria: Some(criteria),
        position: id as u32,
    }
}

#[test]
fn test_no_entries_yields_zero_progress() {
    let mut plan = times_per_week_plan(3);
    plan.milestones = vec![milestone(1, Criteria::all(vec![CriteriaItem::new("run", 1)]))];

    let progress = compute_progress(&plan, &[], noon(date(2024, 2, 1))).unwrap();

    assert_eq!(progress.summary.streak, 0);
    assert_eq!(progress.summary.completed_weeks, 0);
    assert_eq!(progress.lifestyle.progress_value, 0);
    assert_eq!(progress.habit.progress_value, 0);
    assert_eq!(progress.achieved_milestones(), 0);
    assert!(progress.weeks.iter().all(|w| !w.is_completed));
}

#[test]
fn test_no_entries_specific_plan_has_no_completed_weeks() {
    let plan = specific_plan(vec![session(1, "run", date(2024, 1, 2), 1)]);
    let progress = compute_progress(&plan, &[], noon(date(2024, 1, 20))).unwrap();
    assert_eq!(progress.summary.completed_weeks, 0);
    assert_eq!(progress.summary.streak, 0);
}

#[test]
fn test_zero_milestones_yields_empty_milestone_list() {
    let plan = times_per_week_plan(3);
    let progress = compute_progress(&plan, &runs(&[2]), noon(date(2024, 1, 3))).unwrap();
    assert!(progress.milestones.is_empty());
}

#[test]
fn test_evaluation_is_deterministic() {
    let mut plan = times_per_week_plan(2);
    plan.milestones = vec![milestone(1, Criteria::any(vec![CriteriaItem::new("run", 4)]))];
    let entries = runs(&[1, 3, 3, 9, 10, 17]);
    let now = noon(date(2024, 1, 18));

    let first = compute_progress(&plan, &entries, now).unwrap();
    let second = compute_progress(&plan, &entries, now).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_inputs_are_not_mutated() {
    let plan = times_per_week_plan(3);
    let entries = runs(&[5, 2, 3]);
    let plan_before = plan.clone();
    let entries_before = entries.clone();

    compute_progress(&plan, &entries, noon(date(2024, 1, 9))).unwrap();

    assert_eq!(plan, plan_before);
    assert_eq!(entries, entries_before);
}

#[test]
fn test_three_days_in_first_week_complete_it() {
    let plan = times_per_week_plan(3);
    let entries = runs(&[2, 3, 5]);

    let within = compute_progress(&plan, &entries, noon(date(2024, 1, 5))).unwrap();
    assert!(within.weeks[0].is_completed);
    assert!(within.weeks[0].is_current);
    assert_eq!(within.summary.streak, 1);

    let next_week = compute_progress(&plan, &entries, noon(date(2024, 1, 10))).unwrap();
    assert_eq!(next_week.weeks.len(), 2);
    assert!(next_week.weeks[0].is_completed);
    assert!(!next_week.weeks[1].is_completed);
    assert_eq!(next_week.summary.streak, 1);
}

#[test]
fn test_times_per_week_counts_distinct_days() {
    let plan = times_per_week_plan(3);
    let entries = vec![
        entry(1, "run", date(2024, 1, 2), 1),
        entry(2, "stretch", date(2024, 1, 2), 1),
        entry(3, "run", date(2024, 1, 3), 1),
    ];

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 8))).unwrap();
    assert!(!progress.weeks[0].is_completed);
    assert_eq!(progress.weeks[0].stats.days_completed_this_week, 2);
}

#[test]
fn test_zero_quantity_entries_do_not_qualify() {
    let plan = times_per_week_plan(1);
    let entries = vec![entry(1, "run", date(2024, 1, 2), 0)];
    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 8))).unwrap();
    assert!(!progress.weeks[0].is_completed);
}

#[test]
fn test_incomplete_past_week_breaks_streak() {
    let plan = times_per_week_plan(1);
    // Week 1 and 3 completed, week 2 empty, week 4 in progress.
    let entries = runs(&[2, 16]);

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 23))).unwrap();

    assert_eq!(progress.weeks.len(), 4);
    assert!(progress.weeks[3].is_current);
    assert_eq!(progress.summary.streak, 1);
    assert_eq!(progress.summary.completed_weeks, 2);
    assert_eq!(progress.summary.incomplete_weeks, 1);
    assert_eq!(progress.summary.total_weeks, 4);
}

#[test]
fn test_streak_stays_broken_at_later_evaluation_dates() {
    let plan = times_per_week_plan(1);
    let entries = runs(&[2, 9]);

    // Week 3 (Jan 15-21) has no entries; later evaluations never reach past it.
    for day in [22, 25, 29] {
        let progress = compute_progress(&plan, &entries, noon(date(2024, 1, day))).unwrap();
        assert_eq!(progress.summary.streak, 0, "evaluated on Jan {day}");
    }
}

#[test]
fn test_completed_current_week_extends_streak() {
    let plan = times_per_week_plan(1);
    let entries = runs(&[2, 9, 15]);

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 16))).unwrap();
    assert_eq!(progress.summary.streak, 3);
    assert_eq!(progress.habit.progress_value, 3);
}

#[test]
fn test_lifestyle_progress_is_monotonic_in_entries() {
    let mut plan = times_per_week_plan(2);
    plan.duration_type = DurationType::Lifestyle;
    let now = noon(date(2024, 1, 31));
    let mut entries = runs(&[1, 2, 9, 20]);

    let mut previous = compute_progress(&plan, &entries, now)
        .unwrap()
        .lifestyle
        .progress_value;
    for (i, day) in [10, 21, 5, 28, 29].into_iter().enumerate() {
        entries.push(entry(100 + i as u64, "run", date(2024, 1, day), 1));
        let current = compute_progress(&plan, &entries, now)
            .unwrap()
            .lifestyle
            .progress_value;
        assert!(current >= previous, "lifestyle progress decreased");
        previous = current;
    }
    assert_eq!(previous, 3);
}

#[test]
fn test_specific_week_requires_every_session() {
    let plan = specific_plan(vec![
        session(1, "run", date(2024, 1, 2), 5),
        session(2, "stretch", date(2024, 1, 4), 1),
    ]);

    let partial = vec![entry(1, "run", date(2024, 1, 2), 5)];
    let progress = compute_progress(&plan, &partial, noon(date(2024, 1, 8))).unwrap();
    assert!(!progress.weeks[0].is_completed);
    assert_eq!(progress.weeks[0].stats.num_active_days_in_the_week, 2);
    assert_eq!(progress.weeks[0].stats.days_completed_this_week, 1);

    let full = vec![
        entry(1, "run", date(2024, 1, 2), 6),
        entry(2, "stretch", date(2024, 1, 4), 1),
    ];
    let progress = compute_progress(&plan, &full, noon(date(2024, 1, 8))).unwrap();
    assert!(progress.weeks[0].is_completed);
    assert_eq!(progress.summary.streak, 1);
}

#[test]
fn test_specific_session_needs_single_entry_reaching_target() {
    let plan = specific_plan(vec![session(1, "run", date(2024, 1, 2), 5)]);
    let split = vec![
        entry(1, "run", date(2024, 1, 2), 3),
        entry(2, "run", date(2024, 1, 2), 3),
    ];
    let progress = compute_progress(&plan, &split, noon(date(2024, 1, 8))).unwrap();
    assert!(!progress.weeks[0].is_completed);
}

#[test]
fn test_specific_session_needs_matching_activity_and_date() {
    let plan = specific_plan(vec![session(1, "run", date(2024, 1, 2), 1)]);
    let wrong = vec![
        entry(1, "stretch", date(2024, 1, 2), 9),
        entry(2, "run", date(2024, 1, 3), 9),
    ];
    let progress = compute_progress(&plan, &wrong, noon(date(2024, 1, 8))).unwrap();
    assert!(!progress.weeks[0].is_completed);
}

#[test]
fn test_specific_week_without_sessions_is_not_completed() {
    let plan = specific_plan(vec![session(1, "run", date(2024, 1, 10), 1)]);
    let entries = vec![entry(1, "run", date(2024, 1, 2), 1)];
    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 9))).unwrap();
    assert!(!progress.weeks[0].is_completed);
    assert_eq!(progress.weeks[1].sessions.len(), 1);
}

#[test]
fn test_current_week_statistics() {
    let plan = times_per_week_plan(3);
    let entries = runs(&[2]);

    // Wednesday of the first week: Jan 3..=7 are still ahead.
    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 3))).unwrap();

    assert_eq!(progress.current_week.num_active_days_in_the_week, 3);
    assert_eq!(progress.current_week.num_left_days_in_the_week, 5);
    assert_eq!(progress.current_week.num_active_days_left_in_the_week, 2);
    assert_eq!(progress.current_week.days_completed_this_week, 1);
    assert_eq!(progress.current().map(|w| w.index), Some(0));
}

#[test]
fn test_specific_current_week_statistics() {
    let plan = specific_plan(vec![
        session(1, "run", date(2024, 1, 2), 1),
        session(2, "run", date(2024, 1, 4), 1),
        session(3, "stretch", date(2024, 1, 4), 1),
        session(4, "run", date(2024, 1, 6), 1),
    ]);
    let entries = vec![entry(1, "run", date(2024, 1, 2), 1)];

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 4))).unwrap();

    assert_eq!(progress.current_week.num_active_days_in_the_week, 3);
    assert_eq!(progress.current_week.num_left_days_in_the_week, 4);
    assert_eq!(progress.current_week.num_active_days_left_in_the_week, 2);
    assert_eq!(progress.current_week.days_completed_this_week, 1);
}

#[test]
fn test_weeks_are_anchored_at_plan_start() {
    let mut plan = times_per_week_plan(1);
    // Thursday
    plan.created_at = noon(date(2024, 1, 4));
    let progress = compute_progress(&plan, &[], noon(date(2024, 1, 20))).unwrap();

    let starts: Vec<Date> = progress.weeks.iter().map(|w| w.start_date).collect();
    assert_eq!(
        starts,
        vec![date(2024, 1, 4), date(2024, 1, 11), date(2024, 1, 18)]
    );
    assert_eq!(progress.weeks[0].end_date, date(2024, 1, 10));
}

#[test]
fn test_finishing_date_clips_lifetime() {
    let mut plan = times_per_week_plan(1);
    plan.finishing_date = Some(date(2024, 1, 10));
    let entries = runs(&[2, 9, 20]);

    let progress = compute_progress(&plan, &entries, noon(date(2024, 2, 1))).unwrap();

    assert_eq!(progress.weeks.len(), 2);
    assert_eq!(progress.weeks[1].end_date, date(2024, 1, 10));
    assert!(progress.weeks.iter().all(|w| !w.is_current));
    assert_eq!(progress.current_week, WeekStats::default());
    // The Jan 20 entry lies after the finishing date.
    assert_eq!(progress.weeks[1].entries.len(), 1);
}

#[test]
fn test_clipped_week_target_is_prorated() {
    let plan = times_per_week_plan(3);
    assert_eq!(weeks::times_target(&plan, 7), 3);
    assert_eq!(weeks::times_target(&plan, 3), 2);
    assert_eq!(weeks::times_target(&plan, 1), 1);

    let daily = times_per_week_plan(7);
    assert_eq!(weeks::times_target(&daily, 3), 3);
    assert_eq!(weeks::times_target(&daily, 1), 1);
}

#[test]
fn test_one_day_final_week_completes_with_full_adherence() {
    let mut plan = times_per_week_plan(3);
    plan.target_weeks = None;
    plan.finishing_date = Some(date(2024, 1, 8));
    let entries = runs(&[1, 2, 3, 4, 5, 6, 7, 8]);

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 20))).unwrap();

    assert_eq!(progress.weeks.len(), 2);
    assert_eq!(progress.weeks[1].start_date, date(2024, 1, 8));
    assert_eq!(progress.weeks[1].end_date, date(2024, 1, 8));
    assert_eq!(progress.weeks[1].stats.num_active_days_in_the_week, 1);
    assert!(progress.weeks.iter().all(|w| w.is_completed));
    assert_eq!(progress.summary.streak, 2);
    assert_eq!(progress.habit.progress_value, 2);
    assert_eq!(progress.habit.max_value, 2);
    assert!(progress.habit.achieved);
    assert_eq!(progress.current_week_state, PlanState::Completed);
}

#[test]
fn test_missed_clipped_final_week_still_fails_plan() {
    let mut plan = times_per_week_plan(3);
    plan.target_weeks = None;
    plan.finishing_date = Some(date(2024, 1, 8));
    let entries = runs(&[1, 2, 3, 4, 5, 6, 7]);

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 20))).unwrap();

    assert!(progress.weeks[0].is_completed);
    assert!(!progress.weeks[1].is_completed);
    assert_eq!(progress.summary.streak, 0);
    assert_eq!(progress.summary.incomplete_weeks, 1);
    assert_eq!(progress.current_week_state, PlanState::Failed);
}

#[test]
fn test_now_before_creation_yields_no_weeks() {
    let plan = times_per_week_plan(1);
    let progress = compute_progress(&plan, &runs(&[1]), noon(date(2023, 12, 20))).unwrap();
    assert!(progress.weeks.is_empty());
    assert_eq!(progress.summary, AchievementSummary::default());
    assert_eq!(progress.current_week_state, PlanState::OnTrack);
}

#[test]
fn test_finishing_date_before_creation_is_invalid() {
    let mut plan = times_per_week_plan(3);
    plan.finishing_date = Some(date(2023, 12, 31));

    let err = compute_progress(&plan, &[], noon(date(2024, 1, 5))).unwrap_err();
    assert!(matches!(err, ProgressError::InvalidPlan { plan_id: 1, .. }));
}

#[test]
fn test_times_per_week_without_target_is_invalid() {
    let mut plan = times_per_week_plan(3);
    plan.times_per_week = None;
    let err = compute_progress(&plan, &[], noon(date(2024, 1, 5))).unwrap_err();
    assert!(matches!(err, ProgressError::InvalidPlan { .. }));

    plan.times_per_week = Some(0);
    assert!(compute_progress(&plan, &[], noon(date(2024, 1, 5))).is_err());

    plan.times_per_week = Some(8);
    assert!(compute_progress(&plan, &[], noon(date(2024, 1, 5))).is_err());
}

#[test]
fn test_zero_target_window_is_invalid() {
    let mut plan = times_per_week_plan(3);
    plan.target_weeks = Some(0);
    let err = compute_progress(&plan, &[], noon(date(2024, 1, 5))).unwrap_err();
    assert!(matches!(err, ProgressError::InvalidPlan { .. }));
}

#[test]
fn test_milestone_with_foreign_activity_is_invalid() {
    let mut plan = times_per_week_plan(3);
    plan.milestones = vec![milestone(9, Criteria::all(vec![CriteriaItem::new("swim", 1)]))];

    let err = compute_progress(&plan, &[], noon(date(2024, 1, 5))).unwrap_err();
    assert_eq!(
        err,
        ProgressError::InvalidMilestone {
            milestone_id: 9,
            activity_id: "swim".to_string(),
        }
    );
}

#[test]
fn test_session_with_foreign_activity_is_invalid() {
    let plan = specific_plan(vec![session(1, "swim", date(2024, 1, 2), 1)]);
    let err = compute_progress(&plan, &[], noon(date(2024, 1, 5))).unwrap_err();
    assert!(matches!(err, ProgressError::InvalidPlan { .. }));
}

#[test]
fn test_milestone_and_junction_needs_every_threshold() {
    let mut plan = times_per_week_plan(3);
    plan.milestones = vec![milestone(
        1,
        Criteria::all(vec![
            CriteriaItem::new("run", 3),
            CriteriaItem::new("stretch", 1),
        ]),
    )];
    let now = noon(date(2024, 1, 20));

    let runs_only = runs(&[2, 3, 4]);
    let progress = compute_progress(&plan, &runs_only, now).unwrap();
    assert!(!progress.milestones[0].achieved);
    assert_eq!(progress.milestones[0].items[0].actual, 3);
    assert!(progress.milestones[0].items[0].met);
    assert!(!progress.milestones[0].items[1].met);

    let mut both = runs_only;
    both.push(entry(10, "stretch", date(2024, 1, 12), 1));
    let progress = compute_progress(&plan, &both, now).unwrap();
    assert!(progress.milestones[0].achieved);
}

#[test]
fn test_milestone_or_junction_needs_any_threshold() {
    let mut plan = times_per_week_plan(3);
    plan.milestones = vec![milestone(
        1,
        Criteria::any(vec![
            CriteriaItem::new("run", 3),
            CriteriaItem::new("stretch", 1),
        ]),
    )];
    let now = noon(date(2024, 1, 20));

    let progress = compute_progress(&plan, &runs(&[2, 3]), now).unwrap();
    assert!(!progress.milestones[0].achieved);

    let stretch = vec![entry(1, "stretch", date(2024, 1, 12), 1)];
    let progress = compute_progress(&plan, &stretch, now).unwrap();
    assert!(progress.milestones[0].achieved);
}

#[test]
fn test_milestone_sums_quantities_over_lifetime() {
    let mut plan = times_per_week_plan(3);
    plan.milestones = vec![milestone(1, Criteria::all(vec![CriteriaItem::new("run", 10)]))];
    let entries = vec![
        entry(1, "run", date(2024, 1, 2), 4),
        entry(2, "run", date(2024, 1, 15), 6),
        // Future entries are outside the lifetime-to-date.
        entry(3, "run", date(2024, 3, 1), 50),
    ];

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 20))).unwrap();
    assert_eq!(progress.milestones[0].items[0].actual, 10);
    assert!(progress.milestones[0].achieved);
}

#[test]
fn test_milestone_without_criteria_is_not_achieved() {
    let mut plan = times_per_week_plan(3);
    plan.milestones = vec![PlanMilestone {
        id: 1,
        plan_id: 1,
        title: "Sign up for a race".to_string(),
        criteria: None,
        position: 0,
    }];
    let progress = compute_progress(&plan, &runs(&[2]), noon(date(2024, 1, 5))).unwrap();
    assert!(!progress.milestones[0].achieved);
    assert!(progress.milestones[0].junction.is_none());
}

#[test]
fn test_entries_of_other_activities_are_ignored() {
    let mut plan = times_per_week_plan(1);
    plan.milestones = vec![milestone(1, Criteria::all(vec![CriteriaItem::new("run", 1)]))];
    let entries = vec![entry(1, "swim", date(2024, 1, 2), 5)];

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 8))).unwrap();
    assert!(!progress.weeks[0].is_completed);
    assert!(progress.weeks[0].entries.is_empty());
    assert!(!progress.milestones[0].achieved);
}

#[test]
fn test_habit_achieved_completes_plan() {
    let mut plan = times_per_week_plan(1);
    plan.target_weeks = Some(2);
    let progress = compute_progress(&plan, &runs(&[2, 9]), noon(date(2024, 1, 10))).unwrap();

    assert!(progress.habit.achieved);
    assert_eq!(progress.habit.percentage, 100);
    assert_eq!(progress.current_week_state, PlanState::Completed);
    assert!(progress.stale_state);
}

#[test]
fn test_lifestyle_target_counts_non_consecutive_weeks() {
    let mut plan = times_per_week_plan(1);
    plan.duration_type = DurationType::Lifestyle;
    plan.target_weeks = Some(3);
    let entries = runs(&[2, 16, 30]);

    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 31))).unwrap();
    assert_eq!(progress.summary.streak, 1);
    assert_eq!(progress.lifestyle.progress_value, 3);
    assert!(progress.lifestyle.achieved);
    assert!(!progress.habit.achieved);
    assert_eq!(progress.current_week_state, PlanState::Completed);
}

#[test]
fn test_target_window_derives_from_finishing_date() {
    let mut plan = times_per_week_plan(1);
    plan.target_weeks = None;
    plan.finishing_date = Some(date(2024, 1, 28));
    let progress = compute_progress(&plan, &[], noon(date(2024, 1, 3))).unwrap();
    assert_eq!(progress.habit.max_value, 4);

    plan.finishing_date = None;
    let progress = compute_progress(&plan, &[], noon(date(2024, 1, 3))).unwrap();
    assert_eq!(progress.habit.max_value, DEFAULT_TARGET_WEEKS);
}

#[test]
fn test_derived_state_at_risk_after_lapsed_week() {
    let mut plan = times_per_week_plan(1);
    plan.state = PlanState::OnTrack;

    let progress = compute_progress(&plan, &runs(&[2]), noon(date(2024, 1, 15))).unwrap();
    assert_eq!(progress.current_week_state, PlanState::AtRisk);
    assert!(progress.stale_state);
}

#[test]
fn test_derived_state_at_risk_when_week_out_of_reach() {
    let plan = times_per_week_plan(3);
    // Sunday of week one with a single completed day: at most one more day.
    let progress = compute_progress(&plan, &runs(&[1]), noon(date(2024, 1, 7))).unwrap();
    assert_eq!(progress.current_week_state, PlanState::AtRisk);

    let progress = compute_progress(&plan, &runs(&[1, 2]), noon(date(2024, 1, 7))).unwrap();
    assert_eq!(progress.current_week_state, PlanState::OnTrack);
    assert!(!progress.stale_state);
}

#[test]
fn test_derived_state_prefers_fresh_value_over_stored() {
    let mut plan = times_per_week_plan(1);
    plan.state = PlanState::Completed;

    let progress = compute_progress(&plan, &runs(&[2]), noon(date(2024, 1, 3))).unwrap();
    assert_eq!(progress.current_week_state, PlanState::OnTrack);
    assert!(progress.stale_state);
}

#[test]
fn test_derived_state_failed_after_finishing_date() {
    let mut plan = times_per_week_plan(1);
    plan.finishing_date = Some(date(2024, 1, 14));
    let progress = compute_progress(&plan, &runs(&[2]), noon(date(2024, 1, 20))).unwrap();
    assert_eq!(progress.current_week_state, PlanState::Failed);
}

#[test]
fn test_custom_plan_completes_with_all_milestones() {
    let mut plan = times_per_week_plan(1);
    plan.duration_type = DurationType::Custom;
    plan.milestones = vec![
        milestone(1, Criteria::all(vec![CriteriaItem::new("run", 2)])),
        milestone(2, Criteria::any(vec![CriteriaItem::new("stretch", 1)])),
    ];
    let mut entries = runs(&[2, 3]);
    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 4))).unwrap();
    assert!(progress.primary_achievement().is_none());
    assert_ne!(progress.current_week_state, PlanState::Completed);

    entries.push(entry(9, "stretch", date(2024, 1, 4), 1));
    let progress = compute_progress(&plan, &entries, noon(date(2024, 1, 4))).unwrap();
    assert_eq!(progress.current_week_state, PlanState::Completed);
}

#[test]
fn test_evaluator_time_zone_decides_dates() {
    let mut plan = times_per_week_plan(1);
    plan.created_at = date(2024, 1, 1)
        .at(23, 30, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap()
        .timestamp();
    let now = date(2024, 1, 8)
        .at(23, 30, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap()
        .timestamp();

    let utc = ProgressEvaluator::utc().evaluate(&plan, &[], now).unwrap();
    assert_eq!(utc.weeks[0].start_date, date(2024, 1, 1));
    assert_eq!(utc.evaluated_on, date(2024, 1, 8));

    let ahead = ProgressEvaluator::new(TimeZone::fixed(tz::offset(2)));
    let local = ahead.evaluate(&plan, &[], now).unwrap();
    assert_eq!(local.weeks[0].start_date, date(2024, 1, 2));
    assert_eq!(local.evaluated_on, date(2024, 1, 9));
}

/// In-memory data access used to exercise [`evaluate_plan`].
struct MemorySource {
    plans: Vec<Plan>,
    entries: Vec<ActivityEntry>,
    requested: RefCell<Vec<EntryFilter>>,
}

impl ProgressSource for MemorySource {
    fn fetch_plan(&self, plan_id: u64) -> crate::error::Result<Option<Plan>> {
        Ok(self.plans.iter().find(|p| p.id == plan_id).cloned())
    }

    fn fetch_entries(&self, filter: &EntryFilter) -> crate::error::Result<Vec<ActivityEntry>> {
        self.requested.borrow_mut().push(filter.clone());
        Ok(self
            .entries
            .iter()
            .filter(|e| filter.activity_ids.contains(&e.activity_id))
            .filter(|e| filter.from.map_or(true, |from| e.date >= from))
            .filter(|e| filter.to.map_or(true, |to| e.date <= to))
            .cloned()
            .collect())
    }
}

#[test]
fn test_evaluate_plan_fetches_lifetime_window() {
    let source = MemorySource {
        plans: vec![times_per_week_plan(3)],
        entries: runs(&[2, 3, 5]),
        requested: RefCell::new(Vec::new()),
    };

    let progress =
        evaluate_plan(&source, &ProgressEvaluator::utc(), 1, noon(date(2024, 1, 9))).unwrap();

    assert_eq!(progress.summary.streak, 1);
    let requested = source.requested.borrow();
    assert_eq!(requested.len(), 1);
    assert_eq!(
        requested[0],
        EntryFilter::for_activities(vec!["run".to_string(), "stretch".to_string()])
            .between(date(2024, 1, 1), date(2024, 1, 9))
    );
}

#[test]
fn test_evaluate_plan_skips_fetch_before_start() {
    let source = MemorySource {
        plans: vec![times_per_week_plan(3)],
        entries: Vec::new(),
        requested: RefCell::new(Vec::new()),
    };
    let progress =
        evaluate_plan(&source, &ProgressEvaluator::utc(), 1, noon(date(2023, 6, 1))).unwrap();
    assert!(progress.weeks.is_empty());
    assert!(source.requested.borrow().is_empty());
}

#[test]
fn test_evaluate_plan_missing_or_deleted_plan() {
    let mut deleted = times_per_week_plan(3);
    deleted.id = 2;
    deleted.deleted_at = Some(noon(date(2024, 1, 3)));
    let source = MemorySource {
        plans: vec![deleted],
        entries: Vec::new(),
        requested: RefCell::new(Vec::new()),
    };

    for id in [1, 2] {
        let err = evaluate_plan(&source, &ProgressEvaluator::utc(), id, noon(date(2024, 1, 9)))
            .unwrap_err();
        assert!(matches!(err, TrackerError::PlanNotFound { id: missing } if missing == id));
    }
}

#[test]
fn test_evaluate_plan_surfaces_invalid_plan() {
    let mut plan = times_per_week_plan(3);
    plan.finishing_date = Some(date(2023, 12, 1));
    let source = MemorySource {
        plans: vec![plan],
        entries: Vec::new(),
        requested: RefCell::new(Vec::new()),
    };
    let err =
        evaluate_plan(&source, &ProgressEvaluator::utc(), 1, noon(date(2024, 1, 9))).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Progress(ProgressError::InvalidPlan { .. })
    ));
}
