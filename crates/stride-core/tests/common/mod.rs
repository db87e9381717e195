#![allow(dead_code)]

use jiff::{civil::Date, tz::TimeZone, Timestamp, ToSpan};
use stride_core::{
    params::{AttachActivity, CreateActivity, LogEntry},
    Plan, Tracker, TrackerBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test tracker evaluating in UTC
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_time_zone(TimeZone::UTC)
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Creates the activity if needed and attaches it to the plan.
pub async fn attach(tracker: &Tracker, plan: &Plan, activity_id: &str) -> Plan {
    let known = tracker
        .list_activities()
        .await
        .expect("Failed to list activities")
        .iter()
        .any(|a| a.id == activity_id);
    if !known {
        tracker
            .create_activity(&CreateActivity {
                id: activity_id.to_string(),
                title: activity_id.to_string(),
                measure: "times".to_string(),
            })
            .await
            .expect("Failed to create activity");
    }
    tracker
        .attach_activity(&AttachActivity {
            plan_id: plan.id,
            activity_id: activity_id.to_string(),
        })
        .await
        .expect("Failed to attach activity")
}

pub async fn log(tracker: &Tracker, activity_id: &str, date: Date, quantity: u32) {
    tracker
        .log_entry(&LogEntry {
            activity_id: activity_id.to_string(),
            quantity,
            date,
        })
        .await
        .expect("Failed to log entry");
}

/// Civil date of the plan's creation in UTC.
pub fn start_of(plan: &Plan) -> Date {
    plan.created_at.to_zoned(TimeZone::UTC).date()
}

/// An instant `days` whole days after the plan was created.
pub fn days_after(plan: &Plan, days: i64) -> Timestamp {
    plan.created_at
        .checked_add((days * 24).hours())
        .expect("timestamp in range")
}
