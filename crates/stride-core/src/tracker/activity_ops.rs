//! Activity and entry operations for the Tracker.

use super::Tracker;
use crate::{
    display::Entries,
    error::{Result, TrackerError},
    models::{Activity, ActivityEntry, EntryFilter},
    params::{CreateActivity, Id, ListEntries, LogEntry},
};

impl Tracker {
    /// Adds an activity to the catalogue.
    pub async fn create_activity(&self, params: &CreateActivity) -> Result<Activity> {
        let params = params.clone();
        self.with_database(move |db| db.create_activity(&params))
            .await
    }

    /// Lists the activity catalogue.
    pub async fn list_activities(&self) -> Result<Vec<Activity>> {
        self.with_database(|db| db.list_activities()).await
    }

    /// Records an entry for an activity.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::ActivityNotFound` for unknown activities and
    /// `TrackerError::InvalidInput` for a zero quantity.
    pub async fn log_entry(&self, params: &LogEntry) -> Result<ActivityEntry> {
        let params = params.clone();
        self.with_database(move |db| db.log_entry(&params)).await
    }

    /// Lists the entries of one activity within an optional date range.
    pub async fn list_entries(&self, params: &ListEntries) -> Result<Entries> {
        let activity_id = params.activity_id.clone();
        let filter = EntryFilter::from(params);
        self.with_database(move |db| {
            if !db.activity_exists(&activity_id)? {
                return Err(TrackerError::ActivityNotFound { id: activity_id });
            }
            db.list_entries(&filter)
        })
        .await
        .map(Entries)
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::EntryNotFound` when no entry has the given ID.
    pub async fn delete_entry(&self, params: &Id) -> Result<()> {
        let entry_id = params.id;
        self.with_database(move |db| {
            if db.delete_entry(entry_id)? {
                Ok(())
            } else {
                Err(TrackerError::EntryNotFound { id: entry_id })
            }
        })
        .await
    }
}
