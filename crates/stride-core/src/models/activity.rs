//! Activities and the entries recorded against them.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Something a user does and records, e.g. `run` measured in `km`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    /// Short identifier chosen by the user (`run`, `stretch`)
    pub id: String,

    /// Human readable name
    pub title: String,

    /// Unit the quantity is measured in (`km`, `minutes`, `times`)
    pub measure: String,

    /// Timestamp when the activity was created (UTC)
    pub created_at: Timestamp,
}

/// A recorded quantity of an activity performed on a given date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEntry {
    /// Unique identifier for the entry
    pub id: u64,

    /// Activity the entry belongs to
    pub activity_id: String,

    /// Quantity performed
    pub quantity: u32,

    /// Civil date the activity was performed on
    pub date: Date,

    /// Timestamp when the entry was recorded (UTC)
    pub created_at: Timestamp,
}
