//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Activity, ActivityEntry, PlanSummary};

/// Newtype wrapper for displaying plan summaries.
///
/// # Examples
///
/// ```rust
/// use stride_core::display::PlanSummaries;
///
/// assert_eq!(PlanSummaries(vec![]).to_string(), "No plans found.\n");
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying activity entries, ordered as given.
#[derive(Debug)]
pub struct Entries(pub Vec<ActivityEntry>);

impl Entries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all quantities in the collection.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|e| u64::from(e.quantity)).sum()
    }
}

impl IntoIterator for Entries {
    type Item = ActivityEntry;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Entries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No entries found.");
        }
        for entry in &self.0 {
            write!(f, "{entry}")?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {} over {} entries", self.total(), self.0.len())
    }
}

/// Newtype wrapper for displaying the activity catalogue.
pub struct Activities(pub Vec<Activity>);

impl fmt::Display for Activities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No activities found.");
        }
        for activity in &self.0 {
            write!(f, "{activity}")?;
        }
        Ok(())
    }
}
