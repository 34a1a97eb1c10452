//! Date-indexed schedule of worn accessories.
//!
//! # Responsibility
//! - Map calendar-date keys to the set of accessory ids worn that day.
//! - Own toggle membership semantics and date-key formatting.
//!
//! # Invariants
//! - Keys are `YYYY-MM-DD` strings produced by [`date_key`]; any other
//!   format silently misses on lookup.
//! - An id appears at most once per date.
//! - A date whose last id is removed loses its key; absent and empty
//!   entries are indistinguishable to readers.

use crate::model::accessory::AccessoryId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a calendar date as a schedule key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a schedule key back into a calendar date.
///
/// Returns `None` for anything that is not a valid `YYYY-MM-DD` date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Outcome of a schedule toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleToggle {
    /// The id was added to the date's set.
    On,
    /// The id was removed from the date's set.
    Off,
}

/// Date-keyed index of scheduled accessory ids.
///
/// Serializes as a plain JSON object (`{"2024-05-01": ["..."], ...}`) so
/// stored data matches the historical wire shape exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleIndex {
    entries: BTreeMap<String, Vec<AccessoryId>>,
}

impl ScheduleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles membership of `id` for `date`.
    ///
    /// Adds the id when absent, removes it when present. Removing the last
    /// id for a date drops the whole entry.
    pub fn toggle(&mut self, date: NaiveDate, id: AccessoryId) -> ScheduleToggle {
        let key = date_key(date);
        let ids = self.entries.entry(key.clone()).or_default();

        if let Some(position) = ids.iter().position(|existing| *existing == id) {
            ids.remove(position);
            if ids.is_empty() {
                self.entries.remove(&key);
            }
            ScheduleToggle::Off
        } else {
            ids.push(id);
            ScheduleToggle::On
        }
    }

    /// Returns whether `id` is scheduled for `date`.
    pub fn contains(&self, date: NaiveDate, id: AccessoryId) -> bool {
        self.entries
            .get(&date_key(date))
            .is_some_and(|ids| ids.contains(&id))
    }

    /// Ids scheduled for `date`, in assignment order.
    pub fn ids_for(&self, date: NaiveDate) -> &[AccessoryId] {
        self.entries
            .get(&date_key(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of dates with at least one scheduled id.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
