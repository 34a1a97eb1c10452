//! Stateless read projections over the catalogue.
//!
//! # Responsibility
//! - Derive view-facing sequences (staleness suggestions, category
//!   filters, date keys) without mutating or persisting anything.
//!
//! # Invariants
//! - Output order is catalogue insertion order; nothing here sorts.
//! - Staleness uses strict inequality against `as_of - threshold_days`.

use crate::model::accessory::{AccessoryRecord, Category};
use crate::model::schedule::date_key;
use chrono::{Days, NaiveDate};

/// Default staleness window used by the today view.
pub const DEFAULT_STALE_THRESHOLD_DAYS: u64 = 14;
/// Default number of staleness suggestions shown.
pub const DEFAULT_STALE_LIMIT: usize = 4;

/// Category restriction for catalogue projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction; the full catalogue in order.
    All,
    /// Exact category match.
    Only(Category),
}

impl CategoryFilter {
    fn matches(self, record: &AccessoryRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.category == category,
        }
    }
}

/// Records not worn recently, up to `limit`, in insertion order.
///
/// A record qualifies when `last_worn` is `None` or strictly earlier than
/// `as_of - threshold_days`. A record worn exactly `threshold_days` ago
/// does not qualify.
pub fn stale_items(
    records: &[AccessoryRecord],
    as_of: NaiveDate,
    threshold_days: u64,
    limit: usize,
) -> Vec<&AccessoryRecord> {
    let cutoff = as_of.checked_sub_days(Days::new(threshold_days));
    records
        .iter()
        .filter(|record| match (record.last_worn, cutoff) {
            (None, _) => true,
            (Some(worn), Some(cutoff)) => worn < cutoff,
            // Cutoff underflowed the calendar; nothing can predate it.
            (Some(_), None) => false,
        })
        .take(limit)
        .collect()
}

/// Catalogue subset matching `filter`, in insertion order.
pub fn by_category(
    records: &[AccessoryRecord],
    filter: CategoryFilter,
) -> impl Iterator<Item = &AccessoryRecord> {
    records.iter().filter(move |record| filter.matches(record))
}

/// Schedule key for the given calendar day.
///
/// Callers pass the viewer's local date (`Local::now().date_naive()`); the
/// formatting matches schedule-index keys exactly, or lookups would
/// silently miss.
pub fn today_key(today: NaiveDate) -> String {
    date_key(today)
}
