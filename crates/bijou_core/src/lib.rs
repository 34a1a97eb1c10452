//! Core domain logic for the bijou accessory tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod wardrobe;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::accessory::{
    AccessoryDraft, AccessoryId, AccessoryRecord, Category, DraftValidationError,
};
pub use model::schedule::{date_key, parse_date_key, ScheduleIndex, ScheduleToggle};
pub use query::{
    by_category, stale_items, today_key, CategoryFilter, DEFAULT_STALE_LIMIT,
    DEFAULT_STALE_THRESHOLD_DAYS,
};
pub use storage::{
    BoxedStorage, MemoryStorage, SqliteStorage, StorageAdapter, StorageError, StorageResult,
    CATALOGUE_KEY, SCHEDULE_KEY,
};
pub use wardrobe::{PersistErrorHook, Wardrobe};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
