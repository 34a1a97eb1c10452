//! Wardrobe store: catalogue + schedule behind one mutation boundary.
//!
//! # Responsibility
//! - Own the in-memory catalogue and schedule index.
//! - Mirror every effective mutation to the storage adapter, best effort.
//! - Keep the schedule-toggle / `last_worn` update atomic for callers.
//!
//! # Invariants
//! - All mutation goes through `&mut self` methods; no intermediate state
//!   between a schedule-on and its `last_worn` update is observable.
//! - Persistence failures never propagate through a mutator's return path;
//!   in-memory state stays authoritative for the session.
//! - Malformed or absent stored data degrades to empty collections at
//!   load time, never to a startup error.

use crate::model::accessory::{
    AccessoryDraft, AccessoryId, AccessoryRecord, Category, DraftValidationError,
};
use crate::model::schedule::{ScheduleIndex, ScheduleToggle};
use crate::storage::{
    BoxedStorage, StorageAdapter, StorageError, StorageResult, CATALOGUE_KEY, SCHEDULE_KEY,
};
use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use serde::de::DeserializeOwned;

/// Non-fatal observer for swallowed persistence failures.
///
/// The UI collaborator may surface these as a notification; the store has
/// already logged them and moved on.
pub type PersistErrorHook = Box<dyn Fn(&StorageError) + Send>;

/// The one shared store backing the collection, calendar and today views.
pub struct Wardrobe {
    catalogue: Vec<AccessoryRecord>,
    schedule: ScheduleIndex,
    storage: BoxedStorage,
    on_persist_error: Option<PersistErrorHook>,
}

impl Wardrobe {
    /// Opens a store over the given adapter, loading both collections.
    ///
    /// Absent keys initialize to empty collections. Values that fail to
    /// decode are discarded with a warning, so the application always
    /// starts in a valid state.
    pub fn open(storage: BoxedStorage) -> Self {
        let catalogue: Vec<AccessoryRecord> = load_collection(storage.as_ref(), CATALOGUE_KEY);
        let schedule: ScheduleIndex = load_collection(storage.as_ref(), SCHEDULE_KEY);

        info!(
            "event=wardrobe_open module=store status=ok records={} scheduled_dates={}",
            catalogue.len(),
            schedule.len()
        );

        Self {
            catalogue,
            schedule,
            storage,
            on_persist_error: None,
        }
    }

    /// Registers the persistence failure observer.
    pub fn set_persist_error_hook(&mut self, hook: PersistErrorHook) {
        self.on_persist_error = Some(hook);
    }

    // --- catalogue operations -------------------------------------------

    /// Validates a draft and appends the new record to the catalogue.
    ///
    /// # Errors
    /// Returns [`DraftValidationError`] without mutating or saving when the
    /// draft is missing its name or image.
    pub fn add(&mut self, draft: AccessoryDraft) -> Result<AccessoryRecord, DraftValidationError> {
        let record = AccessoryRecord::from_draft(draft, Utc::now())?;
        self.catalogue.push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Removes the record with the given id.
    ///
    /// Idempotent: removing an unknown id is a no-op. Schedule entries
    /// referencing the id are left in place and filtered at read time.
    pub fn remove(&mut self, id: AccessoryId) {
        let before = self.catalogue.len();
        self.catalogue.retain(|record| record.id != id);
        if self.catalogue.len() != before {
            self.persist();
        }
    }

    /// Flips the favorite flag. Unknown ids are a no-op.
    pub fn toggle_favorite(&mut self, id: AccessoryId) {
        if let Some(record) = self.catalogue.iter_mut().find(|record| record.id == id) {
            record.favorite = !record.favorite;
            self.persist();
        }
    }

    /// Overwrites `last_worn` unconditionally. Unknown ids are a no-op.
    pub fn set_last_worn(&mut self, id: AccessoryId, date: NaiveDate) {
        if let Some(record) = self.catalogue.iter_mut().find(|record| record.id == id) {
            record.mark_worn(date);
            self.persist();
        }
    }

    /// Lazy, restartable sequence of records in insertion order,
    /// optionally restricted to one category.
    pub fn list(&self, filter: Option<Category>) -> impl Iterator<Item = &AccessoryRecord> {
        self.catalogue
            .iter()
            .filter(move |record| filter.map_or(true, |category| record.category == category))
    }

    /// Looks up a single record by id.
    pub fn get(&self, id: AccessoryId) -> Option<&AccessoryRecord> {
        self.catalogue.iter().find(|record| record.id == id)
    }

    /// Full catalogue slice in insertion order, for the query layer.
    pub fn records(&self) -> &[AccessoryRecord] {
        &self.catalogue
    }

    // --- schedule operations --------------------------------------------

    /// Toggles whether `id` is scheduled for `date`.
    ///
    /// Scheduling on also records `last_worn = date`; scheduling off leaves
    /// `last_worn` untouched (the cache reflects the last schedule-on
    /// event, deliberately). Both steps and the save happen inside this one
    /// call, so no caller can observe a half-applied toggle.
    ///
    /// Ids without a live record may still be scheduled; the `last_worn`
    /// update is then silently skipped and projections drop the orphan.
    pub fn toggle_schedule(&mut self, date: NaiveDate, id: AccessoryId) -> ScheduleToggle {
        let outcome = self.schedule.toggle(date, id);
        if outcome == ScheduleToggle::On {
            if let Some(record) = self.catalogue.iter_mut().find(|record| record.id == id) {
                record.mark_worn(date);
            }
        }
        self.persist();
        outcome
    }

    /// Records scheduled for `date`, in assignment order.
    ///
    /// Identifiers that no longer resolve to a live record are silently
    /// dropped.
    pub fn items_for(&self, date: NaiveDate) -> impl Iterator<Item = &AccessoryRecord> {
        self.schedule
            .ids_for(date)
            .iter()
            .filter_map(|id| self.catalogue.iter().find(|record| record.id == *id))
    }

    /// Membership test for the schedule index.
    pub fn is_scheduled(&self, date: NaiveDate, id: AccessoryId) -> bool {
        self.schedule.contains(date, id)
    }

    /// Read access to the schedule index, for the query layer.
    pub fn schedule(&self) -> &ScheduleIndex {
        &self.schedule
    }

    // --- persistence ----------------------------------------------------

    /// Explicit save of both collections, surfacing the first failure.
    ///
    /// Intended for teardown; routine mutations save best-effort instead.
    pub fn flush(&mut self) -> StorageResult<()> {
        let catalogue = encode(&self.catalogue)?;
        let schedule = encode(&self.schedule)?;
        self.storage.save(CATALOGUE_KEY, &catalogue)?;
        self.storage.save(SCHEDULE_KEY, &schedule)?;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(err) = self.flush() {
            error!(
                "event=wardrobe_persist module=store status=error error={}",
                err
            );
            if let Some(hook) = &self.on_persist_error {
                hook(&err);
            }
        }
    }
}

fn load_collection<T>(storage: &dyn StorageAdapter, key: &str) -> T
where
    T: Default + DeserializeOwned,
{
    let stored = match storage.load(key) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(
                "event=wardrobe_load module=store status=fallback key={} error={}",
                key, err
            );
            return T::default();
        }
    };

    match stored {
        Some(text) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=wardrobe_load module=store status=fallback key={} error_code=malformed_value error={}",
                    key, err
                );
                T::default()
            }
        },
        None => T::default(),
    }
}

fn encode<T: serde::Serialize>(value: &T) -> StorageResult<String> {
    serde_json::to_string(value)
        .map_err(|err| StorageError::Backend(format!("serialization failed: {err}")))
}
