//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All store access goes through one process-global lock; the
//!   schedule-toggle + `last_worn` sequence is not safe under interleaving.

use bijou_core::db::open_db;
use bijou_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_date_key,
    ping as ping_inner, stale_items, today_key as today_key_inner, AccessoryDraft, AccessoryId,
    AccessoryRecord, Category, ScheduleToggle, SqliteStorage, Wardrobe, DEFAULT_STALE_LIMIT,
    DEFAULT_STALE_THRESHOLD_DAYS,
};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const STORE_DB_FILE_NAME: &str = "bijou_store.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: Mutex<Option<Wardrobe>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the store database path and opens the process-global store.
///
/// Operations called before `init_store` fall back to `BIJOU_DB_PATH` or a
/// temp-dir default, after which the path can no longer be changed.
///
/// # FFI contract
/// - Sync call; opens the database and runs pending migrations.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "init_store requires a non-empty db_path".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let effective = STORE_DB_PATH.get_or_init(|| requested.clone());
    if effective != &requested {
        return format!("store already initialized at {}", effective.display());
    }
    match with_store(|_| ()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Catalogue record projection for result display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryView {
    /// Stable record ID in string form.
    pub id: String,
    pub name: String,
    /// Category wire name (e.g. `Necklace`, `Hair Accessory`).
    pub category: String,
    /// Opaque text-encoded photo blob, passed through untouched.
    pub image: String,
    pub favorite: bool,
    pub notes: String,
    /// Creation timestamp in epoch milliseconds.
    pub date_added_epoch_ms: i64,
    /// `YYYY-MM-DD` of the most recent schedule-on event, if any.
    pub last_worn: Option<String>,
}

/// Generic action response envelope for command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional affected record ID.
    pub accessory_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, accessory_id: String) -> Self {
        Self {
            ok: true,
            accessory_id: Some(accessory_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            accessory_id: None,
            message: message.into(),
        }
    }
}

/// List response envelope for read projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// Projected records (empty when no matches).
    pub items: Vec<AccessoryView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl ListResponse {
    fn of(items: Vec<AccessoryView>) -> Self {
        let message = if items.is_empty() {
            "No accessories.".to_string()
        } else {
            format!("{} record(s).", items.len())
        };
        Self { items, message }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Creates a catalogue record.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created record ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn accessory_add(
    name: String,
    image: String,
    category: Option<String>,
    notes: Option<String>,
) -> ActionResponse {
    let category = match category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Category::parse(raw) {
            Some(parsed) => Some(parsed),
            None => return ActionResponse::failure(format!("unknown category: {raw}")),
        },
    };
    let mut draft = AccessoryDraft::new(name, image);
    draft.category = category;
    draft.notes = notes.unwrap_or_default();

    let outcome = with_store(move |wardrobe| wardrobe.add(draft));
    match outcome {
        Ok(Ok(record)) => ActionResponse::success("Accessory added.", record.id.to_string()),
        Ok(Err(err)) => ActionResponse::failure(format!("accessory_add rejected: {err}")),
        Err(err) => ActionResponse::failure(format!("accessory_add failed: {err}")),
    }
}

/// Removes a catalogue record. Unknown ids are a silent no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn accessory_remove(id: String) -> ActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(err),
    };
    match with_store(|wardrobe| wardrobe.remove(id)) {
        Ok(()) => ActionResponse::success("Accessory removed.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("accessory_remove failed: {err}")),
    }
}

/// Flips the favorite flag. Unknown ids are a silent no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn accessory_toggle_favorite(id: String) -> ActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(err),
    };
    match with_store(|wardrobe| wardrobe.toggle_favorite(id)) {
        Ok(()) => ActionResponse::success("Favorite toggled.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("accessory_toggle_favorite failed: {err}")),
    }
}

/// Toggles a record's schedule assignment on a calendar day.
///
/// Scheduling on also stamps the record's `last_worn`; toggling back off
/// leaves that stamp in place.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `date`: `YYYY-MM-DD`.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_toggle(date: String, id: String) -> ActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(err),
    };
    let day = match parse_day(&date) {
        Ok(day) => day,
        Err(err) => return ActionResponse::failure(err),
    };
    match with_store(|wardrobe| wardrobe.toggle_schedule(day, id)) {
        Ok(ScheduleToggle::On) => ActionResponse::success("Scheduled.", id.to_string()),
        Ok(ScheduleToggle::Off) => ActionResponse::success("Unscheduled.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("schedule_toggle failed: {err}")),
    }
}

/// Lists the catalogue, optionally narrowed to one category wire name.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Insertion order is preserved.
#[flutter_rust_bridge::frb(sync)]
pub fn accessory_list(category: Option<String>) -> ListResponse {
    let filter = match category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Category::parse(raw) {
            Some(parsed) => Some(parsed),
            None => return ListResponse::failure(format!("unknown category: {raw}")),
        },
    };
    match with_store(|wardrobe| wardrobe.list(filter).map(to_view).collect::<Vec<_>>()) {
        Ok(items) => ListResponse::of(items),
        Err(err) => ListResponse::failure(format!("accessory_list failed: {err}")),
    }
}

/// Records scheduled on a calendar day, in assignment order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Assignments pointing at deleted records are filtered out.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_items_for(date: String) -> ListResponse {
    let day = match parse_day(&date) {
        Ok(day) => day,
        Err(err) => return ListResponse::failure(err),
    };
    match with_store(|wardrobe| wardrobe.items_for(day).map(to_view).collect::<Vec<_>>()) {
        Ok(items) => ListResponse::of(items),
        Err(err) => ListResponse::failure(format!("schedule_items_for failed: {err}")),
    }
}

/// Suggests records not worn recently, relative to the local calendar date.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns at most the default suggestion limit, in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn stale_suggestions() -> ListResponse {
    let as_of = Local::now().date_naive();
    let outcome = with_store(|wardrobe| {
        stale_items(
            wardrobe.records(),
            as_of,
            DEFAULT_STALE_THRESHOLD_DAYS,
            DEFAULT_STALE_LIMIT,
        )
        .into_iter()
        .map(to_view)
        .collect::<Vec<_>>()
    });
    match outcome {
        Ok(items) => ListResponse::of(items),
        Err(err) => ListResponse::failure(format!("stale_suggestions failed: {err}")),
    }
}

/// Schedule key for the viewer's local calendar date.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a `YYYY-MM-DD` string.
#[flutter_rust_bridge::frb(sync)]
pub fn today_key() -> String {
    today_key_inner(Local::now().date_naive())
}

fn parse_id(raw: &str) -> Result<AccessoryId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid accessory id: {raw}"))
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date_key(raw.trim())
        .ok_or_else(|| format!("invalid date key (expected YYYY-MM-DD): {raw}"))
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("BIJOU_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn open_store(db_path: &Path) -> Result<Wardrobe, String> {
    let conn = open_db(db_path).map_err(|err| format!("store DB open failed: {err}"))?;
    let storage =
        SqliteStorage::try_new(conn).map_err(|err| format!("store init failed: {err}"))?;
    Ok(Wardrobe::open(Box::new(storage)))
}

fn with_store<T>(f: impl FnOnce(&mut Wardrobe) -> T) -> Result<T, String> {
    let mut guard = STORE
        .lock()
        .map_err(|_| "store lock poisoned".to_string())?;
    if guard.is_none() {
        let path = resolve_store_db_path();
        match open_store(&path) {
            Ok(wardrobe) => *guard = Some(wardrobe),
            Err(err) => {
                log::warn!(
                    "event=store_open module=ffi::api status=error path={} error={err}",
                    path.display()
                );
                return Err(err);
            }
        }
    }
    match guard.as_mut() {
        Some(wardrobe) => Ok(f(wardrobe)),
        None => Err("store unavailable".to_string()),
    }
}

fn to_view(record: &AccessoryRecord) -> AccessoryView {
    AccessoryView {
        id: record.id.to_string(),
        name: record.name.clone(),
        category: record.category.as_str().to_string(),
        image: record.image.clone(),
        favorite: record.favorite,
        notes: record.notes.clone(),
        date_added_epoch_ms: record.date_added.timestamp_millis(),
        last_worn: record.last_worn.map(bijou_core::date_key),
    }
}
