//! Accessory domain model.
//!
//! # Responsibility
//! - Define the canonical catalogue record and its creation draft.
//! - Guard creation invariants (non-empty name and image).
//!
//! # Invariants
//! - `id` is stable and never reused for another accessory.
//! - `date_added` is set once at creation and never changes.
//! - `last_worn` caches the most recent schedule-on date; it is never
//!   recomputed from the schedule index and is not rolled back when an
//!   accessory is unscheduled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every catalogue record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccessoryId = Uuid;

/// Fixed category set for catalogue records.
///
/// Wire names match the persisted JSON values, including the historical
/// `"Hair Accessory"` spelling with a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Necklace,
    Earrings,
    Bracelet,
    Ring,
    Watch,
    Glasses,
    #[serde(rename = "Hair Accessory")]
    HairAccessory,
    Other,
}

impl Category {
    /// All categories in display order. The first entry is the draft default.
    pub const ALL: [Category; 8] = [
        Category::Necklace,
        Category::Earrings,
        Category::Bracelet,
        Category::Ring,
        Category::Watch,
        Category::Glasses,
        Category::HairAccessory,
        Category::Other,
    ];

    /// Wire/display name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Necklace => "Necklace",
            Category::Earrings => "Earrings",
            Category::Bracelet => "Bracelet",
            Category::Ring => "Ring",
            Category::Watch => "Watch",
            Category::Glasses => "Glasses",
            Category::HairAccessory => "Hair Accessory",
            Category::Other => "Other",
        }
    }

    /// Parses a wire/display name back into a category.
    pub fn parse(value: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Necklace
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical catalogue record for one physical accessory.
///
/// Serialized field names stay camelCase to match the historical stored
/// shape (`dateAdded`, `lastWorn`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryRecord {
    /// Stable global ID used for schedule references.
    pub id: AccessoryId,
    /// Non-empty display name.
    pub name: String,
    pub category: Category,
    /// Opaque text-encoded photo blob (typically a base64 data URI).
    /// The core never inspects it; it must round-trip byte for byte.
    pub image: String,
    pub favorite: bool,
    /// Free-form notes, empty when unset.
    pub notes: String,
    /// Creation timestamp, immutable after construction.
    pub date_added: DateTime<Utc>,
    /// Date of the most recent schedule-on event, `None` until first worn.
    pub last_worn: Option<NaiveDate>,
}

/// Creation input for a catalogue record.
///
/// Only `name` and `image` are required; the remaining fields fall back to
/// defaults (`Category::Necklace`, not favorite, empty notes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessoryDraft {
    pub name: String,
    pub image: String,
    pub category: Option<Category>,
    pub notes: String,
}

impl AccessoryDraft {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            category: None,
            notes: String::new(),
        }
    }
}

/// Validation failure for [`AccessoryDraft`] submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `image` is empty or whitespace-only.
    EmptyImage,
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "accessory name must not be empty"),
            Self::EmptyImage => write!(f, "accessory image must not be empty"),
        }
    }
}

impl Error for DraftValidationError {}

impl AccessoryRecord {
    /// Builds a new record from a validated draft.
    ///
    /// # Invariants
    /// - A fresh v4 id is assigned; callers cannot supply one.
    /// - `last_worn` starts as `None`.
    ///
    /// # Errors
    /// Returns [`DraftValidationError`] when `name` or `image` is empty
    /// after trimming. No partially constructed record escapes.
    pub fn from_draft(
        draft: AccessoryDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DraftValidationError> {
        if draft.name.trim().is_empty() {
            return Err(DraftValidationError::EmptyName);
        }
        if draft.image.trim().is_empty() {
            return Err(DraftValidationError::EmptyImage);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category.unwrap_or_default(),
            image: draft.image,
            favorite: false,
            notes: draft.notes,
            date_added: created_at,
            last_worn: None,
        })
    }

    /// Records a schedule-on event date.
    ///
    /// Overwrites unconditionally; older cached dates are not compared.
    pub fn mark_worn(&mut self, date: NaiveDate) {
        self.last_worn = Some(date);
    }
}
