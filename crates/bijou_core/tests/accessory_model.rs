use bijou_core::{AccessoryDraft, AccessoryRecord, Category, DraftValidationError};
use chrono::{TimeZone, Utc};
use std::collections::HashSet;

#[test]
fn from_draft_sets_defaults() {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let record =
        AccessoryRecord::from_draft(AccessoryDraft::new("Pearl necklace", "data:blob"), created_at)
            .unwrap();

    assert!(!record.id.is_nil());
    assert_eq!(record.name, "Pearl necklace");
    assert_eq!(record.category, Category::Necklace);
    assert_eq!(record.image, "data:blob");
    assert!(!record.favorite);
    assert_eq!(record.notes, "");
    assert_eq!(record.date_added, created_at);
    assert_eq!(record.last_worn, None);
}

#[test]
fn from_draft_keeps_explicit_category_and_notes() {
    let mut draft = AccessoryDraft::new("Aviators", "data:blob");
    draft.category = Some(Category::Glasses);
    draft.notes = "gift from mum".to_string();

    let record = AccessoryRecord::from_draft(draft, Utc::now()).unwrap();
    assert_eq!(record.category, Category::Glasses);
    assert_eq!(record.notes, "gift from mum");
}

#[test]
fn from_draft_rejects_missing_required_fields() {
    let err = AccessoryRecord::from_draft(AccessoryDraft::new("  ", "data:blob"), Utc::now())
        .unwrap_err();
    assert_eq!(err, DraftValidationError::EmptyName);

    let err =
        AccessoryRecord::from_draft(AccessoryDraft::new("Ring", "\t\n"), Utc::now()).unwrap_err();
    assert_eq!(err, DraftValidationError::EmptyImage);
}

#[test]
fn fresh_ids_are_unique() {
    let mut seen = HashSet::new();
    for index in 0..64 {
        let record = AccessoryRecord::from_draft(
            AccessoryDraft::new(format!("item-{index}"), "data:blob"),
            Utc::now(),
        )
        .unwrap();
        assert!(seen.insert(record.id), "duplicate id at index {index}");
    }
}

#[test]
fn category_serialization_uses_expected_wire_names() {
    let json = serde_json::to_value(Category::HairAccessory).unwrap();
    assert_eq!(json, "Hair Accessory");

    let decoded: Category = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, Category::HairAccessory);

    for category in Category::ALL {
        assert_eq!(Category::parse(category.as_str()), Some(category));
    }
    assert_eq!(Category::parse("Tiara"), None);
}

#[test]
fn record_serialization_round_trips_exactly() {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let mut record = AccessoryRecord::from_draft(
        AccessoryDraft::new("Pearl necklace", "data:image/png;base64,iVBORw0KGgo="),
        created_at,
    )
    .unwrap();
    record.mark_worn(chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["name"], "Pearl necklace");
    assert_eq!(json["category"], "Necklace");
    assert_eq!(json["image"], "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(json["lastWorn"], "2024-05-01");

    let decoded: AccessoryRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}
