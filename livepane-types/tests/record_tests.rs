use livepane_types::{Record, RecordId, RecordKind, SelectionState, parse_payload};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

// ── Record ids ───────────────────────────────────────────────────

#[test]
fn record_id_roundtrips_through_display() {
    let id = RecordId::new(42);
    assert_eq!(id.to_string(), "42");
    assert_eq!("42".parse::<RecordId>().unwrap(), id);
}

#[test]
fn record_id_serializes_as_bare_integer() {
    let id = RecordId::new(7);
    assert_eq!(serde_json::to_value(id).unwrap(), json!(7));
    assert_eq!(
        serde_json::from_value::<RecordId>(json!(7)).unwrap(),
        id
    );
}

// ── Record kinds ─────────────────────────────────────────────────

#[test]
fn known_kinds_parse_case_insensitively() {
    assert_eq!(RecordKind::parse("document"), RecordKind::Document);
    assert_eq!(RecordKind::parse("Document"), RecordKind::Document);
    assert_eq!(RecordKind::parse("ASSET"), RecordKind::Asset);
}

#[test]
fn unknown_kind_is_preserved_not_rejected() {
    assert_eq!(
        RecordKind::parse("template"),
        RecordKind::Other("template".to_string())
    );
    assert_eq!(RecordKind::Other("template".into()).to_string(), "template");
}

#[test]
fn kind_display_matches_store_column() {
    assert_eq!(RecordKind::Document.to_string(), "document");
    assert_eq!(RecordKind::Asset.to_string(), "asset");
}

// ── Payload parsing ──────────────────────────────────────────────

#[test]
fn payload_parses_valid_json() {
    assert_eq!(
        parse_payload(Some(r#"{"text":"hi"}"#)),
        json!({"text": "hi"})
    );
}

#[test]
fn absent_payload_defaults_to_empty_object() {
    assert_eq!(parse_payload(None), json!({}));
    assert_eq!(parse_payload(Some("")), json!({}));
}

#[test]
fn malformed_payload_defaults_to_empty_object() {
    assert_eq!(parse_payload(Some("{not json")), json!({}));
    assert_eq!(parse_payload(Some("][")), json!({}));
}

proptest! {
    #[test]
    fn payload_parse_is_total(raw in ".*") {
        // Never panics; either parsed JSON or the empty-object default.
        let value = parse_payload(Some(&raw));
        if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
            prop_assert_eq!(value, json!({}));
        }
    }
}

// ── Records ──────────────────────────────────────────────────────

#[test]
fn record_builder_defaults() {
    let record = Record::new(RecordId::new(1), "index", RecordKind::Document);
    assert_eq!(record.payload, json!({}));
    assert_eq!(record.locator, "");

    let record = record
        .with_payload(json!({"text": "hello"}))
        .with_locator("/index");
    assert_eq!(record.payload["text"], "hello");
    assert_eq!(record.locator, "/index");
}

// ── Selection state ──────────────────────────────────────────────

#[test]
fn empty_selection_has_no_targets() {
    let selection = SelectionState::new();
    assert_eq!(selection.active_id, None);
    assert_eq!(selection.content_id, None);
}

#[test]
fn select_points_both_fields_at_one_record() {
    let mut selection = SelectionState::of(RecordId::new(3));
    assert_eq!(selection.active_id, Some(RecordId::new(3)));
    assert_eq!(selection.content_id, Some(RecordId::new(3)));

    selection.select(RecordId::new(9));
    assert_eq!(selection.active_id, Some(RecordId::new(9)));
    assert_eq!(selection.content_id, Some(RecordId::new(9)));
}
