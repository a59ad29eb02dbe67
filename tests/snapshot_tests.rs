use form_sync::form::detector::FormType;
use form_sync::form::extractor::ExtractOptions;
use form_sync::form::field_model::FieldDescriptor;
use form_sync::form::snapshot::{FieldPayload, FormSnapshot, schema_drift, schema_fingerprint};

use crate::common::fixtures::{type1_doc, type2_doc};

mod common;

// ============================================================================
// Fingerprint
// ============================================================================

#[test]
fn fingerprint_ignores_answers() {
    let a = vec![FieldDescriptor::text("Gallons pumped", "1000")];
    let b = vec![FieldDescriptor::text("Gallons pumped", "250")];

    assert_eq!(
        schema_fingerprint(FormType::Type1, &a),
        schema_fingerprint(FormType::Type1, &b)
    );
}

#[test]
fn fingerprint_tracks_names_kinds_and_layout() {
    let base = vec![FieldDescriptor::text("Gallons pumped", "")];
    let renamed = vec![FieldDescriptor::text("Gallons removed", "")];
    let retyped = vec![FieldDescriptor::textarea("Gallons pumped", "")];

    let fp = schema_fingerprint(FormType::Type1, &base);
    assert_ne!(fp, schema_fingerprint(FormType::Type1, &renamed));
    assert_ne!(fp, schema_fingerprint(FormType::Type1, &retyped));
    assert_ne!(fp, schema_fingerprint(FormType::Type2, &base));
    assert_eq!(fp.len(), 40, "Hex-encoded SHA-1");
}

#[test]
fn capture_records_layout_and_fingerprint() {
    let doc = type2_doc();
    let snapshot = FormSnapshot::capture(&doc, &ExtractOptions::default());

    assert_eq!(snapshot.form_type, FormType::Type2);
    assert_eq!(snapshot.fields.len(), 8);
    assert_eq!(
        snapshot.fingerprint,
        schema_fingerprint(FormType::Type2, &snapshot.fields)
    );
}

// ============================================================================
// Payloads
// ============================================================================

#[test]
fn payload_accepts_snapshot_or_bare_list() {
    let snapshot = FormSnapshot::capture(&type1_doc(), &ExtractOptions::default());
    let json = serde_json::to_string(&snapshot).expect("serialize");

    let payload: FieldPayload = serde_json::from_str(&json).expect("snapshot payload");
    assert_eq!(payload.fingerprint(), Some(snapshot.fingerprint.as_str()));
    assert_eq!(payload.into_fields(), snapshot.fields);

    let bare = r#"[{"type": "select", "name": "Tank Condition", "selected": "Poor"}]"#;
    let payload: FieldPayload = serde_json::from_str(bare).expect("bare payload");
    assert_eq!(payload.fingerprint(), None);
    assert_eq!(
        payload.into_fields(),
        vec![FieldDescriptor::choose("Tank Condition", "Poor")]
    );
}

#[test]
fn descriptor_json_omits_absent_keys() {
    let json = serde_json::to_value(FieldDescriptor::text("Lid", "ok")).expect("serialize");
    assert_eq!(json, serde_json::json!({"type": "text", "name": "Lid", "value": "ok"}));
}

// ============================================================================
// Drift
// ============================================================================

#[test]
fn drift_lists_both_sides_once_in_order() {
    let records = vec![
        FieldDescriptor::text("Baffle", "a"),
        FieldDescriptor::text("Riser", "b"),
        FieldDescriptor::text("Riser", "c"),
        FieldDescriptor::text("Lid", "d"),
    ];
    let current = vec![
        FieldDescriptor::text("Lid", ""),
        FieldDescriptor::text("Alarm", ""),
        FieldDescriptor::text("Baffle", ""),
        FieldDescriptor::text("Alarm", ""),
    ];

    let drift = schema_drift(&records, &current);
    assert_eq!(drift.missing_in_form, vec!["Riser"]);
    assert_eq!(drift.new_in_form, vec!["Alarm"]);
    assert!(!drift.is_empty());
}

#[test]
fn no_drift_against_own_scrape() {
    let fields = FormSnapshot::capture(&type1_doc(), &ExtractOptions::default()).fields;
    assert!(schema_drift(&fields, &fields).is_empty());
}
