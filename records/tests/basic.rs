use records::{ItemRecord, ParameterRecord, RecordError};
use serde_json::json;

fn sample() -> Vec<ItemRecord> {
    vec![
        ItemRecord {
            type_name: "Widget".to_string(),
            name: "Widget".to_string(),
            parameters: vec![
                ParameterRecord {
                    kind: "number".to_string(),
                    name: "Width".to_string(),
                    value: json!(12.5),
                },
                ParameterRecord {
                    kind: "checkbox".to_string(),
                    name: "Enabled".to_string(),
                    value: json!(true),
                },
            ],
        },
        ItemRecord {
            type_name: "Camera".to_string(),
            name: "Cam-07".to_string(),
            parameters: Vec::new(),
        },
    ]
}

#[test]
fn save_and_load_preserves_order_and_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.json");

    records::save_to_file(&sample(), &path).expect("save");
    let loaded = records::load_from_file(&path).expect("load");

    assert!(loaded.issues.is_empty());
    let names: Vec<_> = loaded.records.iter().map(|(_, r)| r.name.as_str()).collect();
    assert_eq!(names, ["Widget", "Cam-07"]);
    assert_eq!(loaded.records[0].1, sample()[0]);
    assert_eq!(
        loaded.records[0].1.parameter("Width").map(|p| p.value.clone()),
        Some(json!(12.5))
    );
}

#[test]
fn encoded_form_uses_type_discriminator() {
    let text = records::encode(&sample()).expect("encode");
    let raw: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(raw[0]["type"], "Widget");
    assert_eq!(raw[0]["parameters"][1]["name"], "Enabled");
}

#[test]
fn bad_record_is_reported_and_rest_kept() {
    let text = r#"[
        {"type": "Widget", "name": "a", "parameters": []},
        {"name": "missing type"},
        {"type": "Widget", "name": "b"}
    ]"#;
    let decoded = records::decode(text).expect("decode");
    assert_eq!(decoded.records.len(), 2);
    assert_eq!(decoded.records[1].0, 2);
    assert_eq!(decoded.issues.len(), 1);
    assert_eq!(decoded.issues[0].index, 1);
}

#[test]
fn non_sequence_document_is_rejected() {
    let err = records::decode(r#"{"type": "Widget"}"#).unwrap_err();
    assert!(matches!(err, RecordError::NotASequence));

    let err = records::decode("not json").unwrap_err();
    assert!(matches!(err, RecordError::Json(_)));
}
