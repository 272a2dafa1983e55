use neon_core::{canonicalize, from_json_slice, to_canonical_json_bytes, Provenance};
use serde_json::{json, Value};

#[test]
fn nested_keys_are_sorted() {
    let value = json!({"b": {"z": 1, "a": [ {"y": 2, "x": 1} ]}, "a": null});
    let bytes = to_canonical_json_bytes(&value).expect("canonical bytes");
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"a":null,"b":{"a":[{"x":1,"y":2}],"z":1}}"#
    );
}

#[test]
fn canonicalize_keeps_scalars_and_array_order() {
    let value = json!([3, "two", 1.5, true]);
    assert_eq!(canonicalize(value.clone()), value);
}

#[test]
fn decodes_provenance_from_bytes() {
    let raw = br#"{"timestamp_iso":"2025-01-18T12:00:00Z","run_id":"r1"}"#;
    let provenance: Provenance = from_json_slice(raw).expect("decode");
    assert_eq!(provenance, Provenance::new("r1", "2025-01-18T12:00:00Z"));
}

#[test]
fn malformed_bytes_report_code() {
    let err = from_json_slice::<Value>(b"{\"run_id\":").expect_err("truncated");
    assert_eq!(err.code(), "MalformedPayload");
    assert_eq!(err.family(), "serde");
}
