use neon_core::{iso_to_millis, validate_timestamp, Provenance};

#[test]
fn accepts_iso_8601_literals_unchanged() {
    let valid = [
        "2025-01-18T12:00:00Z",
        "2025-01-18T12:00:00.000Z",
        "2025-01-18T12:00:00+00:00",
        "2025-01-18T12:00:00-05:00",
        "2025-01-18T12:00:00",
        "2025-01-18",
    ];
    for literal in valid {
        assert_eq!(validate_timestamp(literal).expect(literal), literal);
    }
}

#[test]
fn rejects_non_instants() {
    for literal in ["not-a-date", "2025-13-40T99:99:99Z", "12345678", ""] {
        let err = validate_timestamp(literal).expect_err(literal);
        assert_eq!(err.code(), "InvalidTimestamp");
        assert!(err.info().message.starts_with("Invalid ISO 8601 timestamp"));
    }
}

#[test]
fn equivalent_literals_share_an_instant() {
    let plain = iso_to_millis("2025-01-18T12:00:00Z").expect("plain");
    let millis = iso_to_millis("2025-01-18T12:00:00.000Z").expect("millis");
    let offset = iso_to_millis("2025-01-18T07:00:00-05:00").expect("offset");
    assert_eq!(plain, millis);
    assert_eq!(plain, offset);
    assert_eq!(plain, 1_737_201_600_000);
}

#[test]
fn provenance_round_trips_through_json() {
    let provenance = Provenance::new("run-7", "2025-01-18T12:00:00Z").with_seed("seed-7");
    let json = serde_json::to_string(&provenance).expect("serialize");
    let decoded: Provenance = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, provenance);

    let bare = Provenance::new("run-7", "2025-01-18T12:00:00Z");
    let value = serde_json::to_value(&bare).expect("serialize");
    assert!(value.get("seed").is_none());
}

#[test]
fn empty_explicit_seed_falls_back_to_derivation() {
    let derived = Provenance::new("run-7", "2025-01-18T12:00:00Z");
    let empty = derived.clone().with_seed("");
    assert_eq!(empty.explicit_seed(), None);
    assert_eq!(empty.derived_seed(), derived.derived_seed());
    assert_eq!(derived.derived_seed().len(), 64);
}
