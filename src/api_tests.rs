use crate::api::{ReportId, StoreId};

#[test]
fn test_store_id_new() {
    let id = StoreId::new("abc-123");
    assert_eq!(id.value(), "abc-123");
}

#[test]
fn test_store_id_equality() {
    let id1 = StoreId::new("store-1");
    let id2 = StoreId::new("store-1");
    let id3 = StoreId::new("store-2");

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
}

#[test]
fn test_store_id_from_str() {
    let id: StoreId = "xyz".into();
    assert_eq!(id.value(), "xyz");
}

#[test]
fn test_store_id_display() {
    let id = StoreId::new("store-7");
    assert_eq!(format!("{}", id), "store-7");
}

#[test]
fn test_store_id_serde_transparent() {
    let id = StoreId::new("store-9");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"store-9\"");

    let back: StoreId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_report_id_new() {
    let id = ReportId::new("rep-1");
    assert_eq!(id.value(), "rep-1");
}

#[test]
fn test_report_id_generate_unique() {
    let id1 = ReportId::generate();
    let id2 = ReportId::generate();
    assert_ne!(id1, id2);
    assert!(!id1.value().is_empty());
}

#[test]
fn test_report_id_display() {
    let id = ReportId::new("rep-42");
    assert_eq!(id.to_string(), "rep-42");
}
