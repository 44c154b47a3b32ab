use entitykit_model::{EntityError, FieldValues, FormattedText};
use entitykit_types::{Timestamp, UserId};
use serde_json::json;

#[test]
fn from_json_requires_object() {
    assert!(FieldValues::from_json(json!({"label": "x"})).is_ok());
    assert!(FieldValues::from_json(json!(["label"])).is_err());
}

#[test]
fn get_str_present_missing_and_null() {
    let v = FieldValues::new().with("label", "Widget").with("empty", json!(null));
    assert_eq!(v.get_str("label").unwrap(), Some("Widget".to_string()));
    assert_eq!(v.get_str("missing").unwrap(), None);
    assert_eq!(v.get_str("empty").unwrap(), None);
}

#[test]
fn null_is_present_but_empty() {
    let v = FieldValues::new().with("uid", json!(null));
    assert!(v.contains("uid"));
    assert_eq!(v.get_user("uid").unwrap(), None);
}

#[test]
fn wrong_shape_is_an_error() {
    let v = FieldValues::new().with("status", "yes");
    match v.get_bool("status") {
        Err(EntityError::InvalidFieldValue { field, .. }) => assert_eq!(field, "status"),
        other => panic!("expected InvalidFieldValue, got {other:?}"),
    }
}

#[test]
fn user_reference_forms() {
    let v = FieldValues::new()
        .with("a", 42)
        .with("b", json!({"target_id": 7}));
    assert_eq!(v.get_user("a").unwrap(), Some(UserId::new(42)));
    assert_eq!(v.get_user("b").unwrap(), Some(UserId::new(7)));
}

#[test]
fn timestamp_field() {
    let v = FieldValues::new().with("created", 1_700_000_000i64);
    assert_eq!(
        v.get_timestamp("created").unwrap(),
        Some(Timestamp::from_secs(1_700_000_000))
    );
}

#[test]
fn text_field_forms() {
    let v = FieldValues::new()
        .with("plain", "hello")
        .with("rich", json!({"value": "<p>hi</p>", "format": "basic_html"}));
    assert_eq!(v.get_text("plain").unwrap(), Some(FormattedText::plain("hello")));
    assert_eq!(
        v.get_text("rich").unwrap(),
        Some(FormattedText::with_format("<p>hi</p>", "basic_html"))
    );
}

#[test]
fn formatted_text_into_json() {
    let value: serde_json::Value = FormattedText::with_format("x", "plain_text").into();
    assert_eq!(value, json!({"value": "x", "format": "plain_text"}));
    let value: serde_json::Value = FormattedText::plain("x").into();
    assert_eq!(value, json!({"value": "x"}));
}
