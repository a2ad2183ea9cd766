//! Integration tests for the default conversion registry

use chrono::NaiveDate;
use contentmap_core::{TypeConverterRegistry, Value, ValueType};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[test]
fn test_string_defaults() {
    let registry = TypeConverterRegistry::with_defaults();

    assert_eq!(registry.convert_string(Some(""), &ValueType::Int32), Some(Value::Int32(0)));
    assert_eq!(
        registry.convert_string(Some("not-a-number"), &ValueType::Int32),
        Some(Value::Int32(0))
    );
    assert_eq!(
        registry.convert_string(Some(""), &ValueType::Guid),
        Some(Value::Guid(Uuid::nil()))
    );
    assert_eq!(registry.convert_string(Some("yes"), &ValueType::Bool), Some(Value::Bool(true)));
    assert_eq!(
        registry.convert_string(None, &ValueType::list(ValueType::String)),
        Some(Value::List(vec![]))
    );
}

#[test]
fn test_nullable_round_trip() {
    let registry = TypeConverterRegistry::with_defaults();
    let nullable = ValueType::nullable(ValueType::Int32);

    assert_eq!(
        registry.convert(&Value::Null, &nullable, &ValueType::String),
        Some(Value::String(String::new()))
    );
    assert_eq!(
        registry.convert(&Value::Null, &nullable, &ValueType::Int32),
        Some(Value::Int32(0))
    );
    assert_eq!(
        registry.convert(&Value::Int32(5), &ValueType::Int32, &nullable),
        Some(Value::Int32(5))
    );
}

#[test]
fn test_date_parsing() {
    let registry = TypeConverterRegistry::with_defaults();
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    assert_eq!(
        registry.convert_string(Some("2024-03-01T09:30:00"), &ValueType::DateTime),
        Some(Value::DateTime(expected))
    );
    assert_eq!(
        registry.convert_value(&Value::DateTime(expected), &ValueType::String),
        Some(Value::from("2024-03-01T09:30:00"))
    );
}

#[test]
fn test_custom_converter() {
    let mut registry = TypeConverterRegistry::new();
    assert!(registry.is_empty());

    registry.register(ValueType::String, ValueType::Int32, |v| {
        Value::Int32(v.as_str().map(|s| s.len() as i32).unwrap_or(-1))
    });

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.convert_string(Some("four"), &ValueType::Int32), Some(Value::Int32(4)));
    assert_eq!(registry.convert_string(Some("x"), &ValueType::Int64), None);
}
