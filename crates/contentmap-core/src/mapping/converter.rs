//! Best-effort conversion of runtime values to a member's declared type
//!
//! Rules are tried in a fixed order and the first that applies wins:
//!
//! 1. null becomes the target's default value
//! 2. values the target already accepts pass through unchanged
//! 3. string targets take the value's string form
//! 4. numeric targets parse the value's string form
//! 5. boolean targets parse `true`/`false` and the truthy set
//! 6. guid targets parse the value's string form
//! 7. date/time targets only accept date/time instances
//! 8. rich content targets wrap the platform's encoded strings
//!
//! Anything else is a [`ConversionError`], unless a conversion registry was
//! attached and holds an entry for the exact type pair. Nullable targets
//! consult the registry's exact pair before falling back to the inner type.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::registry::TypeConverterRegistry;
use crate::error::ConversionError;
use crate::value::{Value, ValueType};
use std::sync::Arc;
use uuid::Uuid;

/// Strings (case-insensitive) that parse as `true`
pub const TRUTHY_STRINGS: [&str; 4] = ["1", "yes", "true", "on"];

/// Converts resolved source values into member values
#[derive(Debug, Clone, Default)]
pub struct PropertyValueConverter {
    registry: Option<Arc<TypeConverterRegistry>>,
}

impl PropertyValueConverter {
    pub fn new() -> Self {
        Self { registry: None }
    }

    /// Converter that falls back to `registry` for types no rule claims
    pub fn with_registry(registry: Arc<TypeConverterRegistry>) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    pub fn registry(&self) -> Option<&TypeConverterRegistry> {
        self.registry.as_deref()
    }

    /// Whether some rule can attempt converting `value` to `target`
    pub fn can_convert(&self, value: &Value, target: &ValueType) -> bool {
        if value.is_null() || target.accepts(value) {
            return true;
        }

        match target {
            ValueType::Nullable(inner) => {
                self.registry_has_entry(value, target) || self.can_convert(value, inner)
            }
            ValueType::String | ValueType::Bool | ValueType::Guid => true,
            t if t.is_numeric() => true,
            ValueType::HtmlContent if matches!(value, Value::HtmlEncoded(_)) => true,
            _ => self.registry_has_entry(value, target),
        }
    }

    /// Convert `value` to `target`, or explain why that is not possible
    pub fn convert_value(&self, value: &Value, target: &ValueType) -> Result<Value, ConversionError> {
        if value.is_null() {
            return Ok(target.default_value());
        }

        if target.accepts(value) {
            return Ok(value.clone());
        }

        match target {
            ValueType::Nullable(inner) => match self.registry_conversion(value, target) {
                Some(converted) => Ok(converted),
                None => self.convert_value(value, inner),
            },
            ValueType::String => Ok(Value::String(value.to_string())),
            t if t.is_numeric() => {
                parse_numeric(&value.to_string(), t).ok_or_else(|| conversion_error(value, target))
            }
            ValueType::Bool => Ok(Value::Bool(parse_truthy(&value.to_string()))),
            ValueType::Guid => Uuid::parse_str(value.to_string().trim())
                .map(Value::Guid)
                .map_err(|_| conversion_error(value, target)),
            ValueType::HtmlContent => match value {
                Value::HtmlEncoded(html) => Ok(Value::HtmlContent(html.to_html_content())),
                _ => self.convert_with_registry(value, target),
            },
            _ => self.convert_with_registry(value, target),
        }
    }

    fn registry_has_entry(&self, value: &Value, target: &ValueType) -> bool {
        self.registry()
            .is_some_and(|registry| registry.can_convert_value(value, target))
    }

    fn registry_conversion(&self, value: &Value, target: &ValueType) -> Option<Value> {
        self.registry()
            .and_then(|registry| registry.convert_value(value, target))
    }

    fn convert_with_registry(&self, value: &Value, target: &ValueType) -> Result<Value, ConversionError> {
        self.registry_conversion(value, target)
            .ok_or_else(|| conversion_error(value, target))
    }
}

/// Parse a number of the given numeric type from its string form
pub fn parse_numeric(text: &str, target: &ValueType) -> Option<Value> {
    let text = text.trim();
    match target {
        ValueType::Int16 => text.parse().ok().map(Value::Int16),
        ValueType::Int32 => text.parse().ok().map(Value::Int32),
        ValueType::Int64 => text.parse().ok().map(Value::Int64),
        ValueType::Float32 => text.parse().ok().map(Value::Float32),
        ValueType::Float64 => text.parse().ok().map(Value::Float64),
        _ => None,
    }
}

/// `true` for the truthy strings, `false` for everything else
pub fn parse_truthy(text: &str) -> bool {
    let text = text.trim();
    TRUTHY_STRINGS.iter().any(|t| t.eq_ignore_ascii_case(text))
}

fn conversion_error(value: &Value, target: &ValueType) -> ConversionError {
    ConversionError {
        from: value.type_name(),
        to: target.name(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{HtmlContent, HtmlEncodedString};
    use chrono::NaiveDate;

    fn converter() -> PropertyValueConverter {
        PropertyValueConverter::new()
    }

    #[test]
    fn test_null_becomes_default() {
        let c = converter();
        assert_eq!(c.convert_value(&Value::Null, &ValueType::Int32), Ok(Value::Int32(0)));
        assert_eq!(c.convert_value(&Value::Null, &ValueType::Bool), Ok(Value::Bool(false)));
        assert_eq!(c.convert_value(&Value::Null, &ValueType::String), Ok(Value::Null));
        assert_eq!(
            c.convert_value(&Value::Null, &ValueType::nullable(ValueType::Guid)),
            Ok(Value::Null)
        );
        assert!(c.can_convert(&Value::Null, &ValueType::DateTime));
    }

    #[test]
    fn test_identity_first() {
        let c = converter();
        let tags = Value::from(vec!["a", "b"]);
        assert_eq!(c.convert_value(&tags, &ValueType::list(ValueType::String)), Ok(tags.clone()));
        assert_eq!(c.convert_value(&Value::Int32(5), &ValueType::Any), Ok(Value::Int32(5)));
        assert_eq!(
            c.convert_value(&Value::Int32(5), &ValueType::nullable(ValueType::Int32)),
            Ok(Value::Int32(5))
        );
    }

    #[test]
    fn test_string_target() {
        let c = converter();
        assert_eq!(c.convert_value(&Value::Int32(42), &ValueType::String), Ok(Value::from("42")));
        assert_eq!(
            c.convert_value(&Value::HtmlEncoded(HtmlEncodedString::new("<b>x</b>")), &ValueType::String),
            Ok(Value::from("<b>x</b>"))
        );
    }

    #[test]
    fn test_numeric_targets() {
        let c = converter();
        assert_eq!(c.convert_value(&Value::from("123"), &ValueType::Int32), Ok(Value::Int32(123)));
        assert_eq!(c.convert_value(&Value::from(" 7 "), &ValueType::Int16), Ok(Value::Int16(7)));
        assert_eq!(c.convert_value(&Value::Int32(9), &ValueType::Int64), Ok(Value::Int64(9)));
        assert_eq!(c.convert_value(&Value::from("2.5"), &ValueType::Float64), Ok(Value::Float64(2.5)));
        assert_eq!(
            c.convert_value(&Value::from("12"), &ValueType::nullable(ValueType::Int32)),
            Ok(Value::Int32(12))
        );
    }

    #[test]
    fn test_numeric_parse_failure_is_error() {
        let c = converter();
        let err = c.convert_value(&Value::from("not-a-number"), &ValueType::Int32).unwrap_err();
        assert_eq!(err.from, "String");
        assert_eq!(err.to, "Int32");
        assert_eq!(err.value, "not-a-number");
        assert!(c.convert_value(&Value::Int64(i64::MAX), &ValueType::Int32).is_err());
        assert!(c.can_convert(&Value::from("not-a-number"), &ValueType::Int32));
    }

    #[test]
    fn test_boolean_target() {
        let c = converter();
        for truthy in ["1", "yes", "TRUE", "On", " true "] {
            assert_eq!(c.convert_value(&Value::from(truthy), &ValueType::Bool), Ok(Value::Bool(true)));
        }
        for falsy in ["0", "no", "false", "banana", ""] {
            assert_eq!(c.convert_value(&Value::from(falsy), &ValueType::Bool), Ok(Value::Bool(false)));
        }
        assert_eq!(c.convert_value(&Value::Int32(1), &ValueType::Bool), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_guid_target() {
        let c = converter();
        let id = Uuid::new_v4();
        assert_eq!(
            c.convert_value(&Value::String(id.to_string()), &ValueType::Guid),
            Ok(Value::Guid(id))
        );
        assert!(c.convert_value(&Value::from("nope"), &ValueType::Guid).is_err());
    }

    #[test]
    fn test_date_target_needs_date_instance() {
        let c = converter();
        let date = NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|d| d.and_hms_opt(1, 2, 3))
            .unwrap();
        assert_eq!(c.convert_value(&Value::DateTime(date), &ValueType::DateTime), Ok(Value::DateTime(date)));
        assert!(c.convert_value(&Value::from("2024-05-06"), &ValueType::DateTime).is_err());
        assert!(!c.can_convert(&Value::from("2024-05-06"), &ValueType::DateTime));
    }

    #[test]
    fn test_rich_content_wrapping() {
        let c = converter();
        let encoded = Value::HtmlEncoded(HtmlEncodedString::new("<p>Body</p>"));
        assert!(c.can_convert(&encoded, &ValueType::HtmlContent));
        assert_eq!(
            c.convert_value(&encoded, &ValueType::HtmlContent),
            Ok(Value::HtmlContent(HtmlContent::new("<p>Body</p>")))
        );
        assert!(c.convert_value(&Value::from("<p>Body</p>"), &ValueType::HtmlContent).is_err());
    }

    #[test]
    fn test_no_passthrough_for_unclaimed_targets() {
        let c = converter();
        let err = c
            .convert_value(&Value::from("a,b"), &ValueType::list(ValueType::String))
            .unwrap_err();
        assert_eq!(err.to, "List<String>");
    }

    #[test]
    fn test_registry_fallback() {
        let c = PropertyValueConverter::with_registry(Arc::new(TypeConverterRegistry::with_defaults()));
        assert!(c.can_convert(&Value::from("a,b"), &ValueType::list(ValueType::String)));
        assert_eq!(
            c.convert_value(&Value::from("a,,b"), &ValueType::list(ValueType::String)),
            Ok(Value::from(vec!["a", "b"]))
        );
        assert_eq!(
            c.convert_value(&Value::from("2024-05-06T01:02:03"), &ValueType::DateTime)
                .map(|v| v.to_string()),
            Ok("2024-05-06T01:02:03".to_string())
        );
        // numeric rules still win over the registry
        assert!(c.convert_value(&Value::from("abc"), &ValueType::Int32).is_err());
    }

    #[test]
    fn test_nullable_target_prefers_registry_pair() {
        let c = PropertyValueConverter::with_registry(Arc::new(TypeConverterRegistry::with_defaults()));
        let nullable_date = ValueType::nullable(ValueType::DateTime);
        assert!(c.can_convert(&Value::from("garbage"), &nullable_date));
        assert_eq!(c.convert_value(&Value::from("garbage"), &nullable_date), Ok(Value::Null));
        assert_eq!(
            c.convert_value(&Value::from("2024-05-06T01:02:03"), &nullable_date)
                .map(|v| v.to_string()),
            Ok("2024-05-06T01:02:03".to_string())
        );
        assert_eq!(
            c.convert_value(&Value::from("abc"), &ValueType::nullable(ValueType::Int32)),
            Ok(Value::Null)
        );
    }

    #[test]
    fn test_nullable_target_without_registry_uses_inner_rules() {
        let c = converter();
        let nullable_date = ValueType::nullable(ValueType::DateTime);
        assert!(!c.can_convert(&Value::from("garbage"), &nullable_date));
        assert!(c.convert_value(&Value::from("garbage"), &nullable_date).is_err());
        assert!(c.convert_value(&Value::from("abc"), &ValueType::nullable(ValueType::Int32)).is_err());
    }
}
