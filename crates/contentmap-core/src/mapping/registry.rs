//! Type conversion registry
//!
//! A table of total conversion functions keyed by the exact
//! `(source type, destination type)` pair. Entries never fail: input that
//! cannot be parsed produces the documented default for the destination
//! (zero, `false`, the nil guid, the minimum date, an empty list, or null for
//! nullable destinations).
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::value::{
    min_date, min_date_time, min_date_time_offset, Value, ValueType, DATE_FORMAT,
    DATE_TIME_FORMAT, DATE_TIME_OFFSET_FORMAT, TIME_FORMAT,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A registered conversion function
pub type ConverterFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Datetime layouts accepted by string to date/time entries, tried in order
const DATE_TIME_LAYOUTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_LAYOUTS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

const TIME_LAYOUTS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Exact-pair lookup of conversion functions
#[derive(Clone, Default)]
pub struct TypeConverterRegistry {
    converters: HashMap<(ValueType, ValueType), ConverterFn>,
}

impl fmt::Debug for TypeConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConverterRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

impl TypeConverterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the standard conversion table
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_string_parsers();
        registry.register_numeric_conversions();
        registry.register_date_time_conversions();
        registry.register_boolean_conversions();
        registry.register_collection_conversions();
        registry.register_nullable_conversions();
        registry
    }

    /// Add or replace the conversion for `from` → `to`
    pub fn register<F>(&mut self, from: ValueType, to: ValueType, converter: F) -> &mut Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.converters.insert((from, to), Arc::new(converter));
        self
    }

    pub fn contains(&self, from: &ValueType, to: &ValueType) -> bool {
        self.converters.contains_key(&(from.clone(), to.clone()))
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert `value`, declared as `from`, to `to`; `None` when no entry exists
    pub fn convert(&self, value: &Value, from: &ValueType, to: &ValueType) -> Option<Value> {
        self.converters
            .get(&(from.clone(), to.clone()))
            .map(|converter| converter(value))
    }

    /// Convert `value` using its runtime type as the source type
    ///
    /// Empty and mixed lists report `List<Any>` at runtime; those fall back to
    /// the `List<String>` entries.
    pub fn convert_value(&self, value: &Value, to: &ValueType) -> Option<Value> {
        let from = self.runtime_source(value, to)?;
        self.convert(value, &from, to)
    }

    /// Whether `convert_value` has an entry for `value` and `to`
    pub fn can_convert_value(&self, value: &Value, to: &ValueType) -> bool {
        self.runtime_source(value, to).is_some()
    }

    fn runtime_source(&self, value: &Value, to: &ValueType) -> Option<ValueType> {
        let from = value.value_type()?;
        if self.contains(&from, to) {
            return Some(from);
        }
        match from {
            ValueType::List(element) if *element == ValueType::Any => {
                let strings = ValueType::list(ValueType::String);
                self.contains(&strings, to).then_some(strings)
            }
            _ => None,
        }
    }

    /// Convert an optional string to `to`
    pub fn convert_string(&self, value: Option<&str>, to: &ValueType) -> Option<Value> {
        let value = value.map(Value::from).unwrap_or(Value::Null);
        self.convert(&value, &ValueType::String, to)
    }

    fn register_string_parsers(&mut self) {
        use ValueType as T;

        self.register(T::String, T::Int32, |v| {
            Value::Int32(non_empty(v).and_then(|s| s.trim().parse().ok()).unwrap_or(0))
        });
        self.register(T::String, T::Int64, |v| {
            Value::Int64(non_empty(v).and_then(|s| s.trim().parse().ok()).unwrap_or(0))
        });
        self.register(T::String, T::Float64, |v| {
            Value::Float64(non_empty(v).and_then(|s| parse_number(&s)).unwrap_or(0.0))
        });
        self.register(T::String, T::Float32, |v| {
            Value::Float32(
                non_empty(v)
                    .and_then(|s| parse_number(&s))
                    .map(|n| n as f32)
                    .unwrap_or(0.0),
            )
        });
        self.register(T::String, T::Guid, |v| {
            Value::Guid(non_empty(v).and_then(|s| parse_guid(&s)).unwrap_or_else(Uuid::nil))
        });
        self.register(T::String, T::DateTime, |v| {
            Value::DateTime(
                non_empty(v)
                    .and_then(|s| parse_date_time(&s))
                    .unwrap_or_else(min_date_time),
            )
        });
        self.register(T::String, T::DateTimeOffset, |v| {
            Value::DateTimeOffset(
                non_empty(v)
                    .and_then(|s| parse_date_time_offset(&s))
                    .unwrap_or_else(min_date_time_offset),
            )
        });
        self.register(T::String, T::Date, |v| {
            Value::Date(non_empty(v).and_then(|s| parse_date(&s)).unwrap_or_else(min_date))
        });
        self.register(T::String, T::Time, |v| {
            Value::Time(non_empty(v).and_then(|s| parse_time(&s)).unwrap_or(NaiveTime::MIN))
        });
    }

    fn register_numeric_conversions(&mut self) {
        use ValueType as T;

        for from in [T::Int16, T::Int32, T::Int64, T::Float32, T::Float64] {
            self.register(from, T::String, |v| Value::String(v.to_string()));
        }

        self.register(T::Int32, T::Int64, |v| match v {
            Value::Int32(n) => Value::Int64(i64::from(*n)),
            _ => Value::Int64(0),
        });
        self.register(T::Int32, T::Float64, |v| match v {
            Value::Int32(n) => Value::Float64(f64::from(*n)),
            _ => Value::Float64(0.0),
        });
        self.register(T::Int64, T::Float64, |v| match v {
            Value::Int64(n) => Value::Float64(*n as f64),
            _ => Value::Float64(0.0),
        });
    }

    fn register_date_time_conversions(&mut self) {
        use ValueType as T;

        self.register(T::DateTime, T::String, |v| match v {
            Value::DateTime(dt) => Value::String(dt.format(DATE_TIME_FORMAT).to_string()),
            _ => Value::String(String::new()),
        });
        self.register(T::DateTimeOffset, T::String, |v| match v {
            Value::DateTimeOffset(dt) => {
                Value::String(dt.format(DATE_TIME_OFFSET_FORMAT).to_string())
            }
            _ => Value::String(String::new()),
        });
        self.register(T::Date, T::String, |v| match v {
            Value::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            _ => Value::String(String::new()),
        });
        self.register(T::Time, T::String, |v| match v {
            Value::Time(t) => Value::String(t.format(TIME_FORMAT).to_string()),
            _ => Value::String(String::new()),
        });

        // naive date/times are taken as UTC
        self.register(T::DateTime, T::DateTimeOffset, |v| match v {
            Value::DateTime(dt) => Value::DateTimeOffset(dt.and_utc().fixed_offset()),
            _ => Value::DateTimeOffset(min_date_time_offset()),
        });
        self.register(T::DateTimeOffset, T::DateTime, |v| match v {
            Value::DateTimeOffset(dt) => Value::DateTime(dt.naive_local()),
            _ => Value::DateTime(min_date_time()),
        });
        self.register(T::DateTime, T::Date, |v| match v {
            Value::DateTime(dt) => Value::Date(dt.date()),
            _ => Value::Date(min_date()),
        });
        self.register(T::DateTime, T::Time, |v| match v {
            Value::DateTime(dt) => Value::Time(dt.time()),
            _ => Value::Time(NaiveTime::MIN),
        });
    }

    fn register_boolean_conversions(&mut self) {
        use ValueType as T;

        self.register(T::String, T::Bool, |v| {
            Value::Bool(non_empty(v).map(|s| parse_bool_lenient(&s)).unwrap_or(false))
        });

        self.register(T::Int16, T::Bool, |v| Value::Bool(matches!(v, Value::Int16(n) if *n != 0)));
        self.register(T::Int32, T::Bool, |v| Value::Bool(matches!(v, Value::Int32(n) if *n != 0)));
        self.register(T::Int64, T::Bool, |v| Value::Bool(matches!(v, Value::Int64(n) if *n != 0)));
        self.register(T::Float32, T::Bool, |v| {
            Value::Bool(matches!(v, Value::Float32(n) if *n != 0.0))
        });
        self.register(T::Float64, T::Bool, |v| {
            Value::Bool(matches!(v, Value::Float64(n) if *n != 0.0))
        });

        self.register(T::Bool, T::String, |v| match v {
            Value::Bool(b) => Value::String(b.to_string()),
            _ => Value::String(String::new()),
        });
        self.register(T::Bool, T::Int32, |v| Value::Int32(i32::from(matches!(v, Value::Bool(true)))));
    }

    fn register_collection_conversions(&mut self) {
        use ValueType as T;

        self.register(T::String, T::list(T::String), |v| {
            let items = non_empty(v)
                .map(|s| {
                    s.split(',')
                        .filter(|item| !item.is_empty())
                        .map(|item| Value::String(item.to_string()))
                        .collect()
                })
                .unwrap_or_default();
            Value::List(items)
        });
        self.register(T::list(T::String), T::String, |v| match v {
            Value::List(_) => Value::String(v.to_string()),
            _ => Value::String(String::new()),
        });
    }

    fn register_nullable_conversions(&mut self) {
        use ValueType as T;

        // string to nullable: empty or unparsable becomes null
        self.register(T::String, T::nullable(T::Int32), |v| {
            non_empty(v)
                .and_then(|s| s.trim().parse::<i32>().ok())
                .map(Value::Int32)
                .unwrap_or(Value::Null)
        });
        self.register(T::String, T::nullable(T::Float64), |v| {
            non_empty(v)
                .and_then(|s| parse_number(&s))
                .map(Value::Float64)
                .unwrap_or(Value::Null)
        });
        self.register(T::String, T::nullable(T::DateTime), |v| {
            non_empty(v)
                .and_then(|s| parse_date_time(&s))
                .map(Value::DateTime)
                .unwrap_or(Value::Null)
        });
        self.register(T::String, T::nullable(T::Bool), |v| {
            non_empty(v)
                .and_then(|s| parse_bool_strict(&s))
                .map(Value::Bool)
                .unwrap_or(Value::Null)
        });
        self.register(T::String, T::nullable(T::Guid), |v| {
            non_empty(v)
                .and_then(|s| parse_guid(&s))
                .map(Value::Guid)
                .unwrap_or(Value::Null)
        });

        for inner in [T::Int32, T::Float64, T::DateTime, T::Bool, T::Guid] {
            // nullable to string: null becomes the empty string
            self.register(T::nullable(inner.clone()), T::String, |v| {
                Value::String(v.to_string())
            });

            self.register(inner.clone(), T::nullable(inner.clone()), |v| v.clone());

            let default = inner.default_value();
            self.register(T::nullable(inner.clone()), inner, move |v| {
                if v.is_null() {
                    default.clone()
                } else {
                    v.clone()
                }
            });
        }
    }
}

/// The value's text, `None` when null or empty
fn non_empty(value: &Value) -> Option<Cow<'_, str>> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    };
    (!text.is_empty()).then_some(text)
}

/// Invariant-culture number: optional sign, digits, group commas and one
/// decimal point; no exponent
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let valid = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '+' | '-'));
    if !valid || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    text.replace(',', "").parse().ok()
}

fn parse_guid(text: &str) -> Option<Uuid> {
    Uuid::parse_str(text.trim()).ok()
}

fn parse_bool_strict(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_bool_lenient(text: &str) -> bool {
    parse_bool_strict(text).unwrap_or_else(|| super::converter::parse_truthy(text))
}

/// Parse a date/time in one of the accepted layouts; offsets convert to UTC
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| parse_date(text).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Parse a date/time with offset; values without an offset are taken as UTC
pub fn parse_date_time_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %:z").ok())
        .or_else(|| parse_date_time(text).map(|dt| dt.and_utc().fixed_offset()))
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
}

pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveTime::parse_from_str(text, layout).ok())
}
