//! Dynamically typed values exchanged between source nodes and models
//!
//! Source nodes hand out [`Value`]s, destination members are described by a
//! [`ValueType`], and models pull concrete Rust values back out through
//! [`FromValue`].
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::error::ModelError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fixed format used when a date/time is rendered as a string
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Fixed format used when a date/time with offset is rendered as a string
pub const DATE_TIME_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
/// Fixed format for date-only values
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Fixed format for time-only values
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Smallest representable date (0001-01-01)
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Smallest representable date/time (0001-01-01T00:00:00)
pub fn min_date_time() -> NaiveDateTime {
    min_date().and_time(NaiveTime::MIN)
}

/// Smallest representable date/time with offset (0001-01-01T00:00:00+00:00)
pub fn min_date_time_offset() -> DateTime<FixedOffset> {
    min_date_time().and_utc().fixed_offset()
}

/// HTML produced by the platform's rich-text editors, already encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HtmlEncodedString(String);

impl HtmlEncodedString {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap the encoded markup as renderable content
    pub fn to_html_content(&self) -> HtmlContent {
        HtmlContent(self.0.clone())
    }
}

/// Renderable rich content assigned to model members
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HtmlContent(String);

impl HtmlContent {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A runtime value of any supported type
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Guid(Uuid),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time(NaiveTime),
    HtmlEncoded(HtmlEncodedString),
    HtmlContent(HtmlContent),
    List(Vec<Value>),
    /// Structured data the mapper does not interpret (block lists, pickers)
    Json(serde_json::Value),
}

/// Declared type of a model member or registry endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Guid,
    DateTime,
    DateTimeOffset,
    Date,
    Time,
    HtmlEncoded,
    HtmlContent,
    List(Box<ValueType>),
    Nullable(Box<ValueType>),
    Json,
    /// Accepts every value, like a member declared as `object`
    Any,
}

impl ValueType {
    pub fn list(element: ValueType) -> Self {
        ValueType::List(Box::new(element))
    }

    pub fn nullable(inner: ValueType) -> Self {
        ValueType::Nullable(Box::new(inner))
    }

    /// Value types have a non-null default and reject null
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            ValueType::Bool
                | ValueType::Int16
                | ValueType::Int32
                | ValueType::Int64
                | ValueType::Float32
                | ValueType::Float64
                | ValueType::Guid
                | ValueType::DateTime
                | ValueType::DateTimeOffset
                | ValueType::Date
                | ValueType::Time
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Int16
                | ValueType::Int32
                | ValueType::Int64
                | ValueType::Float32
                | ValueType::Float64
        )
    }

    pub fn is_date_time(&self) -> bool {
        matches!(
            self,
            ValueType::DateTime | ValueType::DateTimeOffset | ValueType::Date | ValueType::Time
        )
    }

    /// Members that are neither value types nor strings need explicit mappings
    pub fn is_complex(&self) -> bool {
        match self {
            ValueType::Nullable(inner) => inner.is_complex(),
            ValueType::String => false,
            other => !other.is_value_type(),
        }
    }

    /// The value a member of this type holds before anything is assigned
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int16 => Value::Int16(0),
            ValueType::Int32 => Value::Int32(0),
            ValueType::Int64 => Value::Int64(0),
            ValueType::Float32 => Value::Float32(0.0),
            ValueType::Float64 => Value::Float64(0.0),
            ValueType::Guid => Value::Guid(Uuid::nil()),
            ValueType::DateTime => Value::DateTime(min_date_time()),
            ValueType::DateTimeOffset => Value::DateTimeOffset(min_date_time_offset()),
            ValueType::Date => Value::Date(min_date()),
            ValueType::Time => Value::Time(NaiveTime::MIN),
            _ => Value::Null,
        }
    }

    /// Whether `value` can be stored as-is in a member of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Any, _) => true,
            (_, Value::Null) => !self.is_value_type(),
            (ValueType::Nullable(inner), v) => inner.accepts(v),
            (ValueType::List(element), Value::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (target, v) => v.value_type().as_ref() == Some(target),
        }
    }

    /// Readable name used in diagnostics
    pub fn name(&self) -> String {
        match self {
            ValueType::List(element) => format!("List<{}>", element.name()),
            ValueType::Nullable(inner) => format!("Nullable<{}>", inner.name()),
            other => format!("{:?}", other),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type of the value; `None` for null
    pub fn value_type(&self) -> Option<ValueType> {
        let value_type = match self {
            Value::Null => return None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int16(_) => ValueType::Int16,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Float32(_) => ValueType::Float32,
            Value::Float64(_) => ValueType::Float64,
            Value::String(_) => ValueType::String,
            Value::Guid(_) => ValueType::Guid,
            Value::DateTime(_) => ValueType::DateTime,
            Value::DateTimeOffset(_) => ValueType::DateTimeOffset,
            Value::Date(_) => ValueType::Date,
            Value::Time(_) => ValueType::Time,
            Value::HtmlEncoded(_) => ValueType::HtmlEncoded,
            Value::HtmlContent(_) => ValueType::HtmlContent,
            Value::Json(_) => ValueType::Json,
            Value::List(items) => {
                let mut element: Option<ValueType> = None;
                for item in items {
                    let item_type = item.value_type().unwrap_or(ValueType::Any);
                    match &element {
                        None => element = Some(item_type),
                        Some(existing) if *existing == item_type => {}
                        Some(_) => {
                            element = Some(ValueType::Any);
                            break;
                        }
                    }
                }
                ValueType::list(element.unwrap_or(ValueType::Any))
            }
        };
        Some(value_type)
    }

    /// Name of the runtime type, `"Null"` for null
    pub fn type_name(&self) -> String {
        self.value_type()
            .map(|t| t.name())
            .unwrap_or_else(|| "Null".to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Pull a concrete Rust value out for member `member`
    pub fn extract<T: FromValue>(&self, member: &str) -> Result<T, ModelError> {
        T::from_value(self).ok_or_else(|| ModelError::TypeMismatch {
            member: member.to_string(),
            expected: T::value_type().name(),
            found: self.type_name(),
        })
    }
}

/// The value's string form, used by string round-trip conversions
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int16(n) => write!(f, "{}", n),
            Value::Int32(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Float32(n) => write!(f, "{}", n),
            Value::Float64(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Guid(g) => write!(f, "{}", g.hyphenated()),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
            Value::DateTimeOffset(dt) => write!(f, "{}", dt.format(DATE_TIME_OFFSET_FORMAT)),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Time(t) => write!(f, "{}", t.format(TIME_FORMAT)),
            Value::HtmlEncoded(html) => write!(f, "{}", html.as_str()),
            Value::HtmlContent(html) => write!(f, "{}", html.as_str()),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Json(json) => write!(f, "{}", json),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Value::Int32(small),
                        Err(_) => Value::Int64(i),
                    }
                } else {
                    Value::Float64(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            object @ serde_json::Value::Object(_) => Value::Json(object),
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Uuid => Guid,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
    HtmlEncodedString => HtmlEncoded,
    HtmlContent => HtmlContent,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Typed extraction of a [`Value`] into a model member
///
/// Extraction is exact: an `Int32` is not silently widened into an `i64`
/// member. Conversions happen before assignment, in the value converter.
pub trait FromValue: Sized {
    /// Declared type of members holding `Self`
    fn value_type() -> ValueType;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Uuid => Guid,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
    HtmlEncodedString => HtmlEncoded,
    HtmlContent => HtmlContent,
    serde_json::Value => Json,
}

impl<T: FromValue> FromValue for Option<T> {
    fn value_type() -> ValueType {
        let inner = T::value_type();
        if inner.is_value_type() {
            ValueType::nullable(inner)
        } else {
            inner
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::list(T::value_type())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn value_type() -> ValueType {
        ValueType::Any
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
