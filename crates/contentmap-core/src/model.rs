//! Destination models and their declarative mapping metadata
//!
//! A model describes itself through [`ContentModel`]: how to construct it,
//! which members it has, how to assign a member, and optionally which source
//! nodes it accepts ([`MapperConfiguration`]).
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use crate::error::ModelError;
use crate::node::short_type_name;
use crate::value::{Value, ValueType};

/// Alias that matches every non-empty content-type alias
pub const WILDCARD_ALIAS: &str = "*";

/// Source type declared by a model's eligibility descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Any published content node
    PublishedContent,
    /// Any published element node
    PublishedElement,
    /// One concrete node implementation, by type name
    Named(String),
}

impl SourceType {
    pub fn named(type_name: impl Into<String>) -> Self {
        SourceType::Named(type_name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            SourceType::PublishedContent => "PublishedContent",
            SourceType::PublishedElement => "PublishedElement",
            SourceType::Named(name) => name,
        }
    }
}

/// Eligibility descriptor: which source nodes a model may be mapped from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfiguration {
    pub source_type: SourceType,
    /// Content-type alias, or [`WILDCARD_ALIAS`]; empty means no constraint
    pub content_type_alias: String,
}

impl MapperConfiguration {
    pub fn new(source_type: SourceType, content_type_alias: impl Into<String>) -> Self {
        Self {
            source_type,
            content_type_alias: content_type_alias.into(),
        }
    }

    /// Published content with the given alias
    pub fn content(content_type_alias: impl Into<String>) -> Self {
        Self::new(SourceType::PublishedContent, content_type_alias)
    }

    /// Published elements with the given alias
    pub fn element(content_type_alias: impl Into<String>) -> Self {
        Self::new(SourceType::PublishedElement, content_type_alias)
    }

    pub fn is_wildcard(&self) -> bool {
        self.content_type_alias == WILDCARD_ALIAS
    }

    /// Whether an alias constraint applies at all
    pub fn constrains_alias(&self) -> bool {
        !self.content_type_alias.trim().is_empty() && !self.is_wildcard()
    }
}

/// Raw reflection data for one model member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub value_type: ValueType,
    pub can_write: bool,
    /// Number of index parameters; non-zero for indexers
    pub index_parameters: usize,
    pub is_static: bool,
}

impl PropertyInfo {
    /// A public, writable instance member
    pub fn writable(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            can_write: true,
            index_parameters: 0,
            is_static: false,
        }
    }

    pub fn read_only(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            can_write: false,
            ..Self::writable(name, value_type)
        }
    }

    pub fn indexer(value_type: ValueType, index_parameters: usize) -> Self {
        Self {
            index_parameters,
            ..Self::writable("Item", value_type)
        }
    }
}

/// A type the content mapper can populate
///
/// Implementations list every member in declaration order from
/// [`properties`](ContentModel::properties), including read-only members and
/// indexers; filtering happens in the property service.
pub trait ContentModel: Sized + Send + 'static {
    /// Construct an empty instance (the parameterless constructor)
    fn create() -> Result<Self, ModelError>;

    /// Name used in diagnostics
    fn model_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Declared eligibility descriptor, if any
    fn mapper_configuration() -> Option<MapperConfiguration> {
        None
    }

    /// Every member of the model, in declaration order
    fn properties() -> Vec<PropertyInfo>;

    /// Store `value` in member `name`
    fn set_value(&mut self, name: &str, value: Value) -> Result<(), ModelError>;
}

/// Build the error returned by `set_value` for an unknown member
pub fn unknown_member<T: ContentModel>(name: &str) -> ModelError {
    ModelError::UnknownMember {
        model: T::model_name().to_string(),
        member: name.to_string(),
    }
}

/// Implements [`ContentModel::properties`] and [`ContentModel::set_value`]
/// for plain structs whose members are all writable fields
///
/// ```
/// use contentmap_core::{model_members, ContentModel, ModelError};
///
/// #[derive(Default)]
/// struct Article {
///     id: i32,
///     title: Option<String>,
/// }
///
/// impl ContentModel for Article {
///     fn create() -> Result<Self, ModelError> {
///         Ok(Self::default())
///     }
///
///     model_members! {
///         "Id" => id: i32,
///         "Title" => title: Option<String>,
///     }
/// }
///
/// assert_eq!(Article::properties().len(), 2);
/// ```
#[macro_export]
macro_rules! model_members {
    ($($member:literal => $field:ident : $ty:ty),* $(,)?) => {
        fn properties() -> ::std::vec::Vec<$crate::model::PropertyInfo> {
            ::std::vec![
                $($crate::model::PropertyInfo::writable(
                    $member,
                    <$ty as $crate::value::FromValue>::value_type(),
                )),*
            ]
        }

        fn set_value(
            &mut self,
            name: &str,
            value: $crate::value::Value,
        ) -> ::std::result::Result<(), $crate::error::ModelError> {
            match name {
                $($member => self.$field = value.extract(name)?,)*
                _ => return Err($crate::model::unknown_member::<Self>(name)),
            }
            Ok(())
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_descriptor() {
        let config = MapperConfiguration::content("*");
        assert!(config.is_wildcard());
        assert!(!config.constrains_alias());
        assert_eq!(config.source_type, SourceType::PublishedContent);
    }

    #[test]
    fn test_empty_alias_is_not_wildcard() {
        let config = MapperConfiguration::content("");
        assert!(!config.is_wildcard());
        assert!(!config.constrains_alias());

        let config = MapperConfiguration::content("testPage");
        assert!(config.constrains_alias());
    }

    #[test]
    fn test_property_info_shapes() {
        let indexer = PropertyInfo::indexer(ValueType::String, 1);
        assert!(indexer.can_write);
        assert_eq!(indexer.index_parameters, 1);

        let read_only = PropertyInfo::read_only("Computed", ValueType::String);
        assert!(!read_only.can_write);

        assert_eq!(SourceType::named("MemoryContent").name(), "MemoryContent");
    }

    #[derive(Debug, Default, PartialEq)]
    struct Widget {
        count: i32,
        label: Option<String>,
    }

    impl ContentModel for Widget {
        fn create() -> Result<Self, ModelError> {
            Ok(Self::default())
        }

        model_members! {
            "Count" => count: i32,
            "Label" => label: Option<String>,
        }
    }

    #[test]
    fn test_model_members_macro() {
        let properties = Widget::properties();
        assert_eq!(properties[0], PropertyInfo::writable("Count", ValueType::Int32));
        assert_eq!(properties[1].value_type, ValueType::String);

        let mut widget = Widget::create().unwrap();
        widget.set_value("Count", Value::Int32(3)).unwrap();
        widget.set_value("Label", Value::from("x")).unwrap();
        assert_eq!(widget, Widget { count: 3, label: Some("x".to_string()) });

        assert!(matches!(
            widget.set_value("Count", Value::from("3")),
            Err(ModelError::TypeMismatch { .. })
        ));
        assert_eq!(
            widget.set_value("Missing", Value::Null),
            Err(ModelError::UnknownMember {
                model: "Widget".to_string(),
                member: "Missing".to_string(),
            })
        );
        assert_eq!(Widget::model_name(), "Widget");
    }
}
