//! Per-member value resolution and assignment
//!
//! For every writable member of the model the mapper picks one value source,
//! in this order:
//!
//! 1. an ignored member mapping skips the member
//! 2. a configured resolver, if it yields a value
//! 3. the built-in field of the same name (this ends the search even when
//!    the field has no value for the node)
//! 4. the source property under the configured alias, or the lower-cased
//!    member name
//!
//! The value is converted to the member's type and assigned. A failure for
//! one member is logged and mapping continues with the next.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::converter::PropertyValueConverter;
use super::properties::{ModelPropertyService, PropertyDescriptor};
use super::registry::TypeConverterRegistry;
use super::resolver::ValueResolver;
use crate::config::MapperOptions;
use crate::error::{PropertyFailure, PropertyMappingError};
use crate::model::ContentModel;
use crate::node::{Source, UrlMode};
use crate::profile::{MappingConfiguration, TypeMap};
use crate::value::Value;
use std::any::TypeId;
use std::sync::Arc;

/// Platform fields read through dedicated node accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInField {
    Id,
    Key,
    Name,
    ContentTypeAlias,
    Url,
    AbsoluteUrl,
    CreateDate,
    UpdateDate,
    Level,
    SortOrder,
    TemplateId,
    IsVisible,
}

impl BuiltInField {
    pub const ALL: [BuiltInField; 12] = [
        BuiltInField::Id,
        BuiltInField::Key,
        BuiltInField::Name,
        BuiltInField::ContentTypeAlias,
        BuiltInField::Url,
        BuiltInField::AbsoluteUrl,
        BuiltInField::CreateDate,
        BuiltInField::UpdateDate,
        BuiltInField::Level,
        BuiltInField::SortOrder,
        BuiltInField::TemplateId,
        BuiltInField::IsVisible,
    ];

    /// Member name that selects this field
    pub fn property_name(self) -> &'static str {
        match self {
            BuiltInField::Id => "Id",
            BuiltInField::Key => "Key",
            BuiltInField::Name => "Name",
            BuiltInField::ContentTypeAlias => "ContentTypeAlias",
            BuiltInField::Url => "Url",
            BuiltInField::AbsoluteUrl => "AbsoluteUrl",
            BuiltInField::CreateDate => "CreateDate",
            BuiltInField::UpdateDate => "UpdateDate",
            BuiltInField::Level => "Level",
            BuiltInField::SortOrder => "SortOrder",
            BuiltInField::TemplateId => "TemplateId",
            BuiltInField::IsVisible => "IsVisible",
        }
    }

    /// Field selected by a member name (exact, case-sensitive)
    pub fn from_property_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.property_name() == name)
    }

    /// The field's value on `source`; `None` when the node kind lacks it
    pub fn value(self, source: &Source<'_>) -> Option<Value> {
        match self {
            BuiltInField::Key => return source.key().map(Value::Guid),
            BuiltInField::ContentTypeAlias => {
                return source
                    .is_supported()
                    .then(|| Value::from(source.content_type_alias()))
            }
            _ => {}
        }

        let content = source.as_content()?;
        let value = match self {
            BuiltInField::Id => Value::Int32(content.id()),
            BuiltInField::Name => Value::from(content.name()),
            BuiltInField::Url => Value::String(content.url(UrlMode::Default)),
            BuiltInField::AbsoluteUrl => Value::String(content.url(UrlMode::Absolute)),
            BuiltInField::CreateDate => Value::DateTime(content.create_date()),
            BuiltInField::UpdateDate => Value::DateTime(content.update_date()),
            BuiltInField::Level => Value::Int32(content.level()),
            BuiltInField::SortOrder => Value::Int32(content.sort_order()),
            BuiltInField::TemplateId => Value::from(content.template_id()),
            BuiltInField::IsVisible => Value::Bool(content.is_visible()),
            BuiltInField::Key | BuiltInField::ContentTypeAlias => return None,
        };
        Some(value)
    }
}

/// Whether `name` selects a built-in field
pub fn is_built_in_property(name: &str) -> bool {
    BuiltInField::from_property_name(name).is_some()
}

/// Where a member's value comes from
enum ValueSource<'a> {
    Ignored,
    Resolver(&'a dyn ValueResolver),
    BuiltIn(BuiltInField),
    Alias(String),
    Unmapped,
}

/// Populates model members from a source node
#[derive(Debug, Clone)]
pub struct PropertyMapper {
    properties: Arc<ModelPropertyService>,
    converter: Arc<PropertyValueConverter>,
    configuration: Arc<MappingConfiguration>,
    options: MapperOptions,
}

impl Default for PropertyMapper {
    fn default() -> Self {
        Self::from_options(MapperOptions::default())
    }
}

impl PropertyMapper {
    pub fn new(
        properties: Arc<ModelPropertyService>,
        converter: Arc<PropertyValueConverter>,
        configuration: Arc<MappingConfiguration>,
        options: MapperOptions,
    ) -> Self {
        Self {
            properties,
            converter,
            configuration,
            options,
        }
    }

    /// Fresh services set up according to `options`, with no member mappings
    pub fn from_options(options: MapperOptions) -> Self {
        Self::with_configuration(MappingConfiguration::new(), options)
    }

    /// Fresh services set up according to `options`
    pub fn with_configuration(configuration: MappingConfiguration, options: MapperOptions) -> Self {
        let properties = if options.enable_property_cache {
            ModelPropertyService::new()
        } else {
            ModelPropertyService::uncached()
        };
        let converter = if options.use_conversion_registry {
            PropertyValueConverter::with_registry(Arc::new(TypeConverterRegistry::with_defaults()))
        } else {
            PropertyValueConverter::new()
        };
        Self::new(
            Arc::new(properties),
            Arc::new(converter),
            Arc::new(configuration),
            options,
        )
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn configuration(&self) -> &MappingConfiguration {
        &self.configuration
    }

    pub fn property_service(&self) -> &ModelPropertyService {
        &self.properties
    }

    /// Map every writable member of `model` from `source`
    ///
    /// Never fails: a member that cannot be mapped is logged and left as is.
    pub fn map_properties<T: ContentModel>(&self, source: &Source<'_>, model: &mut T) {
        let properties = self.properties.get_properties::<T>();
        let type_map = self.configuration.find_type_map(source, TypeId::of::<T>());

        for property in properties.iter() {
            if let Err(err) = self.map_property(source, model, property, type_map) {
                tracing::warn!(
                    property = %err.member_name,
                    content_type = source.content_type_alias(),
                    error = %err,
                    "Error mapping property"
                );
            }
        }
    }

    /// Map a single member; `Ok(true)` when a value was assigned
    pub fn map_property<T: ContentModel>(
        &self,
        source: &Source<'_>,
        model: &mut T,
        property: &PropertyDescriptor,
        type_map: Option<&TypeMap>,
    ) -> Result<bool, PropertyMappingError> {
        let (alias, value) = match self.value_source(source, property, type_map) {
            ValueSource::Ignored | ValueSource::Unmapped => return Ok(false),
            ValueSource::Resolver(resolver) => match non_null(resolver.resolve(source)) {
                Some(value) => (property.alias(), value),
                None => return self.map_fallback(source, model, property, type_map),
            },
            ValueSource::BuiltIn(field) => match non_null(field.value(source)) {
                Some(value) => (property.alias(), value),
                None => return Ok(false),
            },
            ValueSource::Alias(alias) => match lookup(source, &alias) {
                Some(value) => (alias, value),
                None => return Ok(false),
            },
        };

        self.assign(model, property, alias, value).map(|_| true)
    }

    /// Resolution after a resolver declined: built-in field, then alias
    fn map_fallback<T: ContentModel>(
        &self,
        source: &Source<'_>,
        model: &mut T,
        property: &PropertyDescriptor,
        type_map: Option<&TypeMap>,
    ) -> Result<bool, PropertyMappingError> {
        let resolved = match BuiltInField::from_property_name(&property.name) {
            Some(field) => non_null(field.value(source)).map(|value| (property.alias(), value)),
            None => {
                let alias = type_map
                    .and_then(|m| m.property_mapping(&property.name))
                    .map(|m| m.alias())
                    .unwrap_or_else(|| property.alias());
                lookup(source, &alias).map(|value| (alias, value))
            }
        };

        match resolved {
            Some((alias, value)) => self.assign(model, property, alias, value).map(|_| true),
            None => Ok(false),
        }
    }

    fn value_source<'m>(
        &self,
        source: &Source<'_>,
        property: &PropertyDescriptor,
        type_map: Option<&'m TypeMap>,
    ) -> ValueSource<'m> {
        let mapping = type_map.and_then(|m| m.property_mapping(&property.name));

        if let Some(mapping) = mapping {
            if mapping.ignored {
                return ValueSource::Ignored;
            }
            if let Some(resolver) = mapping.resolver.as_deref() {
                return ValueSource::Resolver(resolver);
            }
        }

        if let Some(field) = BuiltInField::from_property_name(&property.name) {
            return ValueSource::BuiltIn(field);
        }

        match mapping {
            Some(mapping) => ValueSource::Alias(mapping.alias()),
            None if self.options.auto_map_unmatched_properties => {
                ValueSource::Alias(property.alias())
            }
            None => {
                tracing::trace!(
                    property = %property.name,
                    content_type = source.content_type_alias(),
                    "skipping unmatched property"
                );
                ValueSource::Unmapped
            }
        }
    }

    fn assign<T: ContentModel>(
        &self,
        model: &mut T,
        property: &PropertyDescriptor,
        alias: String,
        value: Value,
    ) -> Result<(), PropertyMappingError> {
        let failure = |failure: PropertyFailure| PropertyMappingError {
            property_alias: alias.clone(),
            destination_type: T::model_name().to_string(),
            member_name: property.name.clone(),
            failure,
        };

        let converted = self
            .converter
            .convert_value(&value, &property.value_type)
            .map_err(|err| failure(PropertyFailure::Conversion(err)))?;

        model
            .set_value(&property.name, converted)
            .map_err(|err| failure(PropertyFailure::Assignment(err)))
    }
}

/// Non-null value of the source property `alias`
fn lookup(source: &Source<'_>, alias: &str) -> Option<Value> {
    if !source.has_property(alias) {
        return None;
    }
    non_null(source.property_value(alias))
}

fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|value| !value.is_null())
}
