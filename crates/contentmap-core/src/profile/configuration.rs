//! Explicit member mappings per (source type, model) pair
//!
//! A [`MappingConfiguration`] holds one [`TypeMap`] per [`TypePair`]. Each
//! type map lists [`PropertyMapping`]s that override how a member is
//! resolved: a different property alias, a custom resolver, or no mapping at
//! all. Members without an entry fall back to the default resolution order.
//!
//! Copyright (c) 2025 ContentMap Team
//! Licensed under the Apache-2.0 license

use super::MappingProfile;
use crate::error::{Error, Result};
use crate::mapping::properties::writable_properties;
use crate::mapping::resolver::ValueResolver;
use crate::model::{ContentModel, PropertyInfo, SourceType};
use crate::node::Source;
use crate::value::Value;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Key of a type map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePair {
    pub source_type: SourceType,
    pub destination_type: TypeId,
    destination_name: &'static str,
}

impl TypePair {
    pub fn new<T: ContentModel>(source_type: SourceType) -> Self {
        Self {
            source_type,
            destination_type: TypeId::of::<T>(),
            destination_name: T::model_name(),
        }
    }

    pub fn destination_name(&self) -> &'static str {
        self.destination_name
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_type.name(), self.destination_name)
    }
}

/// How one destination member is resolved
#[derive(Clone)]
pub struct PropertyMapping {
    pub member_name: String,
    /// Source property alias; the lower-cased member name when unset
    pub property_alias: Option<String>,
    pub ignored: bool,
    pub resolver: Option<Arc<dyn ValueResolver>>,
}

impl PropertyMapping {
    pub fn new(member_name: impl Into<String>) -> Self {
        Self {
            member_name: member_name.into(),
            property_alias: None,
            ignored: false,
            resolver: None,
        }
    }

    /// Alias used for the property lookup on the source node
    pub fn alias(&self) -> String {
        self.property_alias
            .clone()
            .unwrap_or_else(|| self.member_name.to_lowercase())
    }
}

impl fmt::Debug for PropertyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMapping")
            .field("member_name", &self.member_name)
            .field("property_alias", &self.property_alias)
            .field("ignored", &self.ignored)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

/// Member mappings from one source type to one model
#[derive(Debug, Clone)]
pub struct TypeMap {
    type_pair: TypePair,
    properties: fn() -> Vec<PropertyInfo>,
    property_mappings: Vec<PropertyMapping>,
}

impl TypeMap {
    fn new<T: ContentModel>(type_pair: TypePair) -> Self {
        Self {
            type_pair,
            properties: T::properties,
            property_mappings: Vec::new(),
        }
    }

    pub fn type_pair(&self) -> &TypePair {
        &self.type_pair
    }

    pub fn property_mappings(&self) -> &[PropertyMapping] {
        &self.property_mappings
    }

    pub fn property_mapping(&self, member_name: &str) -> Option<&PropertyMapping> {
        self.property_mappings
            .iter()
            .find(|m| m.member_name == member_name)
    }

    fn upsert(&mut self, mapping: PropertyMapping) {
        match self
            .property_mappings
            .iter_mut()
            .find(|m| m.member_name == mapping.member_name)
        {
            Some(existing) => *existing = mapping,
            None => self.property_mappings.push(mapping),
        }
    }
}

/// Fluent configuration of a single member
#[derive(Debug)]
pub struct MemberConfiguration {
    mapping: PropertyMapping,
}

impl MemberConfiguration {
    /// Read the member from the source property `alias`
    pub fn map_from_property(&mut self, alias: impl Into<String>) {
        self.mapping.property_alias = Some(alias.into());
    }

    /// Never assign the member
    pub fn ignore(&mut self) {
        self.mapping.ignored = true;
    }

    /// Resolve the member with `resolver` before any other lookup
    pub fn resolve_using<R>(&mut self, resolver: R)
    where
        R: ValueResolver + 'static,
    {
        self.mapping.resolver = Some(Arc::new(resolver));
    }

    /// Resolve the member with a closure
    pub fn resolve_with<F>(&mut self, resolver: F)
    where
        F: Fn(&Source<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        self.resolve_using(resolver);
    }
}

/// Builder returned by [`MappingConfiguration::create_map`]
pub struct MappingExpression<'a> {
    type_map: &'a mut TypeMap,
}

impl MappingExpression<'_> {
    /// Configure member `member_name`
    pub fn for_member<F>(self, member_name: &str, configure: F) -> Self
    where
        F: FnOnce(&mut MemberConfiguration),
    {
        let mapping = self
            .type_map
            .property_mapping(member_name)
            .cloned()
            .unwrap_or_else(|| PropertyMapping::new(member_name));
        let mut member = MemberConfiguration { mapping };
        configure(&mut member);
        self.type_map.upsert(member.mapping);
        self
    }

    /// Shorthand for `for_member(name, |m| m.ignore())`
    pub fn ignore(self, member_name: &str) -> Self {
        self.for_member(member_name, |m| m.ignore())
    }

    pub fn type_pair(&self) -> &TypePair {
        &self.type_map.type_pair
    }
}

/// All configured type maps
#[derive(Debug, Clone, Default)]
pub struct MappingConfiguration {
    type_maps: HashMap<TypePair, TypeMap>,
}

impl MappingConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with the given profiles applied in order
    pub fn with_profiles(profiles: &[&dyn MappingProfile]) -> Self {
        let mut configuration = Self::new();
        for profile in profiles {
            configuration.add_profile(*profile);
        }
        configuration
    }

    /// Start (or continue) configuring the map from `source_type` to `T`
    pub fn create_map<T: ContentModel>(&mut self, source_type: SourceType) -> MappingExpression<'_> {
        let type_pair = TypePair::new::<T>(source_type);
        let type_map = self.type_maps.entry(type_pair.clone()).or_insert_with(|| {
            tracing::debug!(
                source_type = type_pair.source_type.name(),
                destination_type = type_pair.destination_name(),
                "created type map"
            );
            TypeMap::new::<T>(type_pair)
        });
        MappingExpression { type_map }
    }

    /// Let `profile` add its type maps
    pub fn add_profile(&mut self, profile: &dyn MappingProfile) -> &mut Self {
        profile.configure(self);
        log::info!("Added mapping profile: {}", profile.name());
        self
    }

    pub fn type_map(&self, type_pair: &TypePair) -> Option<&TypeMap> {
        self.type_maps.get(type_pair)
    }

    /// Type map for mapping `source` to the model with `destination`
    ///
    /// A map declared for the concrete node type wins over one declared for
    /// the node kind; content nodes also use element maps.
    pub fn find_type_map(&self, source: &Source<'_>, destination: TypeId) -> Option<&TypeMap> {
        let mut candidates = vec![SourceType::named(source.type_name())];
        match source {
            Source::Content(_) => {
                candidates.extend([SourceType::PublishedContent, SourceType::PublishedElement])
            }
            Source::Element(_) => candidates.push(SourceType::PublishedElement),
            Source::Unsupported(_) => return None,
        }

        candidates.iter().find_map(|source_type| {
            self.type_maps.values().find(|m| {
                m.type_pair.destination_type == destination
                    && m.type_pair.source_type == *source_type
            })
        })
    }

    pub fn len(&self) -> usize {
        self.type_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_maps.is_empty()
    }

    pub fn type_maps(&self) -> impl Iterator<Item = &TypeMap> {
        self.type_maps.values()
    }

    /// Check every type map against its model
    ///
    /// Complex members without a mapping only produce a warning; mappings
    /// for members the model does not have are errors.
    pub fn validate(&self) -> Result<()> {
        let mut validation_errors = Vec::new();

        for type_map in self.type_maps.values() {
            let pair = &type_map.type_pair;
            log::debug!("Validating mapping: {}", pair);

            let members = writable_properties((type_map.properties)());
            for member in &members {
                if member.value_type.is_complex() && type_map.property_mapping(&member.name).is_none() {
                    log::warn!(
                        "No mapping defined for complex property {} on {}",
                        member.name,
                        pair.destination_name()
                    );
                }
            }

            for mapping in &type_map.property_mappings {
                if !members.iter().any(|m| m.name == mapping.member_name) {
                    validation_errors.push(format!(
                        "{}: member '{}' does not exist on {} or is not writable",
                        pair, mapping.member_name, pair.destination_name()
                    ));
                }
            }
        }

        if validation_errors.is_empty() {
            Ok(())
        } else {
            validation_errors.sort();
            Err(Error::Configuration {
                message: "Mapping configuration is invalid".to_string(),
                validation_errors,
            })
        }
    }
}
